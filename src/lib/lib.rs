//! Animate a mouth display from text.
//!
//! Text is mapped character by character to five mouth shapes, paced with
//! small random pauses, and written one byte per shape to a controller
//! (usually an Arduino behind a serial port).

pub mod config;
pub mod error;
pub mod link;
pub mod sequencer;
pub mod session;
pub mod transport;
pub mod upstream;
pub mod viseme;

pub use config::Config;
pub use error::{ConfigError, LinkError, UpstreamError};
pub use link::{LinkOptions, LinkScope, MouthLink};
pub use sequencer::{Pacing, Sequencer, Step};
pub use session::{Session, SessionStats, is_quit};
pub use transport::{ConsoleFace, ConsoleOpener, Opener, SerialOpener, Transport, list_ports};
pub use upstream::{ChatClient, TextGenerator};
pub use viseme::{Viseme, map_char, map_text};

/// Shapes that would be written for `text`, in order, without any waiting.
pub fn preview(text: &str) -> Vec<Viseme> {
    Sequencer::new(text, Pacing::instant()).transmissions().collect()
}
