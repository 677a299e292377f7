use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use crate::error::LinkError;
use crate::sequencer::{Pacing, Sequencer, Step};
use crate::transport::{Opener, Transport};
use crate::viseme::Viseme;

/// Many controllers (Arduinos in particular) reset when the port is opened.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkOptions {
    /// Wait after opening the transport before anything is written.
    pub settle: Duration,
    pub pacing: Pacing,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            settle: DEFAULT_SETTLE,
            pacing: Pacing::default(),
        }
    }
}

/// Drives a mouth controller over a byte link.
///
/// `animate` runs in the background; at most one animation is active per
/// link and requests arriving while one runs are dropped. `disconnect`
/// (also run on drop) waits for the animation, leaves the mouth closed and
/// releases the transport.
pub struct MouthLink<O: Opener> {
    opener: O,
    options: LinkOptions,
    address: Option<String>,
    port: Arc<Mutex<Option<O::Transport>>>,
    animation: Option<JoinHandle<()>>,
}

impl<O: Opener> MouthLink<O> {
    pub fn new(opener: O) -> Self {
        Self::with_options(opener, LinkOptions::default())
    }

    pub fn with_options(opener: O, options: LinkOptions) -> Self {
        Self {
            opener,
            options,
            address: None,
            port: Arc::new(Mutex::new(None)),
            animation: None,
        }
    }

    pub fn options(&self) -> &LinkOptions {
        &self.options
    }

    /// Address of the open transport, if any.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.port.lock().is_some()
    }

    /// True while an animation is still running.
    pub fn is_busy(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Open the link. Reports the outcome and returns whether it worked.
    pub fn connect(&mut self, address: &str, rate: u32) -> bool {
        match self.try_connect(address, rate) {
            Ok(()) => {
                info!("Connected to mouth controller on {address}");
                true
            }
            Err(e) => {
                error!("{e}. Is the address correct?");
                false
            }
        }
    }

    /// Like [`connect`](Self::connect) but hands back the error.
    pub fn try_connect(&mut self, address: &str, rate: u32) -> Result<(), LinkError> {
        if self.is_open() {
            self.disconnect();
        }

        let transport = self
            .opener
            .open(address, rate)
            .map_err(|source| LinkError::Open {
                address: address.to_string(),
                source,
            })?;
        thread::sleep(self.options.settle);

        *self.port.lock() = Some(transport);
        self.address = Some(address.to_string());
        Ok(())
    }

    /// Start animating `text` without blocking.
    ///
    /// Returns false, and changes nothing, if the link is closed or an
    /// animation is already running.
    pub fn animate(&mut self, text: &str) -> bool {
        if !self.is_open() {
            error!("Cannot animate: {}", LinkError::NotConnected);
            return false;
        }
        if self.is_busy() {
            warn!("Mouth is already moving. Ignoring new text.");
            return false;
        }
        // reap the previous, already finished, animation
        self.wait();

        let port = Arc::clone(&self.port);
        let steps = Sequencer::new(text, self.options.pacing);
        let spawned = thread::Builder::new()
            .name("mouth-animation".into())
            .spawn(move || {
                if let Err(e) = play(&*port, steps) {
                    error!("Animation stopped: {e}");
                }
            });

        match spawned {
            Ok(handle) => {
                self.animation = Some(handle);
                true
            }
            Err(e) => {
                error!("Could not start animation thread: {e}");
                false
            }
        }
    }

    /// Block until the current animation, if any, has finished.
    pub fn wait(&mut self) {
        if let Some(handle) = self.animation.take() {
            if handle.join().is_err() {
                error!("Animation thread panicked");
            }
        }
    }

    /// Wait for any running animation, close the mouth and release the link.
    ///
    /// The closing write is best effort; the link always ends up closed.
    pub fn disconnect(&mut self) {
        self.wait();

        let Some(mut transport) = self.port.lock().take() else {
            return;
        };
        if let Err(e) = transport.write_byte(Viseme::REST.as_byte()) {
            warn!("Could not write closing shape on disconnect: {e}");
        }
        transport.close();
        self.address = None;
        info!("Mouth link closed.");
    }

    /// Connect and wrap the link in a guard that disconnects when dropped.
    ///
    /// The guard is returned even when connecting failed; check
    /// [`LinkScope::connected`].
    pub fn enter(mut self, address: &str, rate: u32) -> LinkScope<O> {
        let connected = self.connect(address, rate);
        LinkScope {
            link: self,
            connected,
        }
    }
}

impl<O: Opener> Drop for MouthLink<O> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn play<T: Transport>(port: &Mutex<Option<T>>, steps: Sequencer) -> Result<(), LinkError> {
    for step in steps {
        match step {
            Step::Transmit(viseme) => {
                let mut guard = port.lock();
                let transport = guard.as_mut().ok_or(LinkError::NotConnected)?;
                transport.write_byte(viseme.as_byte())?;
                debug!("sent {viseme}");
            }
            Step::Hold(_) => {}
            Step::Pause(pause) => thread::sleep(pause),
        }
    }
    Ok(())
}

/// A connected [`MouthLink`] that is disconnected on every exit path.
pub struct LinkScope<O: Opener> {
    link: MouthLink<O>,
    connected: bool,
}

impl<O: Opener> LinkScope<O> {
    /// Whether connecting on entry succeeded.
    pub fn connected(&self) -> bool {
        self.connected
    }
}

impl<O: Opener> Deref for LinkScope<O> {
    type Target = MouthLink<O>;

    fn deref(&self) -> &MouthLink<O> {
        &self.link
    }
}

impl<O: Opener> DerefMut for LinkScope<O> {
    fn deref_mut(&mut self) -> &mut MouthLink<O> {
        &mut self.link
    }
}

impl<O: Opener> Drop for LinkScope<O> {
    fn drop(&mut self) {
        self.link.disconnect();
    }
}
