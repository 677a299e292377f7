use std::io::{self, BufRead, Write};

use log::debug;

use crate::link::MouthLink;
use crate::transport::Opener;
use crate::upstream::TextGenerator;

const QUIT: &str = "quit";
const RULE: &str = "---------------------------------------------------------";

/// Counters for a finished chat session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub prompts: usize,
    pub replies: usize,
    pub failures: usize,
}

/// True for the line that ends a session, in any letter case.
///
/// The whole line must be the word; `" quit "` is sent as a prompt.
pub fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case(QUIT)
}

/// Interactive loop: read a prompt, ask the generator, animate the reply.
///
/// Each reply is animated to the end before the next prompt is read.
pub struct Session<'a, O: Opener, G: TextGenerator> {
    link: &'a mut MouthLink<O>,
    generator: G,
    assistant: String,
}

impl<'a, O: Opener, G: TextGenerator> Session<'a, O, G> {
    pub fn new(link: &'a mut MouthLink<O>, generator: G) -> Self {
        Self {
            link,
            generator,
            assistant: "Assistant".to_string(),
        }
    }

    /// Name printed in front of each reply.
    pub fn with_assistant_name(mut self, name: impl Into<String>) -> Self {
        self.assistant = name.into();
        self
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<SessionStats> {
        let mut stats = SessionStats::default();

        if !self.link.is_open() {
            writeln!(out, "\nCould not start chat. Please check the connection.")?;
            writeln!(out, "Session ended. Goodbye!")?;
            return Ok(stats);
        }

        writeln!(out, "\n{} is ready. Type '{QUIT}' to exit.", self.assistant)?;
        writeln!(out, "{RULE}")?;

        let mut lines = input.lines();
        loop {
            write!(out, "You: ")?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                break;
            };
            if is_quit(&line) {
                break;
            }
            let prompt = line.trim();
            if prompt.is_empty() {
                continue;
            }
            stats.prompts += 1;

            let reply = match self.generator.generate(prompt) {
                Ok(reply) => reply,
                Err(e) => {
                    stats.failures += 1;
                    writeln!(out, "An error occurred while communicating with the API: {e}")?;
                    continue;
                }
            };
            stats.replies += 1;
            writeln!(out, "{}: {reply}", self.assistant)?;

            if self.link.animate(&reply) {
                self.link.wait();
            }
            debug!("turn {} done", stats.prompts);
        }

        writeln!(out, "{RULE}")?;
        writeln!(out, "Session ended. Goodbye!")?;
        Ok(stats)
    }
}
