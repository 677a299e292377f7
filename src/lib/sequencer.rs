use std::time::Duration;

use rand::Rng;

use crate::viseme::{Viseme, map_char};

/// Timing used while animating text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Shortest pause after each character.
    pub step_min: Duration,
    /// Longest pause after each character.
    pub step_max: Duration,
    /// Pause before the closing rest shape.
    pub closing_pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            step_min: Duration::from_millis(80),
            step_max: Duration::from_millis(150),
            closing_pause: Duration::from_millis(100),
        }
    }
}

impl Pacing {
    /// No pauses at all. Useful for previews and tests.
    pub fn instant() -> Self {
        Self {
            step_min: Duration::ZERO,
            step_max: Duration::ZERO,
            closing_pause: Duration::ZERO,
        }
    }

    /// Draw one per-character pause, uniformly from `step_min..=step_max`.
    pub fn step_pause(&self) -> Duration {
        let max = self.step_max.max(self.step_min);
        rand::thread_rng().gen_range(self.step_min..=max)
    }
}

/// What the driver should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Send this shape to the controller.
    Transmit(Viseme),
    /// The shape did not change; nothing is sent.
    Hold(Viseme),
    /// Sleep before the next step.
    Pause(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Text,
    Done,
}

/// Lazily turns text into paced, de-duplicated mouth shape steps.
///
/// Every character yields a `Transmit` or `Hold` followed by a `Pause`.
/// When the text ends on an open shape, a closing pause and a final
/// `Transmit(ClosedM)` follow. The mouth is assumed closed at the start,
/// so leading rest characters are held, not sent.
#[derive(Debug)]
pub struct Sequencer {
    chars: std::vec::IntoIter<char>,
    last: Viseme,
    pacing: Pacing,
    pending: Option<Step>,
    phase: Phase,
}

impl Sequencer {
    pub fn new(text: &str, pacing: Pacing) -> Self {
        Self {
            chars: text.chars().collect::<Vec<_>>().into_iter(),
            last: Viseme::REST,
            pacing,
            pending: None,
            phase: Phase::Text,
        }
    }

    /// Only the shapes that would actually be written, ignoring timing.
    pub fn transmissions(self) -> impl Iterator<Item = Viseme> {
        self.filter_map(|step| match step {
            Step::Transmit(viseme) => Some(viseme),
            _ => None,
        })
    }
}

impl Iterator for Sequencer {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if let Some(step) = self.pending.take() {
            return Some(step);
        }
        if self.phase == Phase::Done {
            return None;
        }

        match self.chars.next() {
            Some(c) => {
                let viseme = map_char(c);
                let step = if viseme != self.last {
                    self.last = viseme;
                    Step::Transmit(viseme)
                } else {
                    Step::Hold(viseme)
                };
                self.pending = Some(Step::Pause(self.pacing.step_pause()));
                Some(step)
            }
            None => {
                self.phase = Phase::Done;
                if self.last.is_rest() {
                    return None;
                }
                self.last = Viseme::REST;
                self.pending = Some(Step::Transmit(Viseme::REST));
                Some(Step::Pause(self.pacing.closing_pause))
            }
        }
    }
}

impl std::iter::FusedIterator for Sequencer {}
