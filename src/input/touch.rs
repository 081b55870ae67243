//! Touch input handling
//!
//! Platform touch events arrive per slot, and touch up carries no position.
//! `TouchTracker` follows the first slot that goes down and feeds it to the
//! recognizer as a single contact; other slots are ignored until it lifts.

use tracing::debug;

use super::gestures::{Contact, GestureRecognizer};
use super::timer::TimerQueue;

/// Raw touch event from the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Down {
        slot: i32,
        position: (f64, f64),
        time_ms: i64,
    },
    Up {
        slot: i32,
        time_ms: i64,
    },
    Motion {
        slot: i32,
        position: (f64, f64),
        time_ms: i64,
    },
    Cancel,
    Frame,
}

/// Primary slot tracking
#[derive(Debug, Default)]
pub struct TouchTracker {
    primary: Option<i32>,
    last_pos: (f64, f64),
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot currently driving the recognizer
    pub fn primary_slot(&self) -> Option<i32> {
        self.primary
    }

    /// Route one touch event into the recognizer
    pub fn handle<T: TimerQueue>(&mut self, event: TouchEvent, recognizer: &mut GestureRecognizer<T>) {
        match event {
            TouchEvent::Down { slot, position, time_ms } => {
                if let Some(primary) = self.primary {
                    if primary != slot {
                        debug!(slot, primary, "Ignoring additional touch slot");
                        return;
                    }
                }
                self.primary = Some(slot);
                self.last_pos = position;
                recognizer.start(Contact::new(position.0, position.1, time_ms));
            }

            TouchEvent::Motion { slot, position, .. } => {
                if self.primary == Some(slot) {
                    self.last_pos = position;
                    recognizer.motion();
                }
            }

            TouchEvent::Up { slot, time_ms } => {
                if self.primary == Some(slot) {
                    self.primary = None;
                    let (x, y) = self.last_pos;
                    recognizer.end(Contact::new(x, y, time_ms));
                }
            }

            TouchEvent::Cancel => {
                self.primary = None;
                recognizer.cancel();
            }

            TouchEvent::Frame => {}
        }
    }
}
