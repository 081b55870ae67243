//! Input handling - touch adapter, gestures, timers
//!
//! This module provides:
//! - Gesture recognition (swipes, long press, double tap)
//! - Long press timer queues (virtual clock and calloop)
//! - Translation of slot-based touch events into single-contact calls

mod gestures;
mod timer;
mod touch;

pub use gestures::*;
pub use timer::*;
pub use touch::*;
