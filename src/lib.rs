//! Flick gestures - single-contact touch gesture recognition
//!
//! Features:
//! - Directional swipes classified at touch up
//! - Long press delivered from a cancellable timer while the finger is down
//! - Double tap across consecutive short touches
//! - Swipe-to-act cards with haptic cues
//! - Replay of recorded touch traces

pub mod config;
pub mod error;
pub mod haptics;
pub mod input;
pub mod replay;
pub mod swipe_card;

pub use error::{Error, Result};
