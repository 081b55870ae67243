//! Haptic feedback cues
//!
//! Cues map to vibration patterns (alternating on/off durations in ms). A
//! device without a vibration motor simply gets nothing, and a failing motor
//! is logged, never reported to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Kind of haptic cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticKind {
    #[default]
    Light,
    Medium,
    Heavy,
    Selection,
    Impact,
    Notification,
}

impl HapticKind {
    /// Vibration pattern for this cue
    pub fn pattern(self) -> &'static [u32] {
        match self {
            HapticKind::Light => &[10],
            HapticKind::Medium => &[20],
            HapticKind::Heavy => &[50],
            HapticKind::Selection => &[10, 10, 10],
            HapticKind::Impact => &[30],
            HapticKind::Notification => &[50, 50, 50],
        }
    }
}

#[derive(Error, Debug)]
#[error("vibration failed: {0}")]
pub struct HapticError(pub String);

/// A vibration motor
pub trait HapticSink {
    fn supported(&self) -> bool;
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), HapticError>;
}

/// Device without haptics
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn supported(&self) -> bool {
        false
    }

    fn vibrate(&mut self, _pattern: &[u32]) -> Result<(), HapticError> {
        Ok(())
    }
}

/// Sink that only logs the patterns it would play
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHaptics;

impl HapticSink for LogHaptics {
    fn supported(&self) -> bool {
        true
    }

    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), HapticError> {
        debug!(?pattern, "Vibrate");
        Ok(())
    }
}

/// Haptic cue dispatcher
#[derive(Debug, Default)]
pub struct Haptics<S: HapticSink> {
    sink: S,
}

impl<S: HapticSink> Haptics<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn trigger(&mut self, kind: HapticKind) {
        if !self.sink.supported() {
            return;
        }
        if let Err(e) = self.sink.vibrate(kind.pattern()) {
            warn!("Haptic feedback failed: {}", e);
        }
    }

    pub fn supported(&self) -> bool {
        self.sink.supported()
    }

    pub fn light(&mut self) {
        self.trigger(HapticKind::Light);
    }

    pub fn medium(&mut self) {
        self.trigger(HapticKind::Medium);
    }

    pub fn heavy(&mut self) {
        self.trigger(HapticKind::Heavy);
    }

    pub fn selection(&mut self) {
        self.trigger(HapticKind::Selection);
    }

    pub fn impact(&mut self) {
        self.trigger(HapticKind::Impact);
    }

    pub fn notification(&mut self) {
        self.trigger(HapticKind::Notification);
    }

    // Contextual cues

    pub fn button_tap(&mut self) {
        self.light();
    }

    pub fn order_placed(&mut self) {
        self.notification();
    }

    pub fn status_change(&mut self) {
        self.medium();
    }

    pub fn error(&mut self) {
        self.heavy();
    }

    pub fn success(&mut self) {
        self.notification();
    }
}
