//! Swipe-to-act cards
//!
//! A card is dragged horizontally and released. Dragging far enough right
//! triggers the right action, far enough left the left action; anything
//! shorter snaps back. Every drag gives haptic feedback.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::haptics::{HapticSink, Haptics};

/// Side of the card an action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Left,
    Right,
}

/// Action revealed behind the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeAction {
    pub label: String,
}

impl SwipeAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

/// Swipe card settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeCardConfig {
    /// Horizontal drag needed to trigger an action (px)
    pub threshold_px: f64,
}

impl Default for SwipeCardConfig {
    fn default() -> Self {
        Self { threshold_px: 100.0 }
    }
}

/// A horizontally draggable card
#[derive(Debug)]
pub struct SwipeCard {
    threshold: f64,
    left_action: Option<SwipeAction>,
    right_action: Option<SwipeAction>,
    disabled: bool,
    dragging: bool,
    offset: f64,
}

impl SwipeCard {
    pub fn new(config: &SwipeCardConfig) -> Self {
        Self {
            threshold: config.threshold_px,
            left_action: None,
            right_action: None,
            disabled: false,
            dragging: false,
            offset: 0.0,
        }
    }

    pub fn with_left_action(mut self, action: SwipeAction) -> Self {
        self.left_action = Some(action);
        self
    }

    pub fn with_right_action(mut self, action: SwipeAction) -> Self {
        self.right_action = Some(action);
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn action(&self, side: CardSide) -> Option<&SwipeAction> {
        match side {
            CardSide::Left => self.left_action.as_ref(),
            CardSide::Right => self.right_action.as_ref(),
        }
    }

    pub fn drag_start<S: HapticSink>(&mut self, haptics: &mut Haptics<S>) {
        if self.disabled {
            return;
        }
        self.dragging = true;
        haptics.light();
    }

    pub fn drag_update(&mut self, offset_x: f64) {
        if self.disabled || !self.dragging {
            return;
        }
        self.offset = offset_x;
    }

    /// Release the card. Returns the side whose action was triggered, if any.
    pub fn drag_end<S: HapticSink>(&mut self, offset_x: f64, haptics: &mut Haptics<S>) -> Option<CardSide> {
        if self.disabled {
            return None;
        }
        self.dragging = false;
        self.offset = 0.0;

        let side = if offset_x > self.threshold && self.right_action.is_some() {
            Some(CardSide::Right)
        } else if offset_x < -self.threshold && self.left_action.is_some() {
            Some(CardSide::Left)
        } else {
            None
        };

        match side {
            Some(side) => {
                debug!(?side, offset_x, "Swipe card action triggered");
                haptics.success();
            }
            None => haptics.light(),
        }
        side
    }

    /// Card opacity while dragging: opaque at either threshold, transparent at rest
    pub fn card_opacity(&self) -> f64 {
        if !self.dragging {
            return 1.0;
        }
        (self.offset.abs() / self.threshold).clamp(0.0, 1.0)
    }

    /// Opacity of the action revealed on one side for the current offset
    pub fn reveal_opacity(&self, side: CardSide) -> f64 {
        let t = match side {
            // Dragging left uncovers the left action
            CardSide::Left => -self.offset / self.threshold,
            CardSide::Right => self.offset / self.threshold,
        };
        t.clamp(0.0, 1.0)
    }
}
