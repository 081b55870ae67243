//! Settings file
//!
//! ```toml
//! [gestures]
//! swipe_threshold_px = 50.0
//! long_press_delay_ms = 500
//! double_tap_window_ms = 300
//!
//! [swipe_card]
//! threshold_px = 100.0
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::input::GestureConfig;
use crate::swipe_card::SwipeCardConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gestures: GestureConfig,
    pub swipe_card: SwipeCardConfig,
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok()
            .map(|dir| dir.join("flick/gestures.toml"))
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let settings = Self::from_toml(&text)?;
                info!("Loaded gesture settings from {:?}", path);
                Ok(settings)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No gesture settings at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load from the default location, or use defaults if there is none
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let g = &self.gestures;
        if !g.swipe_threshold_px.is_finite() || g.swipe_threshold_px < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "swipe_threshold_px must be a non-negative number, got {}",
                g.swipe_threshold_px
            )));
        }
        if g.long_press_delay_ms == 0 {
            return Err(Error::InvalidConfig("long_press_delay_ms must be positive".into()));
        }
        if g.double_tap_window_ms < 0 {
            return Err(Error::InvalidConfig(format!(
                "double_tap_window_ms must not be negative, got {}",
                g.double_tap_window_ms
            )));
        }

        let card = &self.swipe_card;
        if !card.threshold_px.is_finite() || card.threshold_px <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "swipe_card.threshold_px must be a positive number, got {}",
                card.threshold_px
            )));
        }
        Ok(())
    }
}
