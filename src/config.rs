//! Backdrop configuration and the reduced-motion preference.
//!
//! Configuration is layered: builder methods win over the environment, which
//! wins over a TOML config file, which wins over the defaults. The TOML layer
//! exists so kiosk deployments can retune the backdrop without a rebuild:
//!
//! ```toml
//! title = "portfolio"
//! width = 1600
//! height = 900
//! seed = 7
//! reduced_motion = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::visuals::Palette;

/// Environment variable consulted by [`ReducedMotion::detect`].
pub const REDUCED_MOTION_ENV: &str = "GOSSAMER_REDUCED_MOTION";

/// Tunable backdrop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Window title.
    pub title: String,
    /// Initial logical window width.
    pub width: u32,
    /// Initial logical window height.
    pub height: u32,
    /// Spawn seed; `None` derives one from the process id so every launch
    /// looks different.
    pub seed: Option<u64>,
    /// Reduced-motion override; `None` falls back to the environment.
    pub reduced_motion: Option<bool>,
    /// Color palette.
    pub palette: Palette,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            title: "gossamer".to_string(),
            width: 1280,
            height: 720,
            seed: None,
            reduced_motion: None,
            palette: Palette::default(),
        }
    }
}

impl BackdropConfig {
    /// Load a config from a TOML file. Missing keys take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// The spawn seed to use: the configured one, or a per-process fallback.
    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or_else(|| u64::from(std::process::id()))
    }
}

/// The user's reduced-motion accessibility preference.
///
/// Desktop platforms have no portable query for this, so the signal is an
/// environment variable: set [`REDUCED_MOTION_ENV`] to anything but `0` or
/// the empty string to suppress the backdrop entirely.
pub struct ReducedMotion;

impl ReducedMotion {
    /// Read the preference from the environment. Called once at startup.
    pub fn detect() -> bool {
        match std::env::var(REDUCED_MOTION_ENV) {
            Ok(v) => !v.is_empty() && v != "0",
            Err(_) => false,
        }
    }

    /// Resolve the effective preference: an explicit override wins over the
    /// environment.
    pub fn resolve(override_value: Option<bool>) -> bool {
        override_value.unwrap_or_else(Self::detect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackdropConfig::default();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert!(config.seed.is_none());
        assert!(config.reduced_motion.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: BackdropConfig = toml::from_str("title = \"kiosk\"\nseed = 9").unwrap();
        assert_eq!(config.title, "kiosk");
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.width, 1280);
    }

    #[test]
    fn test_override_beats_environment() {
        // No env mutation here: explicit overrides must win regardless.
        assert!(ReducedMotion::resolve(Some(true)));
        assert!(!ReducedMotion::resolve(Some(false)));
    }
}
