//! # Render Configuration
//!
//! Tunable constants of the waterfall view, loadable from YAML with kebab-case keys.
//! Every key is optional; omitted keys keep their defaults.
//!
//! ```rust
//! use keyfall::RenderConfig;
//!
//! let config = RenderConfig::from_yaml("seconds-in-view: 5.0").unwrap();
//! assert_eq!(config.seconds_in_view, 5.0);
//! assert_eq!(config.piano_ratio, 0.25);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::KeyfallError;
use crate::render::palette::TRACK_COLORS;
use crate::render::Color;

/// Background image fetched when the host does not supply one
pub const DEFAULT_BACKGROUND_SOURCE: &str = "https://picsum.photos/1920/1080?blur=5";

/// Layout and style parameters for the renderer
///
/// # Fields
/// - `piano_ratio`: Share of the surface height taken by the keyboard
/// - `seconds_in_view`: Look-ahead window shown above the keyboard
/// - `black_key_width` / `black_key_height`: Black key size relative to a white key
///   width and to the keyboard height
/// - `glow_height`: Height of the glow band above the keyboard
/// - `highlight_alpha`: Opacity of active-key highlights
/// - `note_glow_blur`: Blur radius of the glow around falling notes
/// - `track_colors`: Palette cycled over tracks
/// - `background`: Source of the decorative background image, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RenderConfig {
    pub piano_ratio: f64,
    pub seconds_in_view: f64,
    pub black_key_width: f64,
    pub black_key_height: f64,
    pub glow_height: f64,
    pub highlight_alpha: f32,
    pub note_glow_blur: f64,
    pub track_colors: Vec<Color>,
    pub background: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            piano_ratio: 0.25,
            seconds_in_view: 3.5,
            black_key_width: 0.6,
            black_key_height: 0.6,
            glow_height: 50.0,
            highlight_alpha: 0.5,
            note_glow_blur: 15.0,
            track_colors: TRACK_COLORS.to_vec(),
            background: Some(DEFAULT_BACKGROUND_SOURCE.to_string()),
        }
    }
}

impl RenderConfig {
    pub fn from_yaml(source: &str) -> Result<Self, KeyfallError> {
        // An empty document means "all defaults"
        if source.trim().is_empty() {
            return Ok(RenderConfig::default());
        }
        let config: RenderConfig =
            serde_yaml::from_str(source).map_err(|e| KeyfallError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), KeyfallError> {
        if !(self.piano_ratio > 0.0 && self.piano_ratio < 1.0) {
            return Err(KeyfallError::ConfigError(format!(
                "piano-ratio must be between 0 and 1, got {}",
                self.piano_ratio
            )));
        }
        if !(self.seconds_in_view.is_finite() && self.seconds_in_view > 0.0) {
            return Err(KeyfallError::ConfigError(format!(
                "seconds-in-view must be positive, got {}",
                self.seconds_in_view
            )));
        }
        for (name, value) in [
            ("black-key-width", self.black_key_width),
            ("black-key-height", self.black_key_height),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(KeyfallError::ConfigError(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        if !(self.glow_height >= 0.0) || !(self.note_glow_blur >= 0.0) {
            return Err(KeyfallError::ConfigError(
                "glow-height and note-glow-blur must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.highlight_alpha) {
            return Err(KeyfallError::ConfigError(format!(
                "highlight-alpha must be in [0, 1], got {}",
                self.highlight_alpha
            )));
        }
        if self.track_colors.is_empty() {
            return Err(KeyfallError::ConfigError(
                "track-colors must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
