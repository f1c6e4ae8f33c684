// SPDX-License-Identifier: MPL-2.0
//! Viewer configuration, including loading and saving host preferences
//! to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use swipe_lens::config;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.is_swipe_close_enabled = false;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use iced_core::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

pub use defaults::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_DISMISS_DISTANCE, DEFAULT_DISMISS_OPACITY_FALLOFF,
    DEFAULT_GLIDE_DELAY_MS, DISMISS_FLING_DURATION_MS, FLING_VELOCITY_PROJECTION,
    FREEZE_SCROLL_DISTANCE, PAGE_SETTLE_DISTANCE, SCALE_EPSILON, SCALE_MAXIMUM,
};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "SwipeLens";

/// Recognized options for a viewer session.
///
/// All fields have serde defaults, so a partial `settings.toml` (or an
/// empty one) deserializes into a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Index of the image shown when the viewer opens.
    pub initial_index: usize,

    /// Whether two-finger pinch zoom is recognized.
    pub is_pinch_zoom_enabled: bool,

    /// Whether a vertical drag may dismiss the viewer.
    pub is_swipe_close_enabled: bool,

    /// Scale images smaller than the viewport up to the dominant axis
    /// instead of showing them at natural size.
    pub upscale_small_images: bool,

    /// Vertical drag distance (logical px) past which a release closes
    /// the viewer.
    pub dismiss_distance_threshold: f32,

    /// Background opacity lost per logical pixel of vertical drag.
    pub dismiss_opacity_falloff: f32,

    /// Backdrop color as linear RGB components.
    pub background_color: [f32; 3],

    /// Explicit pinch zoom ceiling, as a multiple of the fit scale.
    /// `None` leaves zoom unbounded above the fit scale.
    pub max_scale: Option<f32>,

    /// Automatically advance to the next page shortly after the pager
    /// settles.
    pub glide_always: bool,

    /// Delay before a glide advance is requested, in milliseconds.
    pub glide_always_delay_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            is_pinch_zoom_enabled: true,
            is_swipe_close_enabled: true,
            upscale_small_images: false,
            dismiss_distance_threshold: DEFAULT_DISMISS_DISTANCE,
            dismiss_opacity_falloff: DEFAULT_DISMISS_OPACITY_FALLOFF,
            background_color: DEFAULT_BACKGROUND_COLOR,
            max_scale: None,
            glide_always: false,
            glide_always_delay_ms: DEFAULT_GLIDE_DELAY_MS,
        }
    }
}

impl ViewerConfig {
    /// Returns the backdrop color at full opacity.
    #[must_use]
    pub fn background_color(&self) -> Color {
        let [r, g, b] = self.background_color;
        Color::from_rgb(r, g, b)
    }

    /// Returns a copy with out-of-range numeric fields pulled back to
    /// usable values. Thresholds must stay positive for the dismiss
    /// decision to terminate.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.dismiss_distance_threshold.is_finite() || self.dismiss_distance_threshold <= 0.0 {
            self.dismiss_distance_threshold = DEFAULT_DISMISS_DISTANCE;
        }
        if !self.dismiss_opacity_falloff.is_finite() || self.dismiss_opacity_falloff <= 0.0 {
            self.dismiss_opacity_falloff = DEFAULT_DISMISS_OPACITY_FALLOFF;
        }
        if let Some(max) = self.max_scale {
            if !max.is_finite() || max < 1.0 {
                self.max_scale = None;
            }
        }
        self
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<ViewerConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ViewerConfig::default())
}

pub fn save(config: &ViewerConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<ViewerConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &ViewerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_consistent() {
        let config = ViewerConfig::default();
        assert_eq!(config.initial_index, 0);
        assert!(config.is_pinch_zoom_enabled);
        assert!(config.is_swipe_close_enabled);
        assert!(!config.upscale_small_images);
        assert!(config.max_scale.is_none());
        assert_eq!(config.dismiss_distance_threshold, DEFAULT_DISMISS_DISTANCE);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("test_settings.toml");

        let config = ViewerConfig {
            initial_index: 3,
            upscale_small_images: true,
            max_scale: Some(4.0),
            ..ViewerConfig::default()
        };
        save_to_path(&config, &path).expect("Failed to save config");

        let loaded = load_from_path(&path).expect("Failed to load config");
        assert_eq!(loaded.initial_index, 3);
        assert!(loaded.upscale_small_images);
        assert_eq!(loaded.max_scale, Some(4.0));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "is_swipe_close_enabled = false\n").unwrap();

        let loaded = load_from_path(&path).expect("Failed to load config");
        assert!(!loaded.is_swipe_close_enabled);
        assert!(loaded.is_pinch_zoom_enabled);
        assert_eq!(loaded.glide_always_delay_ms, DEFAULT_GLIDE_DELAY_MS);
    }

    #[test]
    fn sanitized_restores_broken_thresholds() {
        let config = ViewerConfig {
            dismiss_distance_threshold: -5.0,
            dismiss_opacity_falloff: f32::NAN,
            max_scale: Some(0.5),
            ..ViewerConfig::default()
        }
        .sanitized();

        assert_eq!(config.dismiss_distance_threshold, DEFAULT_DISMISS_DISTANCE);
        assert_eq!(
            config.dismiss_opacity_falloff,
            DEFAULT_DISMISS_OPACITY_FALLOFF
        );
        assert!(config.max_scale.is_none());
    }
}
