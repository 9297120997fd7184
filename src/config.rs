//! Runtime configuration for a canvas session and its catalog client.

use crate::constants::*;
use crate::error::ConfigError;
use crate::viewport::ZoomLimits;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-facing settings. Defaults match the values in [`crate::constants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Base URL of the search/filter service
    pub api_base_url: String,
    /// Use the built-in demo catalog instead of the HTTP service
    pub offline: bool,
    /// Smallest zoom factor
    pub min_zoom: f32,
    /// Largest zoom factor
    pub max_zoom: f32,
    /// Factor applied per zoom step
    pub zoom_step: f32,
    /// Duration of the re-drop highlight, in seconds
    pub highlight_secs: f64,
    /// Base vertex radius in world units
    pub vertex_radius: f32,
    /// Gap between neighbouring parallel edges in world units
    pub parallel_edge_spacing: f32,
    /// Quiet period before a query is sent; 0 sends on every change
    pub search_debounce_ms: u64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            offline: false,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            highlight_secs: HIGHLIGHT_DURATION_SECS,
            vertex_radius: VERTEX_RADIUS,
            parallel_edge_spacing: PARALLEL_EDGE_SPACING,
            search_debounce_ms: 0,
        }
    }
}

impl CanvasConfig {
    /// Checks every value for range errors.
    ///
    /// The API URL is only checked when the HTTP catalog will be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::ZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(self.zoom_step > 1.0) {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        for (name, value) in [
            ("highlight_secs", self.highlight_secs),
            ("vertex_radius", f64::from(self.vertex_radius)),
            ("parallel_edge_spacing", f64::from(self.parallel_edge_spacing)),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if !self.offline {
            reqwest::Url::parse(&self.api_base_url).map_err(|e| ConfigError::ApiUrl {
                url: self.api_base_url.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Zoom limits for the viewport controller.
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.min_zoom,
            max: self.max_zoom,
            step: self.zoom_step,
        }
    }

    /// Search debounce window in seconds, as used by the search state.
    pub fn search_debounce_secs(&self) -> f64 {
        Duration::from_millis(self.search_debounce_ms).as_secs_f64()
    }
}
