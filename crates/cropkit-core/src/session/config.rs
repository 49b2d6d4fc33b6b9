//! Session configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the capture-and-crop screen.
///
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Side length of the square crop guide, in points.
    pub overlay_size: f64,
    /// Corner radius of the crop guide outline, in points.
    pub overlay_corner_radius: f64,
    /// Smallest zoom scale of the image view.
    pub min_zoom: f64,
    /// Largest zoom scale of the image view.
    pub max_zoom: f64,
    /// Side length of the tap-to-focus indicator, in points.
    pub focus_indicator_size: f64,
    /// JPEG quality used when handing images to the photo library (1-100).
    pub jpeg_quality: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            overlay_size: 200.0,
            overlay_corner_radius: 0.0,
            min_zoom: 1.0,
            max_zoom: 10.0,
            focus_indicator_size: 72.0,
            jpeg_quality: 90,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overlay_size(mut self, size: f64) -> Self {
        self.overlay_size = size;
        self
    }

    pub fn with_overlay_corner_radius(mut self, radius: f64) -> Self {
        self.overlay_corner_radius = radius;
        self
    }

    pub fn with_zoom_range(mut self, min: f64, max: f64) -> Self {
        self.min_zoom = min;
        self.max_zoom = max;
        self
    }

    pub fn with_focus_indicator_size(mut self, size: f64) -> Self {
        self.focus_indicator_size = size;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Check that sizes are positive and the zoom range is ordered.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.overlay_size > 0.0) {
            return Err(format!("overlay size must be positive, got {}", self.overlay_size));
        }
        if !(self.overlay_corner_radius >= 0.0) {
            return Err(format!(
                "overlay corner radius must not be negative, got {}",
                self.overlay_corner_radius
            ));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(format!(
                "zoom range {}..={} is invalid",
                self.min_zoom, self.max_zoom
            ));
        }
        if !(self.focus_indicator_size > 0.0) {
            return Err(format!(
                "focus indicator size must be positive, got {}",
                self.focus_indicator_size
            ));
        }
        Ok(())
    }
}
