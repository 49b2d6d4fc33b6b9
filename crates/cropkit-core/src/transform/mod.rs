//! Raster operations: extracting the crop region and aspect-fit resizing.
//!
//! Both operations read strictly from the source buffer and allocate a new
//! output image; the input is never modified. Nothing drawn on top of the
//! image on screen (crop guide, focus indicator) can end up in the output.
//!
//! # Coordinate System
//!
//! - Crop areas are in logical points relative to the displayed image
//! - Output pixel size = logical size * device scale, rounded
//! - Origin is top-left corner

mod crop;
mod resize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crop::{rasterize_crop, rasterize_displayed_crop};
pub use resize::{fit_dimensions, resize_aspect_fit};

/// Error types for crop and resize operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CropError {
    /// Crop area has a non-positive width or height.
    #[error("Invalid crop region: {width}x{height}")]
    InvalidCropRegion { width: f64, height: f64 },

    /// The output surface could not be allocated.
    #[error("Rasterization failed: {0}")]
    RasterizationFailure(String),

    /// Source image has no pixels, a mismatched buffer or a bad scale.
    #[error("Invalid source image: {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    /// Resize target has a non-positive dimension.
    #[error("Invalid target size: {width}x{height}")]
    InvalidTargetSize { width: f64, height: f64 },

    /// Device scale must be a positive, finite number.
    #[error("Invalid device scale: {0}")]
    InvalidScale(f64),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_crop_error_display() {
        let err = CropError::InvalidCropRegion {
            width: 0.0,
            height: 10.0,
        };
        assert_eq!(err.to_string(), "Invalid crop region: 0x10");

        let err = CropError::RasterizationFailure("out of memory".to_string());
        assert_eq!(err.to_string(), "Rasterization failed: out of memory");
    }
}
