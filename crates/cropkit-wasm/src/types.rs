//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core cropkit types,
//! handling the conversion between Rust and JavaScript data representations.

use cropkit_core::transform::FilterType;
use cropkit_core::PixelImage;
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// Holds RGB pixel data plus the device scale factor the pixels were
/// produced at, so the UI can size the image in CSS pixels
/// (`width / scaleFactor`).
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsPixelImage {
    width: u32,
    height: u32,
    scale_factor: f64,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelImage {
    /// Create a new JsPixelImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `scale_factor` - Pixels per logical point (`window.devicePixelRatio`)
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, scale_factor: f64, pixels: Vec<u8>) -> JsPixelImage {
        JsPixelImage {
            width,
            height,
            scale_factor,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixels-per-point scale factor
    #[wasm_bindgen(getter)]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelImage {
    /// Wrap a core PixelImage without copying.
    pub(crate) fn from_core(img: PixelImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            scale_factor: img.scale_factor,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core PixelImage.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_core(&self) -> PixelImage {
        PixelImage {
            width: self.width,
            height: self.height,
            scale_factor: self.scale_factor,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_pixel_image_creation() {
        let img = JsPixelImage::new(100, 50, 2.0, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.scale_factor(), 2.0);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_core_round_trip_keeps_scale() {
        let core = PixelImage::solid(4, 2, 3.0, [1, 2, 3]);
        let js_img = JsPixelImage::from_core(core.clone());
        assert_eq!(js_img.pixels(), core.pixels);
        assert_eq!(js_img.to_core(), core);
    }

    #[test]
    fn test_filter_from_u8() {
        assert!(matches!(filter_from_u8(0), FilterType::Nearest));
        assert!(matches!(filter_from_u8(1), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(2), FilterType::Lanczos3));
        // Unknown values default to Bilinear
        assert!(matches!(filter_from_u8(3), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(255), FilterType::Bilinear));
    }
}
