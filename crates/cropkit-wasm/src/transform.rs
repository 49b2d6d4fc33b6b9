//! WASM bindings for crop rasterization and aspect-fit resizing.

use crate::types::{filter_from_u8, JsPixelImage};
use cropkit_core::geometry::{DisplayRect, Size};
use cropkit_core::transform;
use wasm_bindgen::prelude::*;

/// Extract a crop area from an image.
///
/// The crop area is in the image's logical points (`width / scaleFactor`).
/// The output is `width * device_scale` by `height * device_scale` pixels.
///
/// # Errors
///
/// Returns an error if the area has a non-positive width or height, the
/// device scale is not positive, or the output cannot be allocated.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const area = compute_crop_area(guideRect, imageFrame);
/// const cropped = rasterize_crop(photo, area.x, area.y, area.width, area.height, devicePixelRatio);
/// ```
#[wasm_bindgen]
pub fn rasterize_crop(
    image: &JsPixelImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    device_scale: f64,
) -> Result<JsPixelImage, JsValue> {
    let src = image.to_core();
    transform::rasterize_crop(&src, DisplayRect::new(x, y, width, height), device_scale)
        .map(JsPixelImage::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract a crop area from an image as drawn at `displayed_width` x
/// `displayed_height` points (its aspect-fit frame on screen).
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn rasterize_displayed_crop(
    image: &JsPixelImage,
    displayed_width: f64,
    displayed_height: f64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    device_scale: f64,
) -> Result<JsPixelImage, JsValue> {
    let src = image.to_core();
    transform::rasterize_displayed_crop(
        &src,
        Size::new(displayed_width, displayed_height),
        DisplayRect::new(x, y, width, height),
        device_scale,
    )
    .map(JsPixelImage::from_core)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to fit inside a target box, preserving aspect ratio.
///
/// # Arguments
///
/// * `image` - Source image
/// * `target_width` / `target_height` - Bounding box in logical points
/// * `filter` - 0=Nearest, 1=Bilinear (default), 2=Lanczos3
#[wasm_bindgen]
pub fn resize_aspect_fit(
    image: &JsPixelImage,
    target_width: f64,
    target_height: f64,
    filter: u8,
) -> Result<JsPixelImage, JsValue> {
    let src = image.to_core();
    transform::resize_aspect_fit(
        &src,
        Size::new(target_width, target_height),
        filter_from_u8(filter),
    )
    .map(JsPixelImage::from_core)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// Error paths create a `JsValue` and can only run on wasm32 targets.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_rasterize_zero_width_fails() {
        let img = JsPixelImage::new(10, 10, 1.0, vec![0u8; 300]);
        let err = rasterize_crop(&img, 0.0, 0.0, 0.0, 5.0, 1.0).err().unwrap();
        assert!(err.as_string().unwrap().starts_with("Invalid crop region"));
    }

    #[wasm_bindgen_test]
    fn test_resize_zero_target_fails() {
        let img = JsPixelImage::new(10, 10, 1.0, vec![0u8; 300]);
        assert!(resize_aspect_fit(&img, 0.0, 10.0, 1).is_err());
    }
}
