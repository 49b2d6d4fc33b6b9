//! JPEG encoding WASM bindings.
//!
//! ```typescript
//! import { encode_jpeg } from '@cropkit/wasm';
//!
//! const jpeg = encode_jpeg(cropped, 90);
//! const blob = new Blob([jpeg], { type: 'image/jpeg' });
//! ```

use crate::types::JsPixelImage;
use cropkit_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `quality` - JPEG quality (1-100, clamped; recommended: 90)
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the dimensions or the
/// image is empty.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsPixelImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.to_core(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_markers() {
        let img = JsPixelImage::new(10, 10, 1.0, vec![128u8; 300]);
        let jpeg = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_mismatched_buffer_fails() {
        let img = JsPixelImage::new(10, 10, 1.0, vec![0u8; 10]);
        assert!(encode_jpeg(&img, 90).is_err());
    }
}
