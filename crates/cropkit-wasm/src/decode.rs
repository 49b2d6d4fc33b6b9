//! Photo decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_photo } from '@cropkit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const photo = decode_photo(bytes, window.devicePixelRatio);
//! console.log(`Decoded ${photo.width}x${photo.height}`);
//! ```

use crate::types::JsPixelImage;
use cropkit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG or PNG bytes into an upright RGB image.
///
/// EXIF orientation is applied, so the result is in display orientation.
///
/// # Arguments
///
/// * `bytes` - Encoded photo bytes as a `Uint8Array`
/// * `scale_factor` - Pixels per logical point to tag the image with
///
/// # Errors
///
/// Returns an error if the format is not recognized, the data is corrupted
/// or the scale factor is not positive.
#[wasm_bindgen]
pub fn decode_photo(bytes: &[u8], scale_factor: f64) -> Result<JsPixelImage, JsValue> {
    decode::decode_photo(bytes, scale_factor)
        .map(JsPixelImage::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the EXIF orientation tag (1-8) from photo bytes.
///
/// Returns 1 (normal) when the bytes carry no EXIF data.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropkit_core::PixelImage;

    #[test]
    fn test_decode_photo_from_jpeg() {
        let source = PixelImage::solid(8, 4, 1.0, [200, 200, 200]);
        let bytes = cropkit_core::encode::encode_jpeg(&source, 90).unwrap();

        let img = decode_photo(&bytes, 2.0).unwrap();
        assert_eq!(img.width(), 8);
        assert_eq!(img.height(), 4);
        assert_eq!(img.scale_factor(), 2.0);
    }

    #[test]
    fn test_orientation_of_plain_bytes() {
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), 1);
    }
}
