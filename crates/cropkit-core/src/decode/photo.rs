//! Photo decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation};
use crate::raster::PixelImage;

/// Decode photo bytes (JPEG or PNG) into an upright RGB image.
///
/// # Arguments
///
/// * `bytes` - Encoded image bytes from the camera or photo library
/// * `scale_factor` - Pixels per logical point to tag the result with
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails and
/// `DecodeError::InvalidScale` for a non-positive scale factor.
pub fn decode_photo(bytes: &[u8], scale_factor: f64) -> Result<PixelImage, DecodeError> {
    if !(scale_factor > 0.0 && scale_factor.is_finite()) {
        return Err(DecodeError::InvalidScale(scale_factor));
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    Ok(PixelImage::from_rgb_image(rgb_img, scale_factor))
}

/// Extract EXIF orientation from photo bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
