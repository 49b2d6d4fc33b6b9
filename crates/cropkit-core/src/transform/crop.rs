//! Crop region extraction.
//!
//! The output surface is sized to the crop area at the device scale. The
//! source is drawn into it with the origin translated by `(-crop.x, -crop.y)`
//! so the wanted region lands at the surface origin. Each output pixel takes
//! the source pixel under its center; when source and device scale match this
//! is an exact copy of the region.
//!
//! Parts of the crop area that fall outside the source stay black, the same
//! backdrop the view shows around a letterboxed image. Callers normally clamp
//! with [`crate::geometry::clamp_crop_area`] first.
//!
//! # Example
//!
//! ```ignore
//! // 300x200 point image at 2x, crop a 100x100 point square at (50, 50)
//! let cropped = rasterize_crop(&image, DisplayRect::new(50.0, 50.0, 100.0, 100.0), 2.0)?;
//! assert_eq!((cropped.width, cropped.height), (200, 200));
//! ```

use super::CropError;
use crate::geometry::{DisplayRect, Size};
use crate::raster::PixelImage;

/// Extract `crop_area` from `source` into a new image at `device_scale`.
///
/// `crop_area` is in the source's logical points (pixel size divided by its
/// scale factor).
///
/// # Errors
///
/// - `InvalidCropRegion` if the area has a non-positive width or height, a
///   non-finite origin, or rounds to zero pixels
/// - `InvalidScale` if `device_scale` is not a positive finite number
/// - `InvalidImage` if the source is empty
/// - `RasterizationFailure` if the output buffer cannot be allocated
pub fn rasterize_crop(
    source: &PixelImage,
    crop_area: DisplayRect,
    device_scale: f64,
) -> Result<PixelImage, CropError> {
    rasterize_displayed_crop(source, source.logical_size(), crop_area, device_scale)
}

/// Extract `crop_area` from `source` as it appears drawn at `displayed_size`.
///
/// This is what is on screen: the image view draws the whole source scaled
/// into its aspect-fit frame (times the zoom level), and the crop area is
/// measured in that frame's points.
pub fn rasterize_displayed_crop(
    source: &PixelImage,
    displayed_size: Size,
    crop_area: DisplayRect,
    device_scale: f64,
) -> Result<PixelImage, CropError> {
    if !(crop_area.width > 0.0 && crop_area.height > 0.0)
        || !crop_area.x.is_finite()
        || !crop_area.y.is_finite()
    {
        return Err(CropError::InvalidCropRegion {
            width: crop_area.width,
            height: crop_area.height,
        });
    }
    if !(device_scale > 0.0 && device_scale.is_finite()) {
        return Err(CropError::InvalidScale(device_scale));
    }
    if source.is_empty() || displayed_size.is_empty() {
        return Err(CropError::InvalidImage {
            width: source.width,
            height: source.height,
        });
    }

    let out_w = surface_dimension(crop_area.width, device_scale)?;
    let out_h = surface_dimension(crop_area.height, device_scale)?;
    if out_w == 0 || out_h == 0 {
        return Err(CropError::InvalidCropRegion {
            width: crop_area.width,
            height: crop_area.height,
        });
    }

    let len = (out_w as usize)
        .checked_mul(out_h as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| {
            CropError::RasterizationFailure(format!("surface {}x{} too large", out_w, out_h))
        })?;
    let mut output: Vec<u8> = Vec::new();
    output
        .try_reserve_exact(len)
        .map_err(|e| CropError::RasterizationFailure(e.to_string()))?;

    // Source pixels per displayed point
    let scale_x = source.width as f64 / displayed_size.width;
    let scale_y = source.height as f64 / displayed_size.height;

    let columns: Vec<Option<usize>> = (0..out_w)
        .map(|i| {
            let point_x = crop_area.x + (i as f64 + 0.5) / device_scale;
            source_index(point_x * scale_x, source.width)
        })
        .collect();

    let row_bytes = source.width as usize * 3;
    for j in 0..out_h {
        let point_y = crop_area.y + (j as f64 + 0.5) / device_scale;
        match source_index(point_y * scale_y, source.height) {
            Some(src_y) => {
                let row = &source.pixels[src_y * row_bytes..(src_y + 1) * row_bytes];
                for column in &columns {
                    match column {
                        Some(src_x) => output.extend_from_slice(&row[src_x * 3..src_x * 3 + 3]),
                        None => output.extend_from_slice(&[0, 0, 0]),
                    }
                }
            }
            None => output.resize(output.len() + out_w as usize * 3, 0),
        }
    }

    Ok(PixelImage {
        width: out_w,
        height: out_h,
        scale_factor: device_scale,
        pixels: output,
    })
}

/// Pixel count along one axis of the offscreen surface.
fn surface_dimension(points: f64, device_scale: f64) -> Result<u32, CropError> {
    let pixels = (points * device_scale).round();
    if pixels > u32::MAX as f64 {
        return Err(CropError::RasterizationFailure(format!(
            "surface dimension {} exceeds limits",
            pixels
        )));
    }
    Ok(pixels as u32)
}

/// Map a source-space coordinate to a pixel index, `None` when outside.
#[inline]
fn source_index(coord: f64, limit: u32) -> Option<usize> {
    if coord < 0.0 {
        return None;
    }
    let idx = coord.floor();
    if idx >= limit as f64 {
        None
    } else {
        Some(idx as usize)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
