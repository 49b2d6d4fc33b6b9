//! Aspect-fit resizing.
//!
//! Scales an image to the largest size that fits inside a target box while
//! keeping its width:height ratio. Sizes are logical points; the output keeps
//! the source's scale factor.

use super::{CropError, FilterType};
use crate::geometry::Size;
use crate::raster::PixelImage;

/// Slack for float error when flooring to whole pixels.
const PIXEL_EPSILON: f64 = 1e-6;

/// Resize an image to fit inside `target_size`, preserving aspect ratio.
///
/// `ratio = min(target.w / image.w, target.h / image.h)` on the image's
/// logical size. Smaller images are scaled up. Pixel dimensions are floored
/// so the result never exceeds the target, with a minimum of one pixel.
///
/// The result keeps `image.scale_factor`. Photos are decoded and cropped at
/// the device scale, so this is the screen scale for anything the session
/// produces; to render at another scale, re-tag or crop at that scale first.
///
/// # Errors
///
/// - `InvalidImage` if the source has a zero dimension or bad buffer
/// - `InvalidTargetSize` if the target is empty or smaller than one pixel
pub fn resize_aspect_fit(
    image: &PixelImage,
    target_size: Size,
    filter: FilterType,
) -> Result<PixelImage, CropError> {
    if image.is_empty() {
        return Err(CropError::InvalidImage {
            width: image.width,
            height: image.height,
        });
    }

    let scale = image.scale_factor;
    if target_size.is_empty()
        || target_size.width * scale < 1.0
        || target_size.height * scale < 1.0
    {
        return Err(CropError::InvalidTargetSize {
            width: target_size.width,
            height: target_size.height,
        });
    }

    let (new_width, new_height) = fit_dimensions(image.logical_size(), target_size, scale);

    // Fast path: already the right size
    if new_width == image.width && new_height == image.height {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image().ok_or(CropError::InvalidImage {
        width: image.width,
        height: image.height,
    })?;
    let resized = image::imageops::resize(
        &rgb_image,
        new_width,
        new_height,
        filter.to_image_filter(),
    );

    Ok(PixelImage::from_rgb_image(resized, scale))
}

/// Pixel dimensions of `size` aspect-fit into `target` at `scale`.
pub fn fit_dimensions(size: Size, target: Size, scale: f64) -> (u32, u32) {
    if size.is_empty() || target.is_empty() {
        return (0, 0);
    }

    let ratio = (target.width / size.width).min(target.height / size.height);
    let to_pixels = |points: f64| -> u32 {
        let pixels = (points * ratio * scale + PIXEL_EPSILON).floor();
        (pixels.min(u32::MAX as f64) as u32).max(1)
    };

    (to_pixels(size.width), to_pixels(size.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32, scale: f64) -> PixelImage {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
            }
        }
        PixelImage::new(width, height, scale, pixels)
    }

    #[test]
    fn test_resize_landscape_into_square() {
        let img = create_test_image(400, 200, 1.0);
        let resized = resize_aspect_fit(&img, Size::new(100.0, 100.0), FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
        assert_eq!(resized.pixels.len(), 100 * 50 * 3);
    }

    #[test]
    fn test_resize_portrait_into_square() {
        let img = create_test_image(200, 400, 1.0);
        let resized = resize_aspect_fit(&img, Size::new(100.0, 100.0), FilterType::Bilinear).unwrap();

        assert_eq!((resized.width, resized.height), (50, 100));
    }

    #[test]
    fn test_resize_keeps_scale_factor() {
        // 800x400 pixels at 2x = 400x200 points
        let img = create_test_image(800, 400, 2.0);
        let resized = resize_aspect_fit(&img, Size::new(100.0, 100.0), FilterType::Nearest).unwrap();

        assert_eq!(resized.scale_factor, 2.0);
        assert_eq!((resized.width, resized.height), (200, 100));
        assert_eq!(resized.logical_size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_resize_upscales_small_image() {
        let img = create_test_image(50, 25, 1.0);
        let resized = resize_aspect_fit(&img, Size::new(200.0, 200.0), FilterType::Lanczos3).unwrap();

        assert_eq!((resized.width, resized.height), (200, 100));
    }

    #[test]
    fn test_resize_same_size_is_clone() {
        let img = create_test_image(64, 32, 1.0);
        let resized = resize_aspect_fit(&img, Size::new(64.0, 64.0), FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_empty_image_error() {
        let img = PixelImage::new(0, 10, 1.0, vec![]);
        let result = resize_aspect_fit(&img, Size::new(100.0, 100.0), FilterType::Bilinear);
        assert!(matches!(result, Err(CropError::InvalidImage { .. })));
    }

    #[test]
    fn test_resize_zero_target_error() {
        let img = create_test_image(100, 50, 1.0);

        for target in [Size::new(0.0, 50.0), Size::new(50.0, -1.0), Size::new(0.5, 0.5)] {
            let result = resize_aspect_fit(&img, target, FilterType::Bilinear);
            assert!(matches!(result, Err(CropError::InvalidTargetSize { .. })));
        }
    }

    #[test]
    fn test_fit_dimensions_landscape() {
        let (w, h) = fit_dimensions(Size::new(6000.0, 4000.0), Size::new(2560.0, 2560.0), 1.0);
        assert_eq!(w, 2560);
        assert_eq!(h, 1706);
    }

    #[test]
    fn test_fit_dimensions_extreme_aspect_keeps_one_pixel() {
        let (w, h) = fit_dimensions(Size::new(10000.0, 1.0), Size::new(100.0, 100.0), 1.0);
        assert_eq!(w, 100);
        assert_eq!(h, 1);
    }

    #[test]
    fn test_fit_dimensions_zero_input() {
        assert_eq!(fit_dimensions(Size::default(), Size::new(256.0, 256.0), 1.0), (0, 0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: The output never exceeds the target box.
        #[test]
        fn prop_fit_never_exceeds_target(
            (w, h) in (1.0f64..10000.0, 1.0f64..10000.0),
            (tw, th) in (1.0f64..5000.0, 1.0f64..5000.0),
            scale in prop_oneof![Just(1.0f64), Just(2.0f64), Just(3.0f64)],
        ) {
            let (out_w, out_h) = fit_dimensions(Size::new(w, h), Size::new(tw, th), scale);
            prop_assert!(out_w as f64 <= tw * scale + 1e-5 || out_w == 1);
            prop_assert!(out_h as f64 <= th * scale + 1e-5 || out_h == 1);
        }

        /// Property: Aspect ratio is preserved within one pixel of rounding.
        #[test]
        fn prop_fit_preserves_aspect(
            (w, h) in (10.0f64..4000.0, 10.0f64..4000.0),
            t in 50.0f64..1000.0,
        ) {
            let (out_w, out_h) = fit_dimensions(Size::new(w, h), Size::new(t, t), 1.0);
            let expected_h = out_w as f64 * h / w;
            prop_assert!(
                (out_h as f64 - expected_h).abs() <= 1.0 + h / w,
                "got {}x{}, expected height ~{}",
                out_w,
                out_h,
                expected_h
            );
        }

        /// Property: One side always touches the target.
        #[test]
        fn prop_fit_touches_target(
            (w, h) in (1.0f64..4000.0, 1.0f64..4000.0),
            t in 1u32..2000,
        ) {
            let (out_w, out_h) = fit_dimensions(Size::new(w, h), Size::new(t as f64, t as f64), 1.0);
            prop_assert!(out_w == t || out_h == t);
        }
    }
}
