//! Cropkit Core - capture, crop guide geometry and cropping
//!
//! This crate provides the platform-independent part of the cropkit camera
//! screen: mapping the on-screen crop guide into image space, extracting and
//! resizing pixel regions, decoding captured photos, encoding for the photo
//! album, and the session state that ties these to the camera.
//!
//! # Module Structure
//!
//! - `geometry` - Aspect-fit frames, crop areas, focus points
//! - `raster` - The `PixelImage` buffer passed between every step
//! - `transform` - Crop rasterization and aspect-fit resize
//! - `decode` - Photo bytes to `PixelImage`, with EXIF orientation
//! - `encode` - JPEG encoding for the save path
//! - `session` - `CropSession`, `AppState` and the `PhotoDevice` boundary

pub mod decode;
pub mod encode;
pub mod geometry;
pub mod raster;
pub mod session;
pub mod transform;

pub use geometry::{
    clamp_crop_area, compute_crop_area, compute_image_frame, DisplayRect, Point, Size,
};
pub use raster::PixelImage;
pub use session::{AppState, CropSession, PhotoDevice, SessionConfig, SessionError};
pub use transform::{rasterize_crop, resize_aspect_fit, CropError, FilterType};

#[cfg(test)]
mod tests {
    use super::*;

    /// The worked example: a 2:1 photo letterboxed in a square view.
    #[test]
    fn test_letterboxed_guide_end_to_end() {
        let view = DisplayRect::new(0.0, 0.0, 500.0, 500.0);
        let frame = compute_image_frame(view, Size::new(1000.0, 500.0));
        assert_eq!(frame, DisplayRect::new(0.0, 125.0, 500.0, 250.0));

        let overlay = DisplayRect::new(150.0, 150.0, 200.0, 200.0);
        let crop_area = compute_crop_area(overlay, frame);
        assert_eq!(crop_area, DisplayRect::new(150.0, 25.0, 200.0, 200.0));

        let photo = PixelImage::solid(500, 250, 1.0, [40, 80, 160]);
        let cropped = rasterize_crop(&photo, crop_area, 2.0).unwrap();
        assert_eq!((cropped.width, cropped.height), (400, 400));
        assert!(cropped.pixels.chunks(3).all(|px| px == [40, 80, 160]));

        let thumb = resize_aspect_fit(&cropped, Size::new(100.0, 50.0), FilterType::Bilinear)
            .unwrap();
        assert_eq!((thumb.width, thumb.height), (100, 100));
        assert_eq!(thumb.scale_factor, 2.0);
    }
}
