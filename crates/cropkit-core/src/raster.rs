//! In-memory raster image shared by every stage of the capture flow.

use crate::geometry::Size;

/// An RGB raster buffer with a device scale factor.
///
/// `scale_factor` is the number of physical pixels per logical point, so a
/// 600x400 buffer at scale 2.0 is laid out as a 300x200 point image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Physical pixels per logical point (e.g. 2.0 or 3.0).
    pub scale_factor: f64,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelImage {
    /// Create a new PixelImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, scale_factor: f64, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            scale_factor,
            pixels,
        }
    }

    /// Create an image filled with a single color.
    pub fn solid(width: u32, height: u32, scale_factor: f64, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self::new(width, height, scale_factor, pixels)
    }

    /// Create a PixelImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage, scale_factor: f64) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            scale_factor,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Size of the image in logical points.
    pub fn logical_size(&self) -> Size {
        if self.scale_factor > 0.0 {
            Size::new(
                self.width as f64 / self.scale_factor,
                self.height as f64 / self.scale_factor,
            )
        } else {
            Size::default()
        }
    }

    /// RGB value at pixel `(x, y)`, if inside the image.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        let px = self.pixels.get(idx..idx + 3)?;
        Some([px[0], px[1], px[2]])
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    ///
    /// Also covers a buffer whose length disagrees with the dimensions, or a
    /// non-positive scale factor.
    pub fn is_empty(&self) -> bool {
        self.width == 0
            || self.height == 0
            || self.pixels.len() != self.pixel_count() * 3
            || !(self.scale_factor > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_image_creation() {
        let img = PixelImage::new(100, 50, 2.0, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.byte_size(), 15000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_logical_size_uses_scale() {
        let img = PixelImage::solid(600, 400, 2.0, [0, 0, 0]);
        assert_eq!(img.logical_size(), Size::new(300.0, 200.0));
    }

    #[test]
    fn test_solid_fills_every_pixel() {
        let img = PixelImage::solid(3, 2, 1.0, [10, 20, 30]);
        assert_eq!(img.pixels.len(), 18);
        assert_eq!(img.pixel_at(0, 0), Some([10, 20, 30]));
        assert_eq!(img.pixel_at(2, 1), Some([10, 20, 30]));
        assert_eq!(img.pixel_at(3, 0), None);
    }

    #[test]
    fn test_empty_detection() {
        assert!(PixelImage::new(0, 0, 1.0, vec![]).is_empty());

        let mut img = PixelImage::solid(2, 2, 1.0, [1, 2, 3]);
        img.scale_factor = 0.0;
        assert!(img.is_empty());

        let mut img = PixelImage::solid(2, 2, 1.0, [1, 2, 3]);
        img.pixels.pop();
        assert!(img.is_empty());
    }

    #[test]
    fn test_rgb_image_conversion() {
        let img = PixelImage::solid(4, 3, 3.0, [200, 100, 50]);
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.dimensions(), (4, 3));

        let back = PixelImage::from_rgb_image(rgb, 3.0);
        assert_eq!(back, img);
    }
}
