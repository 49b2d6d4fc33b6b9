//! Crop geometry: mapping the on-screen crop guide into image space.
//!
//! All values are in logical points (f64). The image view shows its image
//! with aspect-fit scaling, so the image only covers a centered sub-rectangle
//! of the view (the letterbox frame). The crop guide is drawn in view
//! coordinates and has to be translated into that frame before rasterizing.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - x grows to the right, y grows downwards
//!
//! # Example
//!
//! ```ignore
//! let view = DisplayRect::new(0.0, 0.0, 500.0, 500.0);
//! let frame = compute_image_frame(view, Size::new(1000.0, 500.0));
//! // frame == (0, 125, 500, 250)
//!
//! let overlay = DisplayRect::new(150.0, 150.0, 200.0, 200.0);
//! let crop = compute_crop_area(overlay, frame);
//! // crop == (150, 25, 200, 200)
//! ```

use serde::{Deserialize, Serialize};

/// A point in logical coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in logical points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or NaN.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle on a rendering surface.
///
/// Used both for the crop guide and for the frame an aspect-fit image
/// occupies inside its view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Check whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &DisplayRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Overlapping region of two rectangles.
    ///
    /// Disjoint rectangles produce a zero-sized rect whose origin is clamped
    /// into `self`, so width and height are never negative.
    pub fn intersection(&self, other: &DisplayRect) -> DisplayRect {
        let x = other.x.clamp(self.x, self.max_x().max(self.x));
        let y = other.y.clamp(self.y, self.max_y().max(self.y));
        let right = other.max_x().min(self.max_x());
        let bottom = other.max_y().min(self.max_y());
        DisplayRect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    /// Scale origin and size by `factor`.
    pub fn scaled(&self, factor: f64) -> DisplayRect {
        DisplayRect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> DisplayRect {
        DisplayRect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// A rectangle of `size` centered inside `bounds`.
    pub fn centered_in(bounds: &DisplayRect, size: Size) -> DisplayRect {
        DisplayRect::new(
            bounds.x + (bounds.width - size.width) / 2.0,
            bounds.y + (bounds.height - size.height) / 2.0,
            size.width,
            size.height,
        )
    }
}

/// Compute the frame an image occupies inside a view under aspect-fit.
///
/// The image is scaled by `min(view.w / image.w, view.h / image.h)` and
/// centered within `view_bounds`; the rest of the view is empty letterbox
/// (or pillarbox) margin.
///
/// # Arguments
///
/// * `view_bounds` - Bounds of the image view
/// * `image_natural_size` - Logical size of the displayed image
///
/// # Returns
///
/// The sub-rectangle of `view_bounds` covered by the image. An image with a
/// non-positive dimension yields an empty rect at the view's center.
pub fn compute_image_frame(view_bounds: DisplayRect, image_natural_size: Size) -> DisplayRect {
    if image_natural_size.is_empty() || view_bounds.is_empty() {
        return DisplayRect::centered_in(&view_bounds, Size::default());
    }

    let width_ratio = view_bounds.width / image_natural_size.width;
    let height_ratio = view_bounds.height / image_natural_size.height;
    let ratio = width_ratio.min(height_ratio);

    let size = Size::new(
        image_natural_size.width * ratio,
        image_natural_size.height * ratio,
    );
    DisplayRect::centered_in(&view_bounds, size)
}

/// Translate the crop guide into the image frame's local coordinates.
///
/// This is a pure translation by the frame's origin; width and height are
/// passed through. The result is not clamped: a guide that pokes out of the
/// frame produces a negative origin or an area larger than the frame. Use
/// [`clamp_crop_area`] before rasterizing.
pub fn compute_crop_area(overlay_rect: DisplayRect, image_frame: DisplayRect) -> DisplayRect {
    DisplayRect::new(
        overlay_rect.x - image_frame.x,
        overlay_rect.y - image_frame.y,
        overlay_rect.width,
        overlay_rect.height,
    )
}

/// Clip a crop area to the image frame `(0, 0, frame_size)`.
///
/// A crop area entirely outside the frame clamps to an empty rectangle.
pub fn clamp_crop_area(crop_area: DisplayRect, frame_size: Size) -> DisplayRect {
    let frame = DisplayRect::new(
        0.0,
        0.0,
        frame_size.width.max(0.0),
        frame_size.height.max(0.0),
    );
    frame.intersection(&crop_area)
}

/// Convert a touch on the live preview into a camera focus point.
///
/// The sensor is mounted landscape while the preview is shown in portrait,
/// so the axes are swapped: `(touch.y / h, 1 - touch.x / w)`. Both components
/// are in the camera's normalized 0.0..=1.0 space.
pub fn focus_point_of_interest(touch: Point, preview_size: Size) -> Point {
    if preview_size.is_empty() {
        return Point::new(0.5, 0.5);
    }
    let x = touch.y / preview_size.height;
    let y = 1.0 - touch.x / preview_size.width;
    Point::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
}

/// Square focus indicator of side `size` centered on the touch point.
pub fn focus_indicator_rect(touch: Point, size: f64) -> DisplayRect {
    DisplayRect::new(touch.x - size / 2.0, touch.y - size / 2.0, size, size)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
