//! Crop guide geometry WASM bindings.
//!
//! Rectangles cross the boundary as plain `{ x, y, width, height }` objects
//! and sizes as `{ width, height }`.
//!
//! ```typescript
//! const frame = compute_image_frame(
//!   { x: 0, y: 0, width: view.clientWidth, height: view.clientHeight },
//!   { width: photo.width / photo.scaleFactor, height: photo.height / photo.scaleFactor },
//! );
//! const area = compute_crop_area(guideRect, frame);
//! ```

use cropkit_core::geometry::{self, DisplayRect, Point, Size};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Frame an image of `image_natural_size` occupies when aspect-fit into
/// `view_bounds`, in the view's coordinate space.
#[wasm_bindgen]
pub fn compute_image_frame(
    view_bounds: JsValue,
    image_natural_size: JsValue,
) -> Result<JsValue, JsValue> {
    let bounds: DisplayRect = from_js(view_bounds, "view bounds")?;
    let size: Size = from_js(image_natural_size, "image size")?;
    to_js(&geometry::compute_image_frame(bounds, size))
}

/// Express the crop guide rectangle relative to the image frame.
#[wasm_bindgen]
pub fn compute_crop_area(overlay_rect: JsValue, image_frame: JsValue) -> Result<JsValue, JsValue> {
    let overlay: DisplayRect = from_js(overlay_rect, "overlay rect")?;
    let frame: DisplayRect = from_js(image_frame, "image frame")?;
    to_js(&geometry::compute_crop_area(overlay, frame))
}

/// Clip a crop area to `(0, 0, frame_size)`.
#[wasm_bindgen]
pub fn clamp_crop_area(crop_area: JsValue, frame_size: JsValue) -> Result<JsValue, JsValue> {
    let area: DisplayRect = from_js(crop_area, "crop area")?;
    let size: Size = from_js(frame_size, "frame size")?;
    to_js(&geometry::clamp_crop_area(area, size))
}

/// Map a tap in the preview to the camera's normalized focus point.
///
/// Returns `{ x, y }` with both coordinates in `0..=1`.
#[wasm_bindgen]
pub fn focus_point_of_interest(
    touch_x: f64,
    touch_y: f64,
    preview_width: f64,
    preview_height: f64,
) -> Result<JsValue, JsValue> {
    let point = geometry::focus_point_of_interest(
        Point::new(touch_x, touch_y),
        Size::new(preview_width, preview_height),
    );
    to_js(&point)
}
