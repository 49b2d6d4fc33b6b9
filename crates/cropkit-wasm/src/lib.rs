//! Cropkit WASM - WebAssembly bindings for Cropkit
//!
//! This crate exposes the cropkit-core crop geometry, rasterization and
//! capture session to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `geometry` - Image frame, crop area and focus point mapping
//! - `transform` - Crop rasterization and aspect-fit resize
//! - `decode` - Photo decoding (JPEG, PNG) with EXIF orientation
//! - `encode` - JPEG encoding for download/save
//! - `session` - `JsCropSession` over a host-provided camera object
//! - `logging` - Forwards cropkit-core's `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_photo, compute_image_frame, compute_crop_area, rasterize_crop } from '@cropkit/wasm';
//!
//! await init();
//!
//! const photo = decode_photo(bytes, devicePixelRatio);
//! const frame = compute_image_frame(viewBounds, {
//!   width: photo.width / photo.scaleFactor,
//!   height: photo.height / photo.scaleFactor,
//! });
//! const area = compute_crop_area(guideRect, frame);
//! const cropped = rasterize_crop(photo, area.x, area.y, area.width, area.height, devicePixelRatio);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod geometry;
mod logging;
mod session;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_photo, get_orientation};
pub use encode::encode_jpeg;
pub use geometry::{
    clamp_crop_area, compute_crop_area, compute_image_frame, focus_point_of_interest,
};
pub use logging::set_log_level;
pub use session::{JsCropSession, JsPhotoDevice};
pub use transform::{rasterize_crop, rasterize_displayed_crop, resize_aspect_fit};
pub use types::JsPixelImage;

/// Initialize the WASM module (called automatically on load)
///
/// Installs the console logger at `warn` level.
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
