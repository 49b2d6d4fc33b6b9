//! Photo decoding for captured and picked images.
//!
//! The camera hands over JPEG bytes; the photo library may also return PNG.
//! Both are decoded to RGB with the EXIF orientation applied, so the pixels
//! are upright the way the preview showed them.
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::decode::decode_photo;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_photo(&bytes, 2.0).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod photo;
mod types;

pub use photo::{decode_photo, get_orientation};
pub use types::{DecodeError, Orientation};
