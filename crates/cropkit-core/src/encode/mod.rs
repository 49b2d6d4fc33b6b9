//! Image encoding for the save-to-album path.
//!
//! The photo library accepts encoded bytes, so a cropped `PixelImage` is
//! encoded as JPEG before it crosses the device boundary.
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::encode::encode_jpeg;
//!
//! let jpeg_bytes = encode_jpeg(&cropped, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
