//! Boundary to the platform camera and photo library.
//!
//! Only encoded bytes and `PixelImage` values cross this trait; platform
//! handles (capture sessions, picker controllers) stay on the host side.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Point;
use crate::raster::PixelImage;

/// Errors reported by a `PhotoDevice` implementation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeviceError {
    /// No usable camera, or it could not be configured.
    #[error("Camera unavailable: {0}")]
    Unavailable(String),

    /// The user denied camera or photo library access.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The device does not offer this capability.
    #[error("Not supported: {0}")]
    Unsupported(String),

    /// Any other platform failure.
    #[error("Device operation failed: {0}")]
    Failed(String),
}

/// Which physical camera feeds the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CameraPosition {
    #[default]
    Back,
    Front,
}

impl CameraPosition {
    pub fn toggled(self) -> Self {
        match self {
            CameraPosition::Back => CameraPosition::Front,
            CameraPosition::Front => CameraPosition::Back,
        }
    }
}

/// Camera, photo picker and album capabilities of the host platform.
pub trait PhotoDevice {
    /// Start the live camera preview.
    fn start_preview(&mut self) -> Result<(), DeviceError>;

    /// Stop the live camera preview.
    fn stop_preview(&mut self);

    /// Take a still photo, returning its encoded bytes.
    fn capture_photo(&mut self) -> Result<Vec<u8>, DeviceError>;

    /// Let the user pick a photo. `None` means the picker was cancelled.
    fn pick_from_library(&mut self) -> Result<Option<Vec<u8>>, DeviceError>;

    /// Write an image to the photo album.
    fn save_to_library(&mut self, image: &PixelImage) -> Result<(), DeviceError>;

    fn has_torch(&self) -> bool;

    fn set_torch(&mut self, on: bool) -> Result<(), DeviceError>;

    /// Focus and expose at a point in normalized sensor coordinates.
    fn set_focus_point(&mut self, _point: Point) -> Result<(), DeviceError> {
        Err(DeviceError::Unsupported("focus point of interest".to_string()))
    }

    /// Switch the preview to the camera at `position`.
    fn switch_camera(&mut self, _position: CameraPosition) -> Result<(), DeviceError> {
        Err(DeviceError::Unsupported("camera switching".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareDevice;

    impl PhotoDevice for BareDevice {
        fn start_preview(&mut self) -> Result<(), DeviceError> {
            Ok(())
        }
        fn stop_preview(&mut self) {}
        fn capture_photo(&mut self) -> Result<Vec<u8>, DeviceError> {
            Ok(Vec::new())
        }
        fn pick_from_library(&mut self) -> Result<Option<Vec<u8>>, DeviceError> {
            Ok(None)
        }
        fn save_to_library(&mut self, _image: &PixelImage) -> Result<(), DeviceError> {
            Ok(())
        }
        fn has_torch(&self) -> bool {
            false
        }
        fn set_torch(&mut self, _on: bool) -> Result<(), DeviceError> {
            Ok(())
        }
    }

    #[test]
    fn test_optional_capabilities_default_to_unsupported() {
        let mut device = BareDevice;
        assert!(matches!(
            device.set_focus_point(Point::new(0.5, 0.5)),
            Err(DeviceError::Unsupported(_))
        ));
        assert!(matches!(
            device.switch_camera(CameraPosition::Front),
            Err(DeviceError::Unsupported(_))
        ));
    }

    #[test]
    fn test_camera_position_toggle() {
        assert_eq!(CameraPosition::Back.toggled(), CameraPosition::Front);
        assert_eq!(CameraPosition::Front.toggled(), CameraPosition::Back);
    }
}
