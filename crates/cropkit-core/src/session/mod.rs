//! Capture-and-crop session driving the single screen of the app.
//!
//! `CropSession` owns the explicit [`AppState`] and a [`PhotoDevice`]. The UI
//! layer calls one method per user action and re-renders from [`AppState`]:
//!
//! ```text
//! Idle --start--> Previewing --take_photo/pick_photo--> Captured --crop--> Cropped
//!                     ^                                     |                |
//!                     +------------- save / clear ----------+----------------+
//! ```
//!
//! Failures that the user can recover from (no photo yet, guide outside the
//! photo, missing torch) come back as [`SessionError`] and are logged; the
//! caller decides what message to show.

mod config;
mod device;
mod state;

use log::{debug, warn};
use thiserror::Error;

use crate::decode::{decode_photo, DecodeError};
use crate::geometry::{
    clamp_crop_area, compute_crop_area, compute_image_frame, focus_indicator_rect,
    focus_point_of_interest, DisplayRect, Point,
};
use crate::raster::PixelImage;
use crate::transform::{rasterize_displayed_crop, CropError};

pub use config::SessionConfig;
pub use device::{CameraPosition, DeviceError, PhotoDevice};
pub use state::{AppState, OverlayGuide, Phase, SaveOutcome};

/// Errors surfaced to the UI layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Crop or save requested before a photo was taken or picked.
    #[error("No photo yet: take or pick a photo first")]
    NoImage,

    /// The active camera has no torch.
    #[error("Torch is not available")]
    TorchUnavailable,

    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// State and device for one capture-and-crop screen.
pub struct CropSession<D: PhotoDevice> {
    device: D,
    config: SessionConfig,
    state: AppState,
    /// Bounds of the image view; the crop guide is drawn in the same space.
    view_bounds: DisplayRect,
    device_scale: f64,
    /// Set between a successful `start` and `stop`.
    preview_running: bool,
}

impl<D: PhotoDevice> CropSession<D> {
    /// Create a session for an image view of `view_bounds` on a display with
    /// `device_scale` pixels per point.
    pub fn new(
        device: D,
        config: SessionConfig,
        view_bounds: DisplayRect,
        device_scale: f64,
    ) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::InvalidConfig)?;
        if !(device_scale > 0.0 && device_scale.is_finite()) {
            return Err(SessionError::InvalidConfig(format!(
                "device scale must be positive, got {}",
                device_scale
            )));
        }

        Ok(Self {
            device,
            config,
            state: AppState::default(),
            view_bounds,
            device_scale,
            preview_running: false,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn view_bounds(&self) -> DisplayRect {
        self.view_bounds
    }

    pub fn device_scale(&self) -> f64 {
        self.device_scale
    }

    /// Update the image view bounds after a layout change.
    ///
    /// A visible crop guide is re-centered in the new bounds.
    pub fn set_view_bounds(&mut self, bounds: DisplayRect) {
        self.view_bounds = bounds;
        if self.state.overlay.is_some() {
            self.state.overlay = Some(self.centered_guide());
        }
    }

    /// Start the live camera preview.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.device.start_preview() {
            warn!("Unable to start camera preview: {}", e);
            return Err(e.into());
        }
        self.preview_running = true;
        self.state.preview_visible = true;
        if !self.state.has_image() {
            self.state.phase = Phase::Previewing;
        }
        debug!("Camera preview started");
        Ok(())
    }

    /// Stop the preview and switch the torch off, as when the screen goes away.
    pub fn stop(&mut self) {
        self.device.stop_preview();
        self.preview_running = false;
        if self.state.torch_on {
            if let Err(e) = self.device.set_torch(false) {
                warn!("Torch could not be switched off: {}", e);
            }
            self.state.torch_on = false;
        }
        if self.state.phase == Phase::Previewing {
            self.state.phase = Phase::Idle;
        }
        debug!("Camera preview stopped");
    }

    /// Capture a still photo and show it with the crop guide.
    pub fn take_photo(&mut self) -> Result<&PixelImage, SessionError> {
        let bytes = self.device.capture_photo().map_err(|e| {
            warn!("Photo capture failed: {}", e);
            e
        })?;
        let image = decode_photo(&bytes, self.device_scale)?;
        debug!("Captured {}x{} photo", image.width, image.height);
        Ok(self.show_image(image))
    }

    /// Pick a photo from the library and show it with the crop guide.
    ///
    /// Returns `Ok(false)` when the user cancels the picker; the state is left
    /// untouched in that case.
    pub fn pick_photo(&mut self) -> Result<bool, SessionError> {
        let Some(bytes) = self.device.pick_from_library()? else {
            debug!("Photo picker cancelled");
            return Ok(false);
        };
        let image = decode_photo(&bytes, self.device_scale)?;
        debug!("Picked {}x{} photo", image.width, image.height);
        self.show_image(image);
        Ok(true)
    }

    /// Crop the displayed photo to the area under the crop guide.
    ///
    /// The guide is mapped into the photo's on-screen frame (aspect-fit plus
    /// the current zoom and pan), clamped to that frame, and rasterized at the
    /// device scale. The result replaces the displayed photo.
    pub fn crop(&mut self) -> Result<&PixelImage, SessionError> {
        let Some(image) = self.state.image.as_ref() else {
            warn!("Crop requested before a photo was taken");
            return Err(SessionError::NoImage);
        };

        let guide = self
            .state
            .overlay
            .unwrap_or_else(|| self.centered_guide())
            .rect;
        let frame = self.displayed_frame(image);
        let crop_area = clamp_crop_area(compute_crop_area(guide, frame), frame.size());

        let cropped = rasterize_displayed_crop(image, frame.size(), crop_area, self.device_scale)
            .map_err(|e| {
                warn!("Skipping crop: {}", e);
                e
            })?;
        debug!(
            "Cropped {}x{} photo to {}x{}",
            image.width, image.height, cropped.width, cropped.height
        );

        self.state.phase = Phase::Cropped;
        self.state.overlay_visible = false;
        self.state.preview_visible = false;
        self.state.reset_zoom();
        Ok(&*self.state.image.insert(cropped))
    }

    /// Answer the save prompt.
    ///
    /// With `confirm` the photo goes to the album; either way the screen goes
    /// back to the live preview. If saving fails the photo stays on screen.
    pub fn save(&mut self, confirm: bool) -> Result<SaveOutcome, SessionError> {
        let Some(image) = self.state.image.take() else {
            warn!("Save requested before a photo was taken");
            return Err(SessionError::NoImage);
        };
        let interactive = std::mem::replace(&mut self.state.interaction_enabled, false);

        let outcome = if confirm {
            if let Err(e) = self.device.save_to_library(&image) {
                warn!("Saving photo to album failed: {}", e);
                self.state.image = Some(image);
                self.state.interaction_enabled = interactive;
                return Err(e.into());
            }
            debug!("Saved {}x{} photo to album", image.width, image.height);
            SaveOutcome::Saved
        } else {
            SaveOutcome::Discarded
        };

        self.drop_photo();
        Ok(outcome)
    }

    /// Drop the photo and crop guide and return to the live preview.
    pub fn clear(&mut self) {
        self.drop_photo();
        self.state.overlay = None;
        self.state.overlay_visible = false;
    }

    /// Flip the torch. Returns the new torch state.
    pub fn toggle_torch(&mut self) -> Result<bool, SessionError> {
        if !self.device.has_torch() {
            warn!("Torch is not available");
            return Err(SessionError::TorchUnavailable);
        }
        let on = !self.state.torch_on;
        self.device.set_torch(on).map_err(|e| {
            warn!("Torch could not be used: {}", e);
            e
        })?;
        self.state.torch_on = on;
        Ok(on)
    }

    /// Apply a zoom/pan gesture. Ignored unless a photo is being framed.
    ///
    /// Returns whether the gesture was applied.
    pub fn set_zoom(&mut self, scale: f64, content_offset: Point) -> bool {
        if !self.state.interaction_enabled || scale.is_nan() {
            return false;
        }
        self.state.zoom_scale = scale.clamp(self.config.min_zoom, self.config.max_zoom);
        self.state.content_offset = content_offset;
        true
    }

    /// Tap-to-focus at `touch` (preview coordinates).
    ///
    /// Returns the normalized focus point sent to the camera. The focus
    /// indicator is only shown when the camera accepted the point.
    pub fn focus_at(&mut self, touch: Point) -> Result<Point, SessionError> {
        let point = focus_point_of_interest(touch, self.view_bounds.size());
        self.device.set_focus_point(point).map_err(|e| {
            debug!("Focus point rejected: {}", e);
            e
        })?;
        self.state.focus_indicator =
            Some(focus_indicator_rect(touch, self.config.focus_indicator_size));
        Ok(point)
    }

    /// Hide the focus indicator once the touch ends.
    pub fn end_focus(&mut self) {
        self.state.focus_indicator = None;
    }

    /// Switch between the back and front camera.
    pub fn switch_camera(&mut self) -> Result<CameraPosition, SessionError> {
        let next = self.state.camera_position.toggled();
        self.device.switch_camera(next).map_err(|e| {
            warn!("Camera switch failed: {}", e);
            e
        })?;
        self.state.camera_position = next;
        Ok(next)
    }

    fn show_image(&mut self, image: PixelImage) -> &PixelImage {
        self.state.phase = Phase::Captured;
        self.state.overlay = Some(self.centered_guide());
        self.state.overlay_visible = true;
        self.state.interaction_enabled = true;
        self.state.preview_visible = false;
        self.state.reset_zoom();
        self.state.image.insert(image)
    }

    /// Back to the preview, or to `Idle` if the camera was never started.
    fn drop_photo(&mut self) {
        self.state.return_to_preview();
        if !self.preview_running {
            self.state.phase = Phase::Idle;
        }
    }

    fn centered_guide(&self) -> OverlayGuide {
        OverlayGuide::centered(
            &self.view_bounds,
            self.config.overlay_size,
            self.config.overlay_corner_radius,
        )
    }

    /// Frame the photo occupies on screen, in view coordinates.
    ///
    /// Zoom scales the content about the view origin, then the content
    /// offset pans it.
    fn displayed_frame(&self, image: &PixelImage) -> DisplayRect {
        let bounds = self.view_bounds;
        let offset = self.state.content_offset;
        compute_image_frame(bounds, image.logical_size())
            .translated(-bounds.x, -bounds.y)
            .scaled(self.state.zoom_scale)
            .translated(bounds.x - offset.x, bounds.y - offset.y)
    }
}
