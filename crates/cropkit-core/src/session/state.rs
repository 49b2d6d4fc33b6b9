//! Explicit application state for the capture-and-crop screen.

use serde::{Deserialize, Serialize};

use super::device::CameraPosition;
use crate::geometry::{DisplayRect, Point, Size};
use crate::raster::PixelImage;

/// Where the screen is in the capture flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Camera not started.
    #[default]
    Idle,
    /// Live camera preview showing, no photo.
    Previewing,
    /// A captured or picked photo is displayed with the crop guide.
    Captured,
    /// The displayed photo has been cropped.
    Cropped,
}

/// Result of the save prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveOutcome {
    Saved,
    Discarded,
}

/// The crop guide drawn over the displayed photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayGuide {
    pub rect: DisplayRect,
    /// Zero draws a square; half the side draws a circle.
    pub corner_radius: f64,
}

impl OverlayGuide {
    /// A square guide of `side` points centered in `bounds`.
    pub fn centered(bounds: &DisplayRect, side: f64, corner_radius: f64) -> Self {
        Self {
            rect: DisplayRect::centered_in(bounds, Size::new(side, side)),
            corner_radius,
        }
    }
}

/// Everything the UI needs to render the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub phase: Phase,
    /// Photo currently shown in the image view.
    pub image: Option<PixelImage>,
    /// Last crop guide; kept after a crop so the same area can be cropped again.
    pub overlay: Option<OverlayGuide>,
    pub overlay_visible: bool,
    pub zoom_scale: f64,
    pub content_offset: Point,
    /// Zoom and pan gestures enabled.
    pub interaction_enabled: bool,
    pub preview_visible: bool,
    pub torch_on: bool,
    pub focus_indicator: Option<DisplayRect>,
    pub camera_position: CameraPosition,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            image: None,
            overlay: None,
            overlay_visible: false,
            zoom_scale: 1.0,
            content_offset: Point::default(),
            interaction_enabled: false,
            preview_visible: true,
            torch_on: false,
            focus_indicator: None,
            camera_position: CameraPosition::Back,
        }
    }
}

impl AppState {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub(crate) fn reset_zoom(&mut self) {
        self.zoom_scale = 1.0;
        self.content_offset = Point::default();
    }

    /// Drop the photo and go back to the live preview.
    pub(crate) fn return_to_preview(&mut self) {
        self.reset_zoom();
        self.image = None;
        self.preview_visible = true;
        self.interaction_enabled = false;
        self.phase = Phase::Previewing;
    }
}
