//! Capture-and-crop session bindings.
//!
//! The browser side supplies a host object whose methods implement the
//! camera, picker and album. Methods are called synchronously; the host is
//! expected to have any async platform work (getUserMedia, file input) done
//! before driving the session.
//!
//! ```typescript
//! const host = {
//!   startPreview() { video.play(); },
//!   stopPreview() { video.pause(); },
//!   capturePhoto() { return lastFrameJpeg; },       // Uint8Array
//!   pickFromLibrary() { return pickedBytes ?? null; },
//!   saveToLibrary(jpeg, width, height) { download(jpeg); },
//!   hasTorch() { return false; },
//!   setTorch(on) {},
//!   setFocusPoint(x, y) {},                           // optional
//!   switchCamera(position) {},                        // optional, "back" | "front"
//! };
//! const session = new JsCropSession(host, { overlaySize: 240 }, 0, 0, 375, 667, devicePixelRatio);
//! session.start();
//! session.take_photo();
//! const cropped = session.crop();
//! ```

use cropkit_core::encode::encode_jpeg;
use cropkit_core::geometry::{DisplayRect, Point};
use cropkit_core::session::{
    AppState, CameraPosition, CropSession, DeviceError, OverlayGuide, Phase, PhotoDevice,
    SaveOutcome, SessionConfig,
};
use cropkit_core::PixelImage;
use js_sys::{Array, Function, Object, Reflect, Uint8Array};
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::geometry::to_js;
use crate::types::JsPixelImage;

/// `PhotoDevice` backed by methods on a JavaScript object.
pub struct JsPhotoDevice {
    host: Object,
    jpeg_quality: u8,
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl JsPhotoDevice {
    pub fn new(host: Object, jpeg_quality: u8) -> Self {
        Self { host, jpeg_quality }
    }

    fn method(&self, name: &str) -> Result<Function, DeviceError> {
        let value = Reflect::get(&self.host, &JsValue::from_str(name))
            .map_err(|e| DeviceError::Failed(describe(&e)))?;
        value
            .dyn_into::<Function>()
            .map_err(|_| DeviceError::Unsupported(format!("host has no {}()", name)))
    }

    fn call(&self, name: &str, args: &[JsValue]) -> Result<JsValue, DeviceError> {
        let func = self.method(name)?;
        let args: Array = args.iter().collect();
        func.apply(&self.host, &args)
            .map_err(|e| DeviceError::Failed(describe(&e)))
    }

    fn bytes_from(value: JsValue, what: &str) -> Result<Vec<u8>, DeviceError> {
        value
            .dyn_into::<Uint8Array>()
            .map(|array| array.to_vec())
            .map_err(|_| DeviceError::Failed(format!("{} did not return a Uint8Array", what)))
    }
}

impl PhotoDevice for JsPhotoDevice {
    fn start_preview(&mut self) -> Result<(), DeviceError> {
        self.call("startPreview", &[]).map(|_| ())
    }

    fn stop_preview(&mut self) {
        if let Err(e) = self.call("stopPreview", &[]) {
            warn!("stopPreview failed: {}", e);
        }
    }

    fn capture_photo(&mut self) -> Result<Vec<u8>, DeviceError> {
        let value = self.call("capturePhoto", &[])?;
        Self::bytes_from(value, "capturePhoto")
    }

    fn pick_from_library(&mut self) -> Result<Option<Vec<u8>>, DeviceError> {
        let value = self.call("pickFromLibrary", &[])?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        Self::bytes_from(value, "pickFromLibrary").map(Some)
    }

    fn save_to_library(&mut self, image: &PixelImage) -> Result<(), DeviceError> {
        let jpeg = encode_jpeg(image, self.jpeg_quality)
            .map_err(|e| DeviceError::Failed(e.to_string()))?;
        let bytes = Uint8Array::from(jpeg.as_slice());
        self.call(
            "saveToLibrary",
            &[
                bytes.into(),
                JsValue::from(image.width),
                JsValue::from(image.height),
            ],
        )
        .map(|_| ())
    }

    fn has_torch(&self) -> bool {
        match self.call("hasTorch", &[]) {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(e) => {
                warn!("hasTorch failed: {}", e);
                false
            }
        }
    }

    fn set_torch(&mut self, on: bool) -> Result<(), DeviceError> {
        self.call("setTorch", &[JsValue::from_bool(on)]).map(|_| ())
    }

    fn set_focus_point(&mut self, point: Point) -> Result<(), DeviceError> {
        self.call("setFocusPoint", &[JsValue::from(point.x), JsValue::from(point.y)])
            .map(|_| ())
    }

    fn switch_camera(&mut self, position: CameraPosition) -> Result<(), DeviceError> {
        self.call("switchCamera", &[JsValue::from_str(position_name(position))])
            .map(|_| ())
    }
}

fn position_name(position: CameraPosition) -> &'static str {
    match position {
        CameraPosition::Back => "back",
        CameraPosition::Front => "front",
    }
}

/// Render-ready view of [`AppState`] without the pixel buffer.
///
/// Use `JsCropSession.current_image()` for the pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StateSnapshot {
    phase: Phase,
    has_image: bool,
    image_width: u32,
    image_height: u32,
    overlay: Option<OverlayGuide>,
    overlay_visible: bool,
    zoom_scale: f64,
    content_offset: Point,
    interaction_enabled: bool,
    preview_visible: bool,
    torch_on: bool,
    focus_indicator: Option<DisplayRect>,
    camera_position: CameraPosition,
}

impl From<&AppState> for StateSnapshot {
    fn from(state: &AppState) -> Self {
        let (image_width, image_height) = state
            .image
            .as_ref()
            .map(|img| (img.width, img.height))
            .unwrap_or((0, 0));
        Self {
            phase: state.phase,
            has_image: state.has_image(),
            image_width,
            image_height,
            overlay: state.overlay,
            overlay_visible: state.overlay_visible,
            zoom_scale: state.zoom_scale,
            content_offset: state.content_offset,
            interaction_enabled: state.interaction_enabled,
            preview_visible: state.preview_visible,
            torch_on: state.torch_on,
            focus_indicator: state.focus_indicator,
            camera_position: state.camera_position,
        }
    }
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One capture-and-crop screen, driven from JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession<JsPhotoDevice>,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session.
    ///
    /// `config` is a partial `SessionConfig` object (`overlaySize`,
    /// `overlayCornerRadius`, `minZoom`, `maxZoom`, `focusIndicatorSize`,
    /// `jpegQuality`); `null` or `undefined` uses the defaults.
    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen(constructor)]
    pub fn new(
        host: Object,
        config: JsValue,
        view_x: f64,
        view_y: f64,
        view_width: f64,
        view_height: f64,
        device_scale: f64,
    ) -> Result<JsCropSession, JsValue> {
        let config: SessionConfig = if config.is_null() || config.is_undefined() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid session config: {}", e)))?
        };
        let device = JsPhotoDevice::new(host, config.jpeg_quality);
        let bounds = DisplayRect::new(view_x, view_y, view_width, view_height);
        CropSession::new(device, config, bounds, device_scale)
            .map(|inner| JsCropSession { inner })
            .map_err(to_js_error)
    }

    /// Current screen state as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&StateSnapshot::from(self.inner.state()))
    }

    /// Copy of the displayed photo, if any.
    pub fn current_image(&self) -> Option<JsPixelImage> {
        self.inner
            .state()
            .image
            .clone()
            .map(JsPixelImage::from_core)
    }

    pub fn set_view_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner
            .set_view_bounds(DisplayRect::new(x, y, width, height));
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.inner.start().map_err(to_js_error)
    }

    pub fn stop(&mut self) {
        self.inner.stop();
    }

    pub fn take_photo(&mut self) -> Result<JsPixelImage, JsValue> {
        self.inner
            .take_photo()
            .map(|img| JsPixelImage::from_core(img.clone()))
            .map_err(to_js_error)
    }

    /// Returns `false` when the picker was cancelled.
    pub fn pick_photo(&mut self) -> Result<bool, JsValue> {
        self.inner.pick_photo().map_err(to_js_error)
    }

    pub fn crop(&mut self) -> Result<JsPixelImage, JsValue> {
        self.inner
            .crop()
            .map(|img| JsPixelImage::from_core(img.clone()))
            .map_err(to_js_error)
    }

    /// Answer the save prompt. Returns `true` when the photo was saved.
    pub fn save(&mut self, confirm: bool) -> Result<bool, JsValue> {
        self.inner
            .save(confirm)
            .map(|outcome| outcome == SaveOutcome::Saved)
            .map_err(to_js_error)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn toggle_torch(&mut self) -> Result<bool, JsValue> {
        self.inner.toggle_torch().map_err(to_js_error)
    }

    pub fn set_zoom(&mut self, scale: f64, offset_x: f64, offset_y: f64) -> bool {
        self.inner.set_zoom(scale, Point::new(offset_x, offset_y))
    }

    /// Returns the normalized focus point as `{ x, y }`.
    pub fn focus_at(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let point = self
            .inner
            .focus_at(Point::new(x, y))
            .map_err(to_js_error)?;
        to_js(&point)
    }

    pub fn end_focus(&mut self) {
        self.inner.end_focus();
    }

    /// Returns `"back"` or `"front"`.
    pub fn switch_camera(&mut self) -> Result<String, JsValue> {
        self.inner
            .switch_camera()
            .map(|position| position_name(position).to_string())
            .map_err(to_js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_without_image() {
        let snapshot = StateSnapshot::from(&AppState::default());
        assert_eq!(snapshot.phase, Phase::Idle);
        assert!(!snapshot.has_image);
        assert_eq!((snapshot.image_width, snapshot.image_height), (0, 0));
        assert!(snapshot.preview_visible);
    }

    #[test]
    fn test_snapshot_reports_image_size() {
        let state = AppState {
            phase: Phase::Captured,
            image: Some(PixelImage::solid(30, 20, 1.0, [0, 0, 0])),
            overlay_visible: true,
            ..Default::default()
        };
        let snapshot = StateSnapshot::from(&state);
        assert!(snapshot.has_image);
        assert_eq!((snapshot.image_width, snapshot.image_height), (30, 20));
        assert!(snapshot.overlay_visible);
    }

    #[test]
    fn test_position_names() {
        assert_eq!(position_name(CameraPosition::Back), "back");
        assert_eq!(position_name(CameraPosition::Front), "front");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn host(script: &str) -> Object {
        Function::new_no_args(script)
            .call0(&JsValue::NULL)
            .unwrap()
            .unchecked_into()
    }

    fn photo_host() -> Object {
        // capturePhoto() hands back a 4x2 white JPEG.
        let img = PixelImage::solid(4, 2, 1.0, [255, 255, 255]);
        let jpeg = encode_jpeg(&img, 95).unwrap();
        let obj = host(
            "return { saved: 0, startPreview() {}, stopPreview() {}, \
             pickFromLibrary() { return null; }, \
             saveToLibrary(b, w, h) { this.saved += 1; }, \
             hasTorch() { return false; }, setTorch(on) {} };",
        );
        let bytes = Uint8Array::from(jpeg.as_slice());
        let capture = Function::new_with_args("", "return this.photo;");
        Reflect::set(&obj, &JsValue::from_str("photo"), &bytes).unwrap();
        Reflect::set(&obj, &JsValue::from_str("capturePhoto"), &capture).unwrap();
        obj
    }

    #[wasm_bindgen_test]
    fn test_capture_crop_save_flow() {
        let obj = photo_host();
        let mut session =
            JsCropSession::new(obj.clone(), JsValue::NULL, 0.0, 0.0, 40.0, 20.0, 1.0).unwrap();
        session.start().unwrap();
        let photo = session.take_photo().unwrap();
        assert_eq!((photo.width(), photo.height()), (4, 2));

        let saved = session.save(true).unwrap();
        assert!(saved);
        let count = Reflect::get(&obj, &JsValue::from_str("saved")).unwrap();
        assert_eq!(count.as_f64(), Some(1.0));
    }

    #[wasm_bindgen_test]
    fn test_cancelled_pick() {
        let mut session =
            JsCropSession::new(photo_host(), JsValue::UNDEFINED, 0.0, 0.0, 40.0, 20.0, 1.0).unwrap();
        assert!(!session.pick_photo().unwrap());
    }

    #[wasm_bindgen_test]
    fn test_missing_focus_method_is_unsupported() {
        let mut session =
            JsCropSession::new(photo_host(), JsValue::NULL, 0.0, 0.0, 40.0, 20.0, 1.0).unwrap();
        let err = session.focus_at(10.0, 10.0).err().unwrap();
        assert!(err.as_string().unwrap().starts_with("Not supported"));
    }

    #[wasm_bindgen_test]
    fn test_call_passes_every_argument() {
        let obj = host("return { count() { return arguments.length; } };");
        let device = JsPhotoDevice::new(obj, 90);
        let args = [
            JsValue::from(1),
            JsValue::from(2),
            JsValue::from(3),
            JsValue::from(4),
        ];
        let result = device.call("count", &args).unwrap();
        assert_eq!(result.as_f64(), Some(4.0));
    }

    #[wasm_bindgen_test]
    fn test_torch_unavailable() {
        let mut session =
            JsCropSession::new(photo_host(), JsValue::NULL, 0.0, 0.0, 40.0, 20.0, 1.0).unwrap();
        assert!(session.toggle_torch().is_err());
    }
}
