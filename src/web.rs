//! Browser host: binds an [`EngineCore`] to the chart's container element.
//!
//! DOM mouse and touch events are normalized here into [`PointerInput`] using
//! the container's bounding box, so nothing below this module knows which
//! device produced an event.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Element, HtmlAnchorElement, MouseEvent, TouchEvent, Url};

use crate::config::AppConfig;
use crate::consts::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use crate::engine::{Action, EngineCore};
use crate::input::{ContainerRect, PointerInput, PointerPhase};
use crate::roster::StudentId;

/// Error raised by browser calls.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no browser window or document available")]
    NoDocument,
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("failed to serialize roster: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// The chart engine bound to its DOM container.
pub struct ChartHost {
    container: Element,
    pub core: EngineCore,
}

impl ChartHost {
    #[must_use]
    pub fn new(container: Element, config: AppConfig) -> Self {
        Self { container, core: EngineCore::with_config(config) }
    }

    fn rect(&self) -> ContainerRect {
        let bounds = self.container.get_bounding_client_rect();
        ContainerRect::new(bounds.left(), bounds.top())
    }

    fn mouse_input(ev: &MouseEvent, phase: PointerPhase) -> PointerInput {
        PointerInput::new(f64::from(ev.client_x()), f64::from(ev.client_y()), phase)
    }

    /// First touch point of the event. `changedTouches` is used because
    /// `touches` is already empty on `touchend`.
    fn touch_input(ev: &TouchEvent, phase: PointerPhase) -> Option<PointerInput> {
        let touch = ev.changed_touches().get(0)?;
        Some(PointerInput::new(f64::from(touch.client_x()), f64::from(touch.client_y()), phase))
    }

    fn dispatch(&mut self, student_id: Option<StudentId>, input: PointerInput) -> Vec<Action> {
        let rect = self.rect();
        match (input.phase, student_id) {
            (PointerPhase::Start, Some(id)) => self.core.on_pointer_down(id, input.client, rect),
            _ => self.core.handle_pointer(input, rect),
        }
    }

    // --- Mouse ---

    pub fn on_mouse_down(&mut self, student_id: StudentId, ev: &MouseEvent) -> Vec<Action> {
        ev.prevent_default();
        self.dispatch(Some(student_id), Self::mouse_input(ev, PointerPhase::Start))
    }

    pub fn on_mouse_move(&mut self, ev: &MouseEvent) -> Vec<Action> {
        self.dispatch(None, Self::mouse_input(ev, PointerPhase::Move))
    }

    pub fn on_mouse_up(&mut self, ev: &MouseEvent) -> Vec<Action> {
        self.dispatch(None, Self::mouse_input(ev, PointerPhase::End))
    }

    pub fn on_mouse_leave(&mut self, ev: &MouseEvent) -> Vec<Action> {
        self.dispatch(None, Self::mouse_input(ev, PointerPhase::Cancel))
    }

    // --- Touch ---

    pub fn on_touch_start(&mut self, student_id: StudentId, ev: &TouchEvent) -> Vec<Action> {
        ev.prevent_default();
        match Self::touch_input(ev, PointerPhase::Start) {
            Some(input) => self.dispatch(Some(student_id), input),
            None => Vec::new(),
        }
    }

    pub fn on_touch_move(&mut self, ev: &TouchEvent) -> Vec<Action> {
        if self.core.drag.is_dragging() {
            ev.prevent_default();
        }
        match Self::touch_input(ev, PointerPhase::Move) {
            Some(input) => self.dispatch(None, input),
            None => Vec::new(),
        }
    }

    pub fn on_touch_end(&mut self, _ev: &TouchEvent) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_touch_cancel(&mut self, _ev: &TouchEvent) -> Vec<Action> {
        self.core.on_pointer_cancel()
    }

    // --- Data ---

    /// Import CSV text delivered by the host's file reader.
    pub fn import_csv(&mut self, text: &str) -> Vec<Action> {
        self.core.import_csv(text)
    }

    /// Render rows as JSON for the host's chart and table.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Serialize`] if serialization fails.
    pub fn students_json(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string(&self.core.snapshot())?)
    }

    /// Offer the current roster to the user as a CSV download.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the document is unavailable or a DOM call fails.
    pub fn download_export(&self) -> Result<(), HostError> {
        let document = web_sys::window().and_then(|w| w.document()).ok_or(HostError::NoDocument)?;

        let parts = js_sys::Array::of1(&JsValue::from_str(&self.core.export_csv()));
        let options = BlobPropertyBag::new();
        options.set_type(EXPORT_MIME_TYPE);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
        let href = Url::create_object_url_with_blob(&blob)?;

        let link: HtmlAnchorElement = document
            .create_element("a")?
            .dyn_into()
            .map_err(|el: Element| HostError::Js(format!("expected anchor, got <{}>", el.tag_name())))?;
        link.set_href(&href);
        link.set_download(EXPORT_FILE_NAME);
        link.click();

        if let Err(e) = Url::revoke_object_url(&href) {
            tracing::warn!(error = ?e, "failed to revoke export object URL");
        }
        Ok(())
    }
}
