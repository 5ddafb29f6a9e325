use crate::core::interaction::{Cursor, CursorSink};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> Option<Listener> {
    let el = document.get_element_by_id(element_id)?;
    Listener::new(el.as_ref(), "click", move |_ev| handler())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Document base URI (honours `<base href>`), falling back to the root.
pub fn base_uri(document: &web::Document) -> String {
    document
        .base_uri()
        .ok()
        .flatten()
        .unwrap_or_else(|| "/".to_string())
}

/// An event listener that is removed when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| log::error!("[dom] add {} listener failed: {:?}", event, e))
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Listener whose handler takes a concrete event type; events of any
    /// other type are ignored.
    pub fn typed<E: JsCast + 'static>(
        target: &web::EventTarget,
        event: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> Option<Self> {
        Self::new(target, event, move |ev| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// The document body's cursor style.
#[derive(Clone)]
pub struct BodyCursor {
    document: web::Document,
}

impl BodyCursor {
    pub fn new(document: &web::Document) -> Self {
        Self {
            document: document.clone(),
        }
    }
}

impl CursorSink for BodyCursor {
    fn set_cursor(&self, cursor: Cursor) {
        if let Some(body) = self.document.body() {
            _ = body.style().set_property("cursor", cursor.css());
        }
    }
}

pub fn set_text(document: &web::Document, selector: &str, text: &str) {
    if let Ok(Some(el)) = document.query_selector(selector) {
        el.set_text_content(Some(text));
    }
}
