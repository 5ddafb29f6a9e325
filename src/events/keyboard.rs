use crate::audio::{self, SharedMusic};
use crate::core::{action_for_key, KeyAction};
use crate::dom::Listener;
use crate::overlay;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, music: &SharedMusic, document: &web::Document) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    match action_for_key(&ev.key()) {
        Some(KeyAction::ToggleMusic) => {
            audio::toggle(music);
            ev.prevent_default();
        }
        Some(KeyAction::ToggleHud) => {
            overlay::toggle(document);
            ev.prevent_default();
        }
        None => {}
    }
}

pub fn wire_global_keydown(music: SharedMusic, document: web::Document) -> Option<Listener> {
    let window = web::window()?;
    Listener::typed(window.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &music, &document);
    })
}
