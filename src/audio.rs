use crate::constants::{MUSIC_BUTTON_ID, MUSIC_TRACK};
use crate::core::{AudioCommand, AudioController, Commands, PlayOrigin, PlaybackError};
use crate::dom;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// The single looping background track plus its state machine.
pub struct BackgroundMusic {
    element: web::HtmlAudioElement,
    controller: AudioController,
    gesture_listeners: Vec<dom::Listener>,
    document: web::Document,
}

pub type SharedMusic = Rc<RefCell<BackgroundMusic>>;

pub fn create(document: &web::Document) -> anyhow::Result<SharedMusic> {
    // resolved by the browser so sub-path deployments and <base href> work
    let url = web::Url::new_with_base(MUSIC_TRACK, &dom::base_uri(document))
        .map_err(|e| anyhow::anyhow!("track url: {:?}", e))?
        .href();
    let element = web::HtmlAudioElement::new_with_src(&url)
        .map_err(|e| anyhow::anyhow!("audio element: {:?}", e))?;
    element.set_loop(true);
    element.set_preload("auto");
    log::info!("[audio] track {}", url);
    Ok(Rc::new(RefCell::new(BackgroundMusic {
        element,
        controller: AudioController::new(),
        gesture_listeners: Vec::new(),
        document: document.clone(),
    })))
}

pub fn mount(music: &SharedMusic) {
    let cmds = music.borrow_mut().controller.mount();
    run(music, cmds);
}

pub fn toggle(music: &SharedMusic) {
    let cmds = music.borrow_mut().controller.toggle();
    run(music, cmds);
}

pub fn teardown(music: &SharedMusic) {
    let cmds = music.borrow_mut().controller.teardown();
    run(music, cmds);
}

fn user_gesture(music: &SharedMusic) {
    let cmds = music.borrow_mut().controller.user_gesture();
    run(music, cmds);
}

pub fn wire_toggle_button(music: &SharedMusic) -> Option<dom::Listener> {
    let doc = music.borrow().document.clone();
    let music_click = Rc::downgrade(music);
    refresh_button(music);
    dom::add_click_listener(&doc, MUSIC_BUTTON_ID, move || {
        if let Some(music) = music_click.upgrade() {
            toggle(&music);
        }
    })
}

fn run(music: &SharedMusic, cmds: Commands) {
    for cmd in cmds {
        match cmd {
            AudioCommand::Play(origin) => start_playback(music, origin),
            AudioCommand::Pause => {
                _ = music.borrow().element.pause();
                log::info!("[audio] paused");
            }
            AudioCommand::ArmGestureListener => arm_gesture_listener(music),
            AudioCommand::DisarmGestureListener => {
                music.borrow_mut().gesture_listeners.clear();
            }
        }
    }
    refresh_button(music);
}

fn start_playback(music: &SharedMusic, origin: PlayOrigin) {
    let promise = music.borrow().element.play();
    let music = music.clone();
    spawn_local(async move {
        let result = match promise {
            Ok(p) => JsFuture::from(p).await.map(|_| ()).map_err(playback_error),
            Err(e) => Err(playback_error(e)),
        };
        let next = music
            .borrow_mut()
            .controller
            .playback_resolved(origin, result);
        run(&music, next);
    });
}

fn arm_gesture_listener(music: &SharedMusic) {
    let doc = music.borrow().document.clone();
    let target: &web::EventTarget = doc.as_ref();
    let listeners: Vec<dom::Listener> = ["pointerdown", "keydown"]
        .into_iter()
        .filter_map(|event| {
            let weak: Weak<RefCell<BackgroundMusic>> = Rc::downgrade(music);
            dom::Listener::new(target, event, move |_ev| {
                if let Some(music) = weak.upgrade() {
                    user_gesture(&music);
                }
            })
        })
        .collect();
    music.borrow_mut().gesture_listeners = listeners;
}

fn playback_error(err: JsValue) -> PlaybackError {
    let field = |key: &str| {
        js_sys::Reflect::get(&err, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    };
    let name = field("name");
    let message = field("message");
    if name.is_empty() && message.is_empty() {
        return PlaybackError::Other(format!("{:?}", err));
    }
    PlaybackError::from_dom_name(&name, &message)
}

fn refresh_button(music: &SharedMusic) {
    let m = music.borrow();
    let playing = m.controller.is_playing();
    if let Some(el) = m.document.get_element_by_id(MUSIC_BUTTON_ID) {
        el.set_text_content(Some(if playing { "♪ Music on" } else { "♪ Music off" }));
        _ = el.set_attribute("aria-pressed", if playing { "true" } else { "false" });
    }
}
