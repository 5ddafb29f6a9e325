#![cfg(target_arch = "wasm32")]
use crate::core::{HoverTracker, SceneConfig, SceneLayout, StarToggle, TreeRig};
use instant::Instant;
use rand::{rngs::StdRng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) -> Option<dom::Listener> {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let window = web::window()?;
    dom::Listener::new(window.as_ref(), "resize", move |_ev| {
        dom::sync_canvas_backing_size(&canvas_resize);
    })
}

/// Everything the scene registered with the page. Dropping the listeners
/// unregisters them.
struct Mounted {
    listeners: Vec<dom::Listener>,
    music: audio::SharedMusic,
    hover: Rc<RefCell<HoverTracker<dom::BodyCursor>>>,
    rig: Rc<RefCell<TreeRig>>,
    frame_loop: Option<frame::FrameLoop>,
}

impl Mounted {
    fn teardown(self) {
        drop(self.listeners);
        if let Some(frame_loop) = self.frame_loop {
            frame_loop.stop();
        }
        audio::teardown(&self.music);
        let change = self.hover.borrow_mut().clear();
        crate::core::apply_hover(&mut self.rig.borrow_mut(), change);
        log::info!("[app] teardown");
    }
}

type MountSlot = Rc<RefCell<Option<Mounted>>>;

/// Tear the scene down when the page goes away. A page restored from the
/// back/forward cache is reloaded so it mounts fresh.
fn wire_teardown(slot: MountSlot) {
    let Some(window) = web::window() else {
        return;
    };
    let on_hide = Closure::wrap(Box::new(move || {
        let mounted = slot.borrow_mut().take();
        if let Some(mounted) = mounted {
            mounted.teardown();
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();

    let on_show = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if ev.persisted() {
            if let Some(w) = web::window() {
                _ = w.location().reload();
            }
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
    on_show.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-greeting starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let mut listeners = Vec::new();
    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    listeners.extend(wire_canvas_resize(&canvas));

    // Random layout is drawn once per page load
    let config = SceneConfig::christmas();
    let layout = SceneLayout::generate(&mut StdRng::from_entropy());
    log::info!(
        "[app] layout: {} snowflakes, {} ornaments, {} sparkles",
        layout.snowflakes.len(),
        layout.ornaments.len(),
        layout.sparkles.len()
    );

    overlay::build_snow(&document, &layout.snowflakes)?;
    overlay::fill_hud(&document, &config.hud);

    let mut rig = TreeRig::new(&config, &layout);
    rig.mount(&config);
    let rig = Rc::new(RefCell::new(rig));
    let star = Rc::new(RefCell::new(StarToggle::default()));
    let camera = Rc::new(RefCell::new(camera::OrbitCamera::new(
        &config.camera,
        &config.orbit,
    )));
    let hover = Rc::new(RefCell::new(HoverTracker::new(dom::BodyCursor::new(
        &document,
    ))));
    let mouse_state = Rc::new(RefCell::new(input::MouseState::default()));
    let drag_state = Rc::new(RefCell::new(input::DragState::default()));

    // Music: button, autoplay attempt, keyboard shortcut
    let music = audio::create(&document)?;
    listeners.extend(audio::wire_toggle_button(&music));
    audio::mount(&music);
    listeners.extend(events::wire_global_keydown(music.clone(), document.clone()));

    listeners.extend(events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        rig: rig.clone(),
        star: star.clone(),
        hover: hover.clone(),
        camera: camera.clone(),
        mouse_state: mouse_state.clone(),
        drag_state,
    }));
    let slot: MountSlot = Rc::new(RefCell::new(Some(Mounted {
        listeners,
        music,
        hover,
        rig: rig.clone(),
        frame_loop: None,
    })));
    wire_teardown(slot.clone());

    let gpu = frame::init_gpu(&canvas, config).await;
    if gpu.is_none() {
        log::warn!("[app] no renderer; overlay and music only");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        rig,
        star,
        camera,
        mouse: mouse_state,
        canvas,
        gpu,
        started: Instant::now(),
        lost_frames: 0,
    }));
    // the page may have been hidden while the adapter was requested
    if let Some(mounted) = slot.borrow_mut().as_mut() {
        mounted.frame_loop = Some(frame::start_loop(frame_ctx));
    }
    Ok(())
}
