use crate::camera::OrbitCamera;
use crate::core::{FrameInput, SceneConfig, StarToggle, TreeRig};
use crate::input;
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub rig: Rc<RefCell<TreeRig>>,
    pub star: Rc<RefCell<StarToggle>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub mouse: Rc<RefCell<input::MouseState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub started: Instant,
    pub lost_frames: u32,
}

impl<'a> FrameContext<'a> {
    /// Advance the rig to the current clock and draw it.
    pub fn frame(&mut self) {
        let t = self.started.elapsed().as_secs_f32();
        // last known position; leaving the canvas does not recentre it
        let pointer = self.mouse.borrow().ndc;
        let star_active = self.star.borrow().active;
        let input = FrameInput {
            t,
            pointer,
            star_active,
        };
        self.rig.borrow_mut().animate(&input);

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        let camera = self.camera.borrow();
        let rig = self.rig.borrow();
        match g.render(&camera, &rig, star_active) {
            Ok(()) => self.lost_frames = 0,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.lost_frames += 1;
                if self.lost_frames == 1 {
                    log::warn!("[frame] surface lost or outdated; reconfiguring");
                }
                g.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    config: SceneConfig,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, config).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// The running `requestAnimationFrame` chain.
pub struct FrameLoop {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Cancel the queued frame and release the frame closure.
    pub fn stop(self) {
        if let (Some(w), Some(id)) = (web::window(), self.pending.take()) {
            _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Tick, pending: &Cell<Option<i32>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        pending.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &pending_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &pending);
    FrameLoop { tick, pending }
}
