use crate::camera::OrbitCamera;
use crate::constants::CLICK_MAX_TRAVEL_PX;
use crate::core::{apply_hover, HoverTracker, PickTarget, StarToggle, TreeRig};
use crate::dom::{BodyCursor, Listener};
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub rig: Rc<RefCell<TreeRig>>,
    pub star: Rc<RefCell<StarToggle>>,
    pub hover: Rc<RefCell<HoverTracker<BodyCursor>>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub mouse_state: Rc<RefCell<input::MouseState>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

/// Register the canvas pointer and wheel handlers. The returned listeners
/// stay registered for as long as they are held.
pub fn wire_input_handlers(w: InputWiring) -> Vec<Listener> {
    [
        wire_pointermove(&w),
        wire_pointerdown(&w),
        wire_pointerup(&w),
        wire_pointerleave(&w),
        wire_wheel(&w),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn update_hover(w: &InputWiring) {
    let ndc = w.mouse_state.borrow().ndc;
    let target = input::pick_at(
        &w.camera.borrow(),
        &w.rig.borrow(),
        ndc,
        w.canvas.width(),
        w.canvas.height(),
    );
    let change = w.hover.borrow_mut().update(target);
    if !change.is_empty() {
        apply_hover(&mut w.rig.borrow_mut(), change);
    }
}

fn wire_pointermove(w: &InputWiring) -> Option<Listener> {
    let w = w.clone();
    let target = w.canvas.clone();
    Listener::typed(target.as_ref(), "pointermove", move |ev: web::PointerEvent| {
        {
            let mut ms = w.mouse_state.borrow_mut();
            ms.ndc = input::pointer_ndc(&ev, &w.canvas);
            ms.inside = true;
        }

        let dragging = w.drag_state.borrow().active;
        if dragging {
            let css = input::pointer_css(&ev, &w.canvas);
            let (delta, is_click) = {
                let mut ds = w.drag_state.borrow_mut();
                let d = ds.step(css);
                (d, ds.is_click(CLICK_MAX_TRAVEL_PX))
            };
            if !is_click {
                w.camera.borrow_mut().orbit_by_drag(delta.x, delta.y);
            }
        }
        update_hover(&w);
    })
}

fn wire_pointerdown(w: &InputWiring) -> Option<Listener> {
    let w = w.clone();
    let target = w.canvas.clone();
    Listener::typed(target.as_ref(), "pointerdown", move |ev: web::PointerEvent| {
        // a touch tap has no preceding move, so pick at the press position
        {
            let mut ms = w.mouse_state.borrow_mut();
            ms.ndc = input::pointer_ndc(&ev, &w.canvas);
            ms.inside = true;
            ms.down = true;
        }
        update_hover(&w);
        let css = input::pointer_css(&ev, &w.canvas);
        w.drag_state.borrow_mut().begin(css);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    })
}

fn wire_pointerup(w: &InputWiring) -> Option<Listener> {
    let w = w.clone();
    let window = web::window()?;
    Listener::typed(window.as_ref(), "pointerup", move |ev: web::PointerEvent| {
        let was_click = {
            let mut ds = w.drag_state.borrow_mut();
            let click = ds.active && ds.is_click(CLICK_MAX_TRAVEL_PX);
            ds.active = false;
            click
        };
        if was_click && w.hover.borrow().hovered() == Some(PickTarget::Star) {
            let active = w.star.borrow_mut().toggle();
            log::info!("[pointer] star active={}", active);
        }
        w.mouse_state.borrow_mut().down = false;
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
    })
}

fn wire_pointerleave(w: &InputWiring) -> Option<Listener> {
    let w = w.clone();
    let target = w.canvas.clone();
    Listener::typed(target.as_ref(), "pointerleave", move |_ev: web::PointerEvent| {
        w.mouse_state.borrow_mut().inside = false;
        let change = w.hover.borrow_mut().clear();
        apply_hover(&mut w.rig.borrow_mut(), change);
    })
}

fn wire_wheel(w: &InputWiring) -> Option<Listener> {
    let w = w.clone();
    let target = w.canvas.clone();
    Listener::typed(target.as_ref(), "wheel", move |ev: web::WheelEvent| {
        w.camera.borrow_mut().zoom_by_wheel(ev.delta_y() as f32);
        ev.prevent_default();
    })
}
