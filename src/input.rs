use crate::camera::OrbitCamera;
use crate::constants::{ORNAMENT_PICK_PADDING, STAR_PICK_RADIUS};
use crate::core::animate::TreeRig;
use crate::core::interaction::PickTarget;
use glam::{Vec2, Vec3};
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct MouseState {
    /// Pointer in normalized device coordinates (x right, y up).
    pub ndc: Vec2,
    pub inside: bool,
    pub down: bool,
}

/// Pointer-down bookkeeping used to tell a click from an orbit drag.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub last_css: Vec2,
    pub travel_px: f32,
}

impl DragState {
    pub fn begin(&mut self, css: Vec2) {
        self.active = true;
        self.last_css = css;
        self.travel_px = 0.0;
    }

    /// Record a move and return the delta since the last one.
    pub fn step(&mut self, css: Vec2) -> Vec2 {
        let d = css - self.last_css;
        self.last_css = css;
        self.travel_px += d.length();
        d
    }

    pub fn is_click(&self, max_travel_px: f32) -> bool {
        self.travel_px < max_travel_px
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Nearest pickable object hit by the ray, if any.
///
/// Only the closest hit is returned, so an ornament in front of the star
/// hides the star from the pointer.
pub fn pick_nearest(
    ray_origin: Vec3,
    ray_dir: Vec3,
    spheres: impl IntoIterator<Item = (PickTarget, Vec3, f32)>,
) -> Option<PickTarget> {
    let mut best = None::<(PickTarget, f32)>;
    for (target, center, radius) in spheres {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((target, t)),
            }
        }
    }
    best.map(|(target, _)| target)
}

/// World-space pick spheres for the star and every mounted ornament.
pub fn pick_spheres(rig: &TreeRig) -> Vec<(PickTarget, Vec3, f32)> {
    let group = rig.group_matrix();
    let mut out = Vec::with_capacity(rig.ornaments.len() + 1);
    if let Some(node) = rig.star.node {
        out.push((
            PickTarget::Star,
            group.transform_point3(node.position),
            STAR_PICK_RADIUS,
        ));
    }
    for (i, o) in rig.ornaments.iter().enumerate() {
        if let Some(node) = o.node {
            out.push((
                PickTarget::Ornament(i),
                group.transform_point3(node.position),
                o.data.size + ORNAMENT_PICK_PADDING,
            ));
        }
    }
    out
}

/// The object under the pointer at `ndc` on a `width` x `height` canvas.
pub fn pick_at(
    camera: &OrbitCamera,
    rig: &TreeRig,
    ndc: Vec2,
    width: u32,
    height: u32,
) -> Option<PickTarget> {
    let (ro, rd) = camera.ndc_to_world_ray(ndc.x, ndc.y, width, height);
    pick_nearest(ro, rd, pick_spheres(rig))
}

/// CSS pixel offset inside a `width` x `height` box to NDC.
#[inline]
pub fn css_to_ndc(x_css: f32, y_css: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let u = (x_css / width).clamp(0.0, 1.0);
    let v = (y_css / height).clamp(0.0, 1.0);
    Vec2::new(u * 2.0 - 1.0, 1.0 - v * 2.0)
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

#[inline]
pub fn pointer_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let css = pointer_css(ev, canvas);
    css_to_ndc(css.x, css.y, rect.width() as f32, rect.height() as f32)
}
