use crate::constants::{ORBIT_MIN_POLAR, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED};
use crate::core::scene::{CameraConfig, OrbitLimits};
use glam::{Mat4, Vec3, Vec4};

/// Orbit camera around a fixed target. Panning is not supported; distance
/// and polar angle are clamped to the configured limits.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Angle from the +Y axis.
    pub polar: f32,
    /// Angle around +Y, measured from +Z toward +X.
    pub azimuth: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    limits: OrbitLimits,
}

impl OrbitCamera {
    pub fn new(camera: &CameraConfig, limits: &OrbitLimits) -> Self {
        let target = Vec3::from_array(limits.target);
        let offset = Vec3::from_array(camera.eye) - target;
        let distance = offset.length().max(1e-3);
        let mut cam = Self {
            target,
            distance,
            polar: (offset.y / distance).clamp(-1.0, 1.0).acos(),
            azimuth: offset.x.atan2(offset.z),
            fovy_radians: camera.fov_deg.to_radians(),
            znear: camera.znear,
            zfar: camera.zfar,
            limits: *limits,
        };
        cam.clamp();
        cam
    }

    fn clamp(&mut self) {
        self.distance = self
            .distance
            .clamp(self.limits.min_distance, self.limits.max_distance);
        self.polar = self.polar.clamp(ORBIT_MIN_POLAR, self.limits.max_polar);
    }

    /// Rotate by a pointer drag in CSS pixels.
    pub fn orbit_by_drag(&mut self, dx_px: f32, dy_px: f32) {
        self.azimuth -= dx_px * ORBIT_ROTATE_SPEED;
        self.polar -= dy_px * ORBIT_ROTATE_SPEED;
        self.clamp();
    }

    /// Zoom by a wheel delta (positive moves away).
    pub fn zoom_by_wheel(&mut self, delta_y: f32) {
        self.distance *= 1.0 + delta_y * ORBIT_ZOOM_SPEED;
        self.clamp();
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.polar.sin();
        self.target
            + Vec3::new(
                s * self.azimuth.sin(),
                self.polar.cos(),
                s * self.azimuth.cos(),
            ) * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect, self.znear, self.zfar)
    }

    pub fn view_proj(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space ray through a point given in normalized device coordinates.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn ndc_to_world_ray(&self, ndc_x: f32, ndc_y: f32, width: u32, height: u32) -> (Vec3, Vec3) {
        let inv = self.view_proj(width, height).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye();
        let rd = (p1 - ro).normalize();
        (ro, rd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneConfig;

    #[test]
    fn initial_eye_matches_config() {
        let cfg = SceneConfig::christmas();
        let cam = OrbitCamera::new(&cfg.camera, &cfg.orbit);
        assert!((cam.eye() - Vec3::from_array(cfg.camera.eye)).length() < 1e-4);
    }

    #[test]
    fn centre_ray_points_at_target() {
        let cfg = SceneConfig::christmas();
        let cam = OrbitCamera::new(&cfg.camera, &cfg.orbit);
        let (ro, rd) = cam.ndc_to_world_ray(0.0, 0.0, 800, 600);
        let to_target = (cam.target - ro).normalize();
        assert!(rd.dot(to_target) > 0.9999);
    }
}
