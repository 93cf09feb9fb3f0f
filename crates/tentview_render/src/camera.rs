//! Orbit camera with a slice time
//!
//! The camera circles a target point at a given distance. It also carries
//! the time of the hyperplane the tent is cut with, clamped to the tent's
//! time range.

use tentview_input::OrbitControl;

use crate::pipeline::{look_at_matrix, perspective_matrix};

/// Smallest allowed orbit distance as a fraction of the initial one
const MIN_DISTANCE_FRACTION: f32 = 0.1;

/// Camera orbiting a tent
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub target: [f32; 3],
    /// Distance from the target
    pub distance: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    yaw: f32,
    pitch: f32,
    slice_time: f32,
    time_range: (f32, f32),

    // Reset state
    home_distance: f32,
    home_slice: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Create a camera looking at the origin
    pub fn new() -> Self {
        Self {
            target: [0.0; 3],
            distance: 3.0,
            fov: 45.0,
            near: 0.01,
            far: 100.0,
            yaw: 0.6,
            pitch: 0.4,
            slice_time: 0.0,
            time_range: (0.0, 0.0),
            home_distance: 3.0,
            home_slice: 0.0,
        }
    }

    /// Aim at a bounding sphere from `distance` radii away
    pub fn frame(&mut self, center: [f32; 3], radius: f32, distance: f32) {
        self.target = center;
        self.distance = radius.max(1e-3) * distance;
        self.home_distance = self.distance;
    }

    /// Set the time range and start the slice at `start`
    pub fn set_time_range(&mut self, min: f32, max: f32, start: f32) {
        self.time_range = (min, max.max(min));
        self.slice_time = start.clamp(self.time_range.0, self.time_range.1);
        self.home_slice = self.slice_time;
    }

    /// Time of the slicing hyperplane
    pub fn slice_time(&self) -> f32 {
        self.slice_time
    }

    /// Lowest and highest slice time
    pub fn time_range(&self) -> (f32, f32) {
        self.time_range
    }

    /// Move the slice time, staying inside the time range
    pub fn adjust_slice_time(&mut self, delta: f32) {
        self.slice_time = (self.slice_time + delta).clamp(self.time_range.0, self.time_range.1);
    }

    /// Camera position
    pub fn eye(&self) -> [f32; 3] {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        [
            self.target[0] + self.distance * cp * sy,
            self.target[1] + self.distance * sp,
            self.target[2] + self.distance * cp * cy,
        ]
    }

    /// World to camera transform
    pub fn view_matrix(&self) -> [[f32; 4]; 4] {
        look_at_matrix(self.eye(), self.target, [0.0, 1.0, 0.0])
    }

    /// Camera to clip transform
    pub fn projection_matrix(&self, aspect: f32) -> [[f32; 4]; 4] {
        perspective_matrix(self.fov.to_radians(), aspect, self.near, self.far)
    }

    /// Rotate around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw -= delta_yaw;
        // Stay clear of the poles where the up vector degenerates
        self.pitch = (self.pitch + delta_pitch).clamp(-1.5, 1.5);
    }

    /// Move towards (negative) or away from (positive) the target
    pub fn zoom(&mut self, delta: f32) {
        let min = self.home_distance * MIN_DISTANCE_FRACTION;
        self.distance = (self.distance * (1.0 + delta)).max(min);
    }

    /// Restore the framing and slice time
    pub fn reset(&mut self) {
        let fresh = Self::new();
        self.yaw = fresh.yaw;
        self.pitch = fresh.pitch;
        self.distance = self.home_distance;
        self.slice_time = self.home_slice;
    }
}

impl OrbitControl for OrbitCamera {
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        OrbitCamera::orbit(self, delta_yaw, delta_pitch);
    }

    fn zoom(&mut self, delta: f32) {
        OrbitCamera::zoom(self, delta);
    }

    fn advance_slice(&mut self, delta: f32) {
        self.adjust_slice_time(delta);
    }

    fn reset(&mut self) {
        OrbitCamera::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
        ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
    }

    #[test]
    fn test_eye_at_distance() {
        let mut cam = OrbitCamera::new();
        cam.frame([0.5, 0.5, 0.5], 0.25, 4.0);
        assert!((distance(cam.eye(), cam.target) - 1.0).abs() < 1e-5);
        cam.orbit(0.7, -0.3);
        assert!((distance(cam.eye(), cam.target) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_slice_time_clamped() {
        let mut cam = OrbitCamera::new();
        cam.set_time_range(0.1, 0.3, 0.2);
        assert_eq!(cam.slice_time(), 0.2);
        cam.adjust_slice_time(1.0);
        assert_eq!(cam.slice_time(), 0.3);
        cam.adjust_slice_time(-1.0);
        assert_eq!(cam.slice_time(), 0.1);
    }

    #[test]
    fn test_start_outside_range() {
        let mut cam = OrbitCamera::new();
        cam.set_time_range(0.0, 0.5, 2.0);
        assert_eq!(cam.slice_time(), 0.5);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut cam = OrbitCamera::new();
        cam.orbit(0.0, 10.0);
        let eye = cam.eye();
        // Still strictly below the pole
        assert!(eye[1] < cam.target[1] + cam.distance);
    }

    #[test]
    fn test_zoom_has_floor() {
        let mut cam = OrbitCamera::new();
        cam.frame([0.0; 3], 1.0, 3.0);
        for _ in 0..100 {
            cam.zoom(-0.5);
        }
        assert!((cam.distance - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_reset_restores_view() {
        let mut cam = OrbitCamera::new();
        cam.frame([0.0; 3], 1.0, 3.0);
        cam.set_time_range(0.0, 1.0, 0.5);
        let eye = cam.eye();

        cam.orbit(1.0, 0.5);
        cam.zoom(0.5);
        cam.adjust_slice_time(0.3);
        OrbitControl::reset(&mut cam);

        assert_eq!(cam.slice_time(), 0.5);
        assert!(distance(cam.eye(), eye) < 1e-6);
    }

    #[test]
    fn test_view_matrix_centers_target() {
        let mut cam = OrbitCamera::new();
        cam.frame([1.0, 2.0, 3.0], 1.0, 2.0);
        let view = cam.view_matrix();
        // Column-major: target maps to (0, 0, -distance)
        let t = cam.target;
        let z = view[0][2] * t[0] + view[1][2] * t[1] + view[2][2] * t[2] + view[3][2];
        assert!((z + cam.distance).abs() < 1e-4);
    }
}
