//! Orbit controller for tent inspection
//!
//! Controls:
//! - W/S or scroll wheel: move the slice time up/down
//! - A/D: orbit left/right
//! - Q/E: zoom in/out
//! - R: reset view
//! - Left mouse drag: orbit
//! - Right mouse drag: zoom

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Orbit controller for handling input
pub struct OrbitController {
    // Key state
    slice_up: bool,
    slice_down: bool,
    orbit_left: bool,
    orbit_right: bool,
    zoom_in: bool,
    zoom_out: bool,

    reset_pressed: bool,

    // Mouse state
    rotate_drag: bool,
    zoom_drag: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
    pending_scroll: f32,

    // Input smoothing state
    smooth_yaw: f32,
    smooth_pitch: f32,

    // Configuration
    pub rotate_sensitivity: f32,
    pub key_orbit_speed: f32,
    pub zoom_speed: f32,
    pub slice_speed: f32,
    pub scroll_step: f32,
    pub smoothing_half_life: f32,
    pub smoothing_enabled: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            slice_up: false,
            slice_down: false,
            orbit_left: false,
            orbit_right: false,
            zoom_in: false,
            zoom_out: false,

            reset_pressed: false,

            rotate_drag: false,
            zoom_drag: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            pending_scroll: 0.0,

            smooth_yaw: 0.0,
            smooth_pitch: 0.0,

            rotate_sensitivity: 0.005,
            key_orbit_speed: 1.5,
            zoom_speed: 1.0,
            slice_speed: 0.2,
            scroll_step: 0.02,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is handled by the controller.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => { self.slice_up = pressed; true }
            KeyCode::KeyS | KeyCode::ArrowDown => { self.slice_down = pressed; true }
            KeyCode::KeyA | KeyCode::ArrowLeft => { self.orbit_left = pressed; true }
            KeyCode::KeyD | KeyCode::ArrowRight => { self.orbit_right = pressed; true }
            KeyCode::KeyQ => { self.zoom_in = pressed; true }
            KeyCode::KeyE => { self.zoom_out = pressed; true }
            KeyCode::KeyR => {
                if pressed {
                    self.reset_pressed = true;
                }
                true
            }
            _ => false,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;

        match button {
            MouseButton::Left => self.rotate_drag = pressed,
            MouseButton::Right => self.zoom_drag = pressed,
            _ => {}
        }
    }

    /// Process mouse movement
    ///
    /// Motion only counts while a button is held.
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        if self.rotate_drag {
            self.pending_yaw += delta_x as f32;
            self.pending_pitch += delta_y as f32;
        } else if self.zoom_drag {
            self.pending_zoom += delta_y as f32 * self.rotate_sensitivity;
        }
    }

    /// Process scroll wheel input in lines
    pub fn process_scroll(&mut self, lines: f32) {
        self.pending_scroll += lines;
    }

    /// Apply accumulated input to the camera
    ///
    /// Returns true if the slice time was asked to move.
    pub fn update<C: OrbitControl>(&mut self, camera: &mut C, dt: f32) -> bool {
        if self.reset_pressed {
            self.reset_pressed = false;
            camera.reset();
        }

        let orbit = (self.orbit_right as i32 - self.orbit_left as i32) as f32;
        let zoom = (self.zoom_out as i32 - self.zoom_in as i32) as f32;
        let slice = (self.slice_up as i32 - self.slice_down as i32) as f32;

        camera.orbit(orbit * self.key_orbit_speed * dt, 0.0);
        camera.zoom(zoom * self.zoom_speed * dt + self.pending_zoom);

        // Exponential smoothing: factor = 2^(-dt / half_life)
        let (yaw_input, pitch_input) = if self.smoothing_enabled && dt > 0.0 {
            let smooth_factor = 2.0f32.powf(-dt / self.smoothing_half_life);
            self.smooth_yaw = self.smooth_yaw * smooth_factor + self.pending_yaw * (1.0 - smooth_factor);
            self.smooth_pitch = self.smooth_pitch * smooth_factor + self.pending_pitch * (1.0 - smooth_factor);
            (self.smooth_yaw, self.smooth_pitch)
        } else {
            (self.pending_yaw, self.pending_pitch)
        };

        // Dragging right turns the view right, dragging down tilts it down
        camera.orbit(
            yaw_input * self.rotate_sensitivity,
            pitch_input * self.rotate_sensitivity,
        );

        let slice_delta = slice * self.slice_speed * dt + self.pending_scroll * self.scroll_step;
        if slice_delta != 0.0 {
            camera.advance_slice(slice_delta);
        }

        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_zoom = 0.0;
        self.pending_scroll = 0.0;

        slice_delta != 0.0
    }

    /// Toggle input smoothing on/off
    pub fn toggle_smoothing(&mut self) -> bool {
        self.smoothing_enabled = !self.smoothing_enabled;
        self.smooth_yaw = 0.0;
        self.smooth_pitch = 0.0;
        self.smoothing_enabled
    }

    /// Check if smoothing is enabled
    pub fn is_smoothing_enabled(&self) -> bool {
        self.smoothing_enabled
    }

    /// Builder: set mouse rotation sensitivity
    pub fn with_rotate_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotate_sensitivity = sensitivity;
        self
    }

    /// Builder: set zoom speed
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set slice speed (time units per second)
    pub fn with_slice_speed(mut self, speed: f32) -> Self {
        self.slice_speed = speed;
        self
    }

    /// Builder: set smoothing half-life (lower = more responsive)
    pub fn with_smoothing_half_life(mut self, half_life: f32) -> Self {
        self.smoothing_half_life = half_life;
        self
    }

    /// Builder: enable or disable smoothing
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait OrbitControl {
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32);
    fn zoom(&mut self, delta: f32);
    fn advance_slice(&mut self, delta: f32);
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCamera {
        yaw: f32,
        pitch: f32,
        zoom: f32,
        slice: f32,
        resets: usize,
    }

    impl OrbitControl for RecordingCamera {
        fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
            self.yaw += delta_yaw;
            self.pitch += delta_pitch;
        }
        fn zoom(&mut self, delta: f32) {
            self.zoom += delta;
        }
        fn advance_slice(&mut self, delta: f32) {
            self.slice += delta;
        }
        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    #[test]
    fn test_key_state() {
        let mut controller = OrbitController::new();
        assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
        assert!(controller.slice_up);
        controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
        assert!(!controller.slice_up);
        assert!(!controller.process_keyboard(KeyCode::KeyZ, ElementState::Pressed));
    }

    #[test]
    fn test_slice_keys_move_slice() {
        let mut controller = OrbitController::new().with_slice_speed(1.0);
        let mut camera = RecordingCamera::default();
        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(controller.update(&mut camera, 0.5));
        assert!((camera.slice - 0.5).abs() < 1e-6);

        controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
        controller.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        controller.update(&mut camera, 0.25);
        assert!((camera.slice - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_is_consumed_once() {
        let mut controller = OrbitController::new();
        let mut camera = RecordingCamera::default();
        controller.process_scroll(2.0);
        assert!(controller.update(&mut camera, 0.016));
        assert!((camera.slice - 2.0 * controller.scroll_step).abs() < 1e-6);
        assert!(!controller.update(&mut camera, 0.016));
    }

    #[test]
    fn test_mouse_motion_requires_drag() {
        let mut controller = OrbitController::new();
        let mut camera = RecordingCamera::default();
        controller.process_mouse_motion(100.0, 0.0);
        controller.update(&mut camera, 0.016);
        assert_eq!(camera.yaw, 0.0);

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(100.0, 50.0);
        controller.update(&mut camera, 0.016);
        assert!((camera.yaw - 100.0 * controller.rotate_sensitivity).abs() < 1e-6);
        assert!((camera.pitch - 50.0 * controller.rotate_sensitivity).abs() < 1e-6);
    }

    #[test]
    fn test_right_drag_zooms() {
        let mut controller = OrbitController::new();
        let mut camera = RecordingCamera::default();
        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        controller.process_mouse_motion(0.0, 40.0);
        controller.update(&mut camera, 0.016);
        assert!(camera.zoom > 0.0);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_reset_fires_once() {
        let mut controller = OrbitController::new();
        let mut camera = RecordingCamera::default();
        controller.process_keyboard(KeyCode::KeyR, ElementState::Pressed);
        controller.update(&mut camera, 0.016);
        controller.update(&mut camera, 0.016);
        assert_eq!(camera.resets, 1);
    }

    #[test]
    fn test_smoothing_toggle() {
        let mut controller = OrbitController::new();
        assert!(!controller.is_smoothing_enabled());
        assert!(controller.toggle_smoothing());
        assert!(controller.is_smoothing_enabled());

        // Smoothed input lags behind the raw drag
        let mut camera = RecordingCamera::default();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(100.0, 0.0);
        controller.update(&mut camera, 0.016);
        assert!(camera.yaw > 0.0);
        assert!(camera.yaw < 100.0 * controller.rotate_sensitivity);

        assert!(!controller.toggle_smoothing());
    }
}
