//! Interactive window renderer
//!
//! One winit event loop serves the whole process. Each [`TentWindow`] opens
//! its own window when shown, runs the loop until that window is closed,
//! and drops the window together with its GPU state before returning.
//!
//! Controls inside the window:
//! - Escape or the close button: return to the prompt
//! - G: toggle mouse smoothing
//! - see [`tentview_input::OrbitController`] for camera and slice keys

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use tentview_input::OrbitController;
use tentview_slab::TentSlab;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    platform::run_on_demand::EventLoopExtRunOnDemand,
    window::{Window, WindowId},
};

use crate::camera::OrbitCamera;
use crate::context::RenderContext;
use crate::error::{RenderError, RenderResult};
use crate::pipeline::{RenderPipeline, RenderUniforms, TRIANGLE_VERTEX_COUNT};
use crate::slicer::slice_geometry;
use crate::tent_geometry::TentGeometry;
use crate::visualization::{TentRenderer, Visualization};

/// Window, camera, lighting and input settings
#[derive(Clone, Debug)]
pub struct ViewSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera distance in tent radii
    pub distance: f32,
    pub background_color: [f32; 4],
    pub light_dir: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    pub time_color_strength: f32,
    pub rotate_sensitivity: f32,
    pub zoom_speed: f32,
    pub slice_speed: f32,
    pub smoothing_half_life: f32,
    pub smoothing_enabled: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            title: "Tent viewer".to_string(),
            width: 1024,
            height: 768,
            fov: 45.0,
            near: 0.01,
            far: 100.0,
            distance: 3.0,
            background_color: [0.05, 0.05, 0.08, 1.0],
            light_dir: [0.5, 1.0, 0.3],
            ambient_strength: 0.3,
            diffuse_strength: 0.7,
            time_color_strength: 0.4,
            rotate_sensitivity: 0.005,
            zoom_speed: 1.0,
            slice_speed: 0.2,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }
}

/// Renderer that shows each tent in its own window
pub struct WindowRenderer {
    event_loop: Rc<RefCell<EventLoop<()>>>,
    settings: Rc<ViewSettings>,
}

impl WindowRenderer {
    /// Create the process event loop
    ///
    /// Fails when no display is available or an event loop already exists.
    pub fn new(settings: ViewSettings) -> RenderResult<Self> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        Ok(Self {
            event_loop: Rc::new(RefCell::new(event_loop)),
            settings: Rc::new(settings),
        })
    }
}

impl TentRenderer for WindowRenderer {
    type Surface = TentWindow;

    fn render_tent(&mut self, slab: &TentSlab, index: usize) -> RenderResult<TentWindow> {
        let geometry = TentGeometry::from_tent(slab, index)?;
        Ok(TentWindow {
            event_loop: Rc::clone(&self.event_loop),
            settings: Rc::clone(&self.settings),
            geometry,
        })
    }
}

/// A tent ready to be shown in a window
pub struct TentWindow {
    event_loop: Rc<RefCell<EventLoop<()>>>,
    settings: Rc<ViewSettings>,
    geometry: TentGeometry,
}

impl TentWindow {
    /// The geometry this window shows
    pub fn geometry(&self) -> &TentGeometry {
        &self.geometry
    }
}

impl Visualization for TentWindow {
    fn show(&mut self) -> RenderResult<()> {
        let mut app = TentApp::new(&self.geometry, &self.settings);
        self.event_loop.borrow_mut().run_app_on_demand(&mut app)?;
        app.finish()
    }

    fn close(self) {
        log::debug!("Closed window for tent {}", self.geometry.tent_index);
    }
}

/// GPU resources of an open window
struct GpuState {
    context: RenderContext,
    pipeline: RenderPipeline,
}

/// Event handler for one shown tent
struct TentApp<'a> {
    geometry: &'a TentGeometry,
    settings: &'a ViewSettings,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    camera: OrbitCamera,
    controller: OrbitController,
    last_frame: Instant,
    /// Slice time of the uploaded section
    resliced_at: Option<f32>,
    triangle_count: usize,
    error: Option<RenderError>,
}

impl<'a> TentApp<'a> {
    fn new(geometry: &'a TentGeometry, settings: &'a ViewSettings) -> Self {
        let mut camera = OrbitCamera::new();
        camera.fov = settings.fov;
        camera.near = settings.near;
        camera.far = settings.far;
        let (center, radius) = geometry.bounding_sphere();
        camera.frame(center, radius, settings.distance);
        let (tmin, tmax) = geometry.time_range();
        camera.set_time_range(tmin, tmax, geometry.pole_midpoint());

        let controller = OrbitController::new()
            .with_rotate_sensitivity(settings.rotate_sensitivity)
            .with_zoom_speed(settings.zoom_speed)
            .with_slice_speed(settings.slice_speed * (tmax - tmin).max(1e-3))
            .with_smoothing_half_life(settings.smoothing_half_life)
            .with_smoothing(settings.smoothing_enabled);

        Self {
            geometry,
            settings,
            window: None,
            gpu: None,
            camera,
            controller,
            last_frame: Instant::now(),
            resliced_at: None,
            triangle_count: 0,
            error: None,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> RenderResult<()> {
        let window_attributes = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.width,
                self.settings.height,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let context = pollster::block_on(RenderContext::new(window.clone()))?;
        let mut pipeline = RenderPipeline::new(&context.device, context.config.format);
        pipeline.ensure_depth_texture(&context.device, context.size.width, context.size.height);

        log::info!(
            "Showing tent {} ({} simplices); Escape or close the window to continue",
            self.geometry.tent_index,
            self.geometry.simplex_count()
        );

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(GpuState { context, pipeline });
        self.last_frame = Instant::now();
        Ok(())
    }

    /// Drop the window and GPU state and leave the event loop
    fn close_window(&mut self, event_loop: &ActiveEventLoop) {
        self.gpu = None;
        self.window = None;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RenderError) {
        log::error!("Tent window failed: {}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.close_window(event_loop);
    }

    fn finish(self) -> RenderResult<()> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn redraw(&mut self) -> RenderResult<()> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(1.0 / 30.0);
        self.last_frame = now;

        self.controller.update(&mut self.camera, dt);

        let (Some(gpu), Some(window)) = (self.gpu.as_mut(), self.window.as_ref()) else {
            return Ok(());
        };

        let slice = self.camera.slice_time();
        if self.resliced_at != Some(slice) {
            let section = slice_geometry(self.geometry, slice);
            self.triangle_count = section.len() / TRIANGLE_VERTEX_COUNT;
            gpu.pipeline.upload_section(&gpu.context.device, &section);
            self.resliced_at = Some(slice);

            window.set_title(&format!(
                "{} - tent {} - t = {:.4} ({} triangles)",
                self.settings.title, self.geometry.tent_index, slice, self.triangle_count
            ));
        }

        let (time_min, time_max) = self.camera.time_range();
        let uniforms = RenderUniforms {
            view_matrix: self.camera.view_matrix(),
            projection_matrix: self.camera.projection_matrix(gpu.context.aspect_ratio()),
            light_dir: self.settings.light_dir,
            ambient_strength: self.settings.ambient_strength,
            diffuse_strength: self.settings.diffuse_strength,
            time_color_strength: self.settings.time_color_strength,
            time_min,
            time_max,
            ..RenderUniforms::default()
        };
        gpu.pipeline.update_uniforms(&gpu.context.queue, &uniforms);

        let output = match gpu.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = gpu.context.size;
                gpu.context.resize(size);
                window.request_redraw();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                window.request_redraw();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu.context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        let bg = self.settings.background_color;
        gpu.pipeline.render(
            &mut encoder,
            &view,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );

        gpu.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for TentApp<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.open(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_window(event_loop);
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(physical_size);
                    let size = gpu.context.size;
                    gpu.pipeline.ensure_depth_texture(&gpu.context.device, size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if event.state == ElementState::Pressed {
                        match key {
                            KeyCode::Escape => {
                                self.close_window(event_loop);
                                return;
                            }
                            KeyCode::KeyG => {
                                let enabled = self.controller.toggle_smoothing();
                                log::info!("Input smoothing: {}", if enabled { "ON" } else { "OFF" });
                            }
                            _ => {}
                        }
                    }
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.controller.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }
}
