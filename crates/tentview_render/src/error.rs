//! Rendering error types.

use std::io;

use tentview_slab::SlabError;
use thiserror::Error;

/// Errors that can occur while drawing or showing a tent.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Failed to create a window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// Surface has no usable texture format.
    #[error("surface configuration failed")]
    SurfaceConfigurationFailed,

    /// Acquiring a frame failed beyond recovery.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    /// IO error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The slab could not provide the tent.
    #[error(transparent)]
    Slab(#[from] SlabError),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
