//! Tent rendering
//!
//! This crate draws single tents of a [`TentSlab`](tentview_slab::TentSlab).
//! A tent lives in space-time, so it is shown as its 3D cross-section at a
//! slice time the user can move.
//!
//! ## Key Components
//!
//! - [`TentRenderer`] / [`Visualization`] - seams used by the viewer loop
//! - [`tent_geometry::TentGeometry`] - 4-simplices of one tent
//! - [`slicer`] - CPU cross-sections of those simplices at `t = s`
//! - [`WindowRenderer`] - wgpu/winit window per tent
//! - [`VtkRenderer`] - legacy VTK file per tent
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::RenderPipeline`] - 3D rendering with lighting

pub mod camera;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod slicer;
pub mod tent_geometry;
mod visualization;
mod vtk_renderer;
mod window;

pub use error::{RenderError, RenderResult};
pub use visualization::{TentRenderer, Visualization};
pub use vtk_renderer::{VtkRenderer, VtkSnapshot};
pub use window::{TentWindow, ViewSettings, WindowRenderer};
