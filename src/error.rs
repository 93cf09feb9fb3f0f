//! Errors that end the viewer process

use tentview_mesh::MeshError;
use tentview_render::RenderError;
use tentview_slab::SlabError;

use crate::config::ConfigError;
use crate::viewer::ViewerError;

/// Any fatal error of a viewer run
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("mesh generation failed: {0}")]
    Mesh(#[from] MeshError),

    #[error("tent pitching failed: {0}")]
    Slab(#[from] SlabError),

    #[error("renderer failed: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for viewer runs
pub type AppResult<T> = Result<T, AppError>;
