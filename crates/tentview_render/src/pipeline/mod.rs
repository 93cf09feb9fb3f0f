//! Rendering pipeline components
//!
//! This module contains the slicing tables and the render pipeline for
//! tent cross-sections.

pub mod lookup_tables;
pub mod types;
pub mod render_pipeline;

pub use lookup_tables::{EDGES, EDGE_TABLE, case_index, crossed_edges, edge_count};

pub use types::{Vertex3D, RenderUniforms, TRIANGLE_VERTEX_COUNT};

pub use render_pipeline::{RenderPipeline, perspective_matrix, look_at_matrix};
