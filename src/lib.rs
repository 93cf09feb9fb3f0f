//! Interactive viewer for tent-pitched space-time slabs
//!
//! The binary builds a tetrahedral mesh of the unit cube, pitches a slab of
//! tents over it and then lets the user pick tents to look at:
//!
//! - [`config`] - layered configuration (`config/*.toml` and `TENTS_*`)
//! - [`viewer`] - the prompt loop, generic over a [`viewer::TentCanvas`]
//! - [`error`] - the process-level error type

pub mod config;
pub mod error;
pub mod viewer;

pub use config::{AppConfig, Backend, ConfigError};
pub use error::{AppError, AppResult};
pub use viewer::{SessionEnd, SessionSummary, SlabCanvas, TentCanvas, TentViewer, ViewerError};
