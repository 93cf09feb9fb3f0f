//! Tent viewer input handling
//!
//! This crate maps keyboard and mouse input to orbit camera motion and
//! slice-time changes.

mod orbit_controller;

pub use orbit_controller::{OrbitControl, OrbitController};
