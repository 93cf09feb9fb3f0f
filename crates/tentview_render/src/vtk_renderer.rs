//! File renderer for environments without a display
//!
//! Each tent is written as a legacy VTK file that can be opened in ParaView
//! or VisIt.

use std::fs;
use std::path::{Path, PathBuf};

use tentview_slab::{vtk, TentSlab};

use crate::error::RenderResult;
use crate::visualization::{TentRenderer, Visualization};

/// Renderer that writes `<output_dir>/tent_<index>.vtk`
#[derive(Clone, Debug)]
pub struct VtkRenderer {
    output_dir: PathBuf,
}

impl VtkRenderer {
    /// Create a renderer writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory the snapshots are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl TentRenderer for VtkRenderer {
    type Surface = VtkSnapshot;

    fn render_tent(&mut self, slab: &TentSlab, index: usize) -> RenderResult<VtkSnapshot> {
        let mut contents = Vec::new();
        vtk::write_tents(slab, &[index], &mut contents)?;
        Ok(VtkSnapshot {
            path: self.output_dir.join(format!("tent_{}.vtk", index)),
            contents,
        })
    }
}

/// One rendered tent, written to disk when shown
#[derive(Debug)]
pub struct VtkSnapshot {
    path: PathBuf,
    contents: Vec<u8>,
}

impl VtkSnapshot {
    /// File the snapshot is written to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Visualization for VtkSnapshot {
    fn show(&mut self) -> RenderResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, &self.contents)?;
        log::info!("Wrote {}", self.path.display());
        Ok(())
    }

    fn close(self) {
        log::debug!("Released {}", self.path.display());
    }
}
