//! Renderer seams
//!
//! A [`TentRenderer`] turns one tent of a slab into a [`Visualization`]. The
//! viewer shows that visualization and closes it before the next one is
//! created, so at most one is alive at a time.

use tentview_slab::TentSlab;

use crate::error::RenderResult;

/// A drawn tent that can be displayed and released
pub trait Visualization {
    /// Display the visualization
    ///
    /// Interactive implementations block until the user dismisses the view.
    fn show(&mut self) -> RenderResult<()>;

    /// Release the visualization and everything it holds
    fn close(self)
    where
        Self: Sized,
    {
    }
}

/// Produces visualizations of single tents
pub trait TentRenderer {
    type Surface: Visualization;

    /// Draw tent `index` of `slab`
    ///
    /// Fails if the index is not a tent of the slab.
    fn render_tent(&mut self, slab: &TentSlab, index: usize) -> RenderResult<Self::Surface>;
}
