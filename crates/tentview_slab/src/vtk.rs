//! Legacy VTK export of tent hypersurfaces
//!
//! Space-time is four dimensional, so each tent element is written twice as a
//! spatial tetrahedron: once for the bottom front and once for the top front.
//! The time of each corner goes into the `time` point array. Points are not
//! shared between cells because the same spatial vertex has different times
//! on different fronts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SlabResult;
use crate::slab::TentSlab;
use crate::tent::TentSurface;

/// VTK cell type id for a linear tetrahedron
const VTK_TETRA: u8 = 10;

struct Cell {
    tent: usize,
    level: usize,
    element: usize,
    surface: TentSurface,
}

/// Write the given tents as a legacy ASCII unstructured grid
///
/// Fails with `TentOutOfRange` before writing anything if an index is
/// invalid.
pub fn write_tents<W: Write>(slab: &TentSlab, indices: &[usize], mut out: W) -> SlabResult<()> {
    let mut cells = Vec::new();
    for &index in indices {
        let tent = slab.tent(index)?;
        for &element in &tent.els {
            for surface in [TentSurface::Bottom, TentSurface::Top] {
                cells.push(Cell {
                    tent: index,
                    level: tent.level,
                    element,
                    surface,
                });
            }
        }
    }

    let mesh = slab.mesh();
    let point_count = 4 * cells.len();

    writeln!(out, "# vtk DataFile Version 3.0")?;
    writeln!(out, "Tent pitched slab: {} tents", indices.len())?;
    writeln!(out, "ASCII")?;
    writeln!(out, "DATASET UNSTRUCTURED_GRID")?;

    writeln!(out, "POINTS {} double", point_count)?;
    for cell in &cells {
        for v in mesh.element(cell.element).indices {
            let p = mesh.point(v);
            writeln!(out, "{} {} {}", p.x, p.y, p.z)?;
        }
    }

    writeln!(out, "CELLS {} {}", cells.len(), 5 * cells.len())?;
    for i in 0..cells.len() {
        let base = 4 * i;
        writeln!(out, "4 {} {} {} {}", base, base + 1, base + 2, base + 3)?;
    }

    writeln!(out, "CELL_TYPES {}", cells.len())?;
    for _ in &cells {
        writeln!(out, "{}", VTK_TETRA)?;
    }

    writeln!(out, "POINT_DATA {}", point_count)?;
    writeln!(out, "SCALARS time double 1")?;
    writeln!(out, "LOOKUP_TABLE default")?;
    for cell in &cells {
        let tent = slab.tent(cell.tent)?;
        for t in tent.element_times(mesh, cell.element, cell.surface) {
            writeln!(out, "{}", t)?;
        }
    }

    writeln!(out, "CELL_DATA {}", cells.len())?;
    write_cell_scalars(&mut out, "tent", cells.iter().map(|c| c.tent))?;
    write_cell_scalars(&mut out, "level", cells.iter().map(|c| c.level))?;
    write_cell_scalars(
        &mut out,
        "surface",
        cells.iter().map(|c| match c.surface {
            TentSurface::Bottom => 0,
            TentSurface::Top => 1,
        }),
    )?;

    out.flush()?;
    Ok(())
}

fn write_cell_scalars<W: Write>(
    out: &mut W,
    name: &str,
    values: impl Iterator<Item = usize>,
) -> SlabResult<()> {
    writeln!(out, "SCALARS {} int 1", name)?;
    writeln!(out, "LOOKUP_TABLE default")?;
    for value in values {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

/// Write every tent of the slab to a file
pub fn write_slab(slab: &TentSlab, path: impl AsRef<Path>) -> SlabResult<()> {
    let path = path.as_ref();
    let indices: Vec<usize> = (0..slab.tent_count()).collect();
    let file = File::create(path)?;
    write_tents(slab, &indices, BufWriter::new(file))?;
    log::info!("Wrote {} tents to {}", indices.len(), path.display());
    Ok(())
}
