//! Tent viewer
//!
//! Pitches a slab of tents over the unit cube and shows the tents the user
//! asks for.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use tentview::{AppConfig, AppError, AppResult, Backend, SessionEnd, SessionSummary, SlabCanvas, TentViewer};
use tentview_mesh::Mesh;
use tentview_render::{TentRenderer, VtkRenderer, WindowRenderer};
use tentview_slab::{vtk, TentSlab};

fn main() -> ExitCode {
    let config = AppConfig::load();
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting tent viewer");

    match config.map_err(AppError::from).and_then(run) {
        Ok(summary) => {
            log::info!(
                "Session ended ({:?}) after {} prompts, {} tents drawn",
                summary.end,
                summary.prompts,
                summary.drawn.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: AppConfig) -> AppResult<SessionSummary> {
    config.validate()?;

    println!("creating tent pitched slab");
    let mesh = Mesh::unit_cube(config.mesh.maxh)?;
    log::info!(
        "Mesh has {} vertices and {} elements",
        mesh.vertex_count(),
        mesh.element_count()
    );
    let slab = TentSlab::pitch_with(Arc::new(mesh), config.slab.params())?;
    println!("The slab has {} tents.", slab.tent_count());

    if let Some(path) = &config.viewer.slab_vtk {
        vtk::write_slab(&slab, path)?;
    }

    match config.viewer.backend {
        Backend::Window => session(slab, WindowRenderer::new(config.to_view_settings())?),
        Backend::Vtk => session(slab, VtkRenderer::new(&config.viewer.output_dir)),
    }
}

fn session<R: TentRenderer>(slab: TentSlab, renderer: R) -> AppResult<SessionSummary> {
    let mut viewer = TentViewer::new(SlabCanvas::new(slab, renderer));
    let summary = viewer.run(io::stdin().lock(), io::stdout())?;
    if summary.end == SessionEnd::EndOfInput {
        // The last prompt has no newline
        println!();
    }
    Ok(summary)
}
