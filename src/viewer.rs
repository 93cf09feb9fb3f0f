//! The tent selection loop
//!
//! [`TentViewer`] reads one line per prompt. `q` ends the session, anything
//! that is not an integer is skipped, and a valid tent index is drawn and
//! shown. The previous surface is closed at the start of every iteration, so
//! at most one is open at a time.

use std::io::{BufRead, Write};
use std::num::IntErrorKind;

use tentview_render::{RenderError, TentRenderer, Visualization};
use tentview_slab::TentSlab;

/// Errors that end a session
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// The entered index is not a tent of the slab
    #[error("tent index {index} is out of range 0:{count}")]
    TentOutOfRange { index: i64, count: usize },

    #[error("failed to read input or write the prompt: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to draw tent: {0}")]
    Render(#[from] RenderError),
}

/// Something that can draw the tents of one slab
pub trait TentCanvas {
    type Surface: Visualization;

    /// Number of drawable tents
    fn tent_count(&self) -> usize;

    /// Draw tent `index`, which is below [`TentCanvas::tent_count`]
    fn draw_tent(&mut self, index: usize) -> Result<Self::Surface, RenderError>;
}

/// Canvas drawing the tents of a pitched slab with a renderer
pub struct SlabCanvas<R: TentRenderer> {
    slab: TentSlab,
    renderer: R,
}

impl<R: TentRenderer> SlabCanvas<R> {
    pub fn new(slab: TentSlab, renderer: R) -> Self {
        Self { slab, renderer }
    }
}

impl<R: TentRenderer> TentCanvas for SlabCanvas<R> {
    type Surface = R::Surface;

    fn tent_count(&self) -> usize {
        self.slab.tent_count()
    }

    fn draw_tent(&mut self, index: usize) -> Result<R::Surface, RenderError> {
        self.renderer.render_tent(&self.slab, index)
    }
}

/// The single open surface of a session
///
/// Closes whatever it holds when released and when dropped.
struct SurfaceSlot<S: Visualization> {
    current: Option<S>,
}

impl<S: Visualization> SurfaceSlot<S> {
    fn empty() -> Self {
        Self { current: None }
    }

    fn release(&mut self) {
        if let Some(surface) = self.current.take() {
            surface.close();
        }
    }

    /// Hold `surface` and show it
    fn show(&mut self, surface: S) -> Result<(), RenderError> {
        self.release();
        self.current.insert(surface).show()
    }
}

impl<S: Visualization> Drop for SurfaceSlot<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user entered `q`
    Quit,
    /// Input ran out
    EndOfInput,
}

/// What happened during a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub prompts: usize,
    /// Indices drawn, in order
    pub drawn: Vec<usize>,
    /// Lines that were neither `q` nor an integer
    pub skipped: usize,
    pub end: SessionEnd,
}

/// What one input line asks for
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Tent(i64),
    Skip,
}

/// Only a bare `q` or `Q` quits; integers may be padded with whitespace.
/// Integers beyond `i64` saturate so they still fail the range check.
fn parse_command(line: &str) -> Command {
    if line.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("q") {
        return Command::Quit;
    }
    match line.trim().parse::<i64>() {
        Ok(index) => Command::Tent(index),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Command::Tent(i64::MAX),
            IntErrorKind::NegOverflow => Command::Tent(i64::MIN),
            _ => Command::Skip,
        },
    }
}

/// Prompt loop over a [`TentCanvas`]
pub struct TentViewer<C: TentCanvas> {
    canvas: C,
}

impl<C: TentCanvas> TentViewer<C> {
    pub fn new(canvas: C) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Run the loop until `q`, end of input, or a fatal error
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<SessionSummary, ViewerError> {
        let count = self.canvas.tent_count();
        let mut slot = SurfaceSlot::empty();
        let mut summary = SessionSummary {
            prompts: 0,
            drawn: Vec::new(),
            skipped: 0,
            end: SessionEnd::EndOfInput,
        };
        let mut line = String::new();

        loop {
            slot.release();

            write!(output, "Enter a tent number in 0:{} or q to quit: ", count)?;
            output.flush()?;
            summary.prompts += 1;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                log::debug!("End of input");
                summary.end = SessionEnd::EndOfInput;
                break;
            }

            let index = match parse_command(&line) {
                Command::Quit => {
                    summary.end = SessionEnd::Quit;
                    break;
                }
                Command::Skip => {
                    log::debug!("Ignoring input {:?}", line.trim());
                    summary.skipped += 1;
                    continue;
                }
                Command::Tent(index) => index,
            };

            let index = usize::try_from(index)
                .ok()
                .filter(|&i| i < count)
                .ok_or(ViewerError::TentOutOfRange { index, count })?;

            log::info!("Drawing tent {}", index);
            let surface = self.canvas.draw_tent(index)?;
            slot.show(surface)?;
            summary.drawn.push(index);
        }

        Ok(summary)
    }
}
