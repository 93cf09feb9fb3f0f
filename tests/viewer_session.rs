//! Integration tests for the tent selection loop
//!
//! The loop is driven with in-memory input against a canvas that records
//! every draw, show and close.

use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;
use std::sync::Arc;

use tentview::{SessionEnd, SlabCanvas, TentCanvas, TentViewer, ViewerError};
use tentview_mesh::Mesh;
use tentview_render::{RenderError, Visualization, VtkRenderer};
use tentview_slab::TentSlab;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Draw(usize),
    Show(usize),
    Close(usize),
}

type Log = Rc<RefCell<Vec<Event>>>;

struct RecordingCanvas {
    count: usize,
    log: Log,
}

struct RecordingSurface {
    index: usize,
    log: Log,
}

impl Visualization for RecordingSurface {
    fn show(&mut self) -> Result<(), RenderError> {
        self.log.borrow_mut().push(Event::Show(self.index));
        Ok(())
    }

    fn close(self) {
        self.log.borrow_mut().push(Event::Close(self.index));
    }
}

impl TentCanvas for RecordingCanvas {
    type Surface = RecordingSurface;

    fn tent_count(&self) -> usize {
        self.count
    }

    fn draw_tent(&mut self, index: usize) -> Result<RecordingSurface, RenderError> {
        self.log.borrow_mut().push(Event::Draw(index));
        Ok(RecordingSurface {
            index,
            log: Rc::clone(&self.log),
        })
    }
}

fn viewer(count: usize) -> (TentViewer<RecordingCanvas>, Log) {
    let log = Log::default();
    let canvas = RecordingCanvas {
        count,
        log: Rc::clone(&log),
    };
    (TentViewer::new(canvas), log)
}

fn input(lines: &[&str]) -> Cursor<String> {
    let mut text = lines.join("\n");
    text.push('\n');
    Cursor::new(text)
}

fn prompt(count: usize) -> String {
    format!("Enter a tent number in 0:{} or q to quit: ", count)
}

#[test]
fn test_garbage_reprompts_without_drawing() {
    let (mut viewer, log) = viewer(12);
    let mut out = Vec::new();
    let summary = viewer.run(input(&["", "abc", "3.5", "--", "q"]), &mut out).unwrap();

    assert!(log.borrow().is_empty());
    assert_eq!(summary.prompts, 5);
    assert_eq!(summary.skipped, 4);
    assert_eq!(String::from_utf8(out).unwrap(), prompt(12).repeat(5));
}

#[test]
fn test_quit_after_one_prompt() {
    for quit in ["q", "Q"] {
        let (mut viewer, log) = viewer(12);
        let mut out = Vec::new();
        let summary = viewer.run(input(&[quit, "0"]), &mut out).unwrap();

        assert_eq!(summary.end, SessionEnd::Quit);
        assert_eq!(summary.prompts, 1);
        assert!(log.borrow().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), prompt(12));
    }
}

#[test]
fn test_padded_q_reprompts() {
    let (mut viewer, log) = viewer(12);
    let mut out = Vec::new();
    let summary = viewer.run(input(&["  q  ", "q"]), &mut out).unwrap();

    assert_eq!(summary.end, SessionEnd::Quit);
    assert_eq!(summary.prompts, 2);
    assert_eq!(summary.skipped, 1);
    assert!(log.borrow().is_empty());
    assert_eq!(String::from_utf8(out).unwrap(), prompt(12).repeat(2));
}

#[test]
fn test_end_of_input_ends_cleanly() {
    let (mut viewer, log) = viewer(3);
    let summary = viewer.run(Cursor::new("1\n"), Vec::new()).unwrap();

    assert_eq!(summary.end, SessionEnd::EndOfInput);
    assert_eq!(summary.drawn, vec![1]);
    assert_eq!(summary.prompts, 2);
    // The last surface is released when the session ends
    assert_eq!(*log.borrow(), vec![Event::Draw(1), Event::Show(1), Event::Close(1)]);
}

#[test]
fn test_previous_surface_closed_before_next_draw() {
    let (mut viewer, log) = viewer(12);
    let summary = viewer.run(input(&["0", "abc", "11", "q"]), Vec::new()).unwrap();

    assert_eq!(summary.drawn, vec![0, 11]);
    assert_eq!(summary.end, SessionEnd::Quit);
    assert_eq!(
        *log.borrow(),
        vec![
            Event::Draw(0),
            Event::Show(0),
            Event::Close(0),
            Event::Draw(11),
            Event::Show(11),
            Event::Close(11),
        ]
    );
}

#[test]
fn test_same_index_twice_gives_two_cycles() {
    let (mut viewer, log) = viewer(12);
    let summary = viewer.run(input(&["3", "3", "q"]), Vec::new()).unwrap();

    assert_eq!(summary.drawn, vec![3, 3]);
    assert_eq!(
        *log.borrow(),
        vec![
            Event::Draw(3),
            Event::Show(3),
            Event::Close(3),
            Event::Draw(3),
            Event::Show(3),
            Event::Close(3),
        ]
    );
}

#[test]
fn test_index_equal_to_count_is_fatal() {
    let (mut viewer, log) = viewer(12);
    let err = viewer.run(input(&["12", "q"]), Vec::new()).unwrap_err();

    assert!(matches!(err, ViewerError::TentOutOfRange { index: 12, count: 12 }));
    assert_eq!(err.to_string(), "tent index 12 is out of range 0:12");
    assert!(log.borrow().is_empty());
}

#[test]
fn test_index_beyond_i64_is_fatal() {
    let (mut positive, log) = viewer(12);
    let err = positive.run(input(&["99999999999999999999", "q"]), Vec::new()).unwrap_err();
    assert!(matches!(err, ViewerError::TentOutOfRange { index: i64::MAX, count: 12 }));
    assert!(log.borrow().is_empty());

    let (mut negative, log) = viewer(12);
    let err = negative.run(input(&["-99999999999999999999"]), Vec::new()).unwrap_err();
    assert!(matches!(err, ViewerError::TentOutOfRange { index: i64::MIN, count: 12 }));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_negative_index_is_fatal() {
    let (mut viewer, log) = viewer(12);
    let err = viewer.run(input(&["-1"]), Vec::new()).unwrap_err();

    assert!(matches!(err, ViewerError::TentOutOfRange { index: -1, count: 12 }));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_open_surface_closed_on_error() {
    let (mut viewer, log) = viewer(4);
    let result = viewer.run(input(&["2", "9"]), Vec::new());

    assert!(result.is_err());
    assert_eq!(*log.borrow(), vec![Event::Draw(2), Event::Show(2), Event::Close(2)]);
}

#[test]
fn test_empty_canvas_rejects_everything() {
    let (mut viewer, log) = viewer(0);
    let mut out = Vec::new();
    let err = viewer.run(input(&["0"]), &mut out).unwrap_err();

    assert!(matches!(err, ViewerError::TentOutOfRange { index: 0, count: 0 }));
    assert_eq!(String::from_utf8(out).unwrap(), prompt(0));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_slab_canvas_writes_vtk_files() {
    let mesh = Arc::new(Mesh::unit_cube(0.5).unwrap());
    let slab = TentSlab::pitch(mesh, 0.25, 1.0).unwrap();
    let count = slab.tent_count();
    assert!(count > 2);

    let dir = std::env::temp_dir().join(format!("tentview_session_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut viewer = TentViewer::new(SlabCanvas::new(slab, VtkRenderer::new(&dir)));
    assert_eq!(viewer.canvas().tent_count(), count);
    let last = (count - 1).to_string();
    let summary = viewer.run(input(&["0", last.as_str(), "q"]), Vec::new()).unwrap();

    assert_eq!(summary.drawn, vec![0, count - 1]);
    assert!(dir.join("tent_0.vtk").exists());
    assert!(dir.join(format!("tent_{}.vtk", count - 1)).exists());

    std::fs::remove_dir_all(&dir).unwrap();
}
