//! Bridge between a gesture source and the renderer.

use glam::DMat4;

use super::transform::ZoomState;

/// Something that holds the zoom uniform and can present a frame.
pub trait FrameSink {
    /// Store `zoom` in the uniform block.
    fn write_zoom(&mut self, zoom: &DMat4);
    /// Submit one frame using whatever the uniform block holds now.
    fn draw(&mut self);
}

/// Turns `(k, tx, ty)` samples into zoom-matrix writes followed by a redraw.
///
/// Stateless apart from the last matrix it wrote: no smoothing, no clamping,
/// no queueing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionBridge {
    last: DMat4,
}

impl Default for InteractionBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionBridge {
    pub fn new() -> Self {
        Self {
            last: DMat4::IDENTITY,
        }
    }

    /// First frame, at the identity transform.
    pub fn start<S: FrameSink + ?Sized>(&mut self, sink: &mut S) {
        self.apply(sink, ZoomState::IDENTITY);
    }

    pub fn on_gesture<S: FrameSink + ?Sized>(&mut self, sink: &mut S, k: f64, tx: f64, ty: f64) {
        self.apply(sink, ZoomState::new(k, tx, ty));
    }

    pub fn apply<S: FrameSink + ?Sized>(&mut self, sink: &mut S, zoom: ZoomState) {
        let matrix = zoom.matrix();
        tracing::trace!("Zoom k={:.4} t=({:.1}, {:.1})", zoom.k, zoom.x, zoom.y);
        sink.write_zoom(&matrix);
        self.last = matrix;
        sink.draw();
    }

    /// Redraw with the last matrix, e.g. after the target was recreated.
    pub fn replay<S: FrameSink + ?Sized>(&self, sink: &mut S) {
        sink.write_zoom(&self.last);
        sink.draw();
    }

    pub fn last_matrix(&self) -> &DMat4 {
        &self.last
    }
}
