use egui::{PointerButton, Rect, Response};

use crate::render::ZoomState;

/// Wheel delta (in points) for one doubling of the zoom factor.
const WHEEL_POINTS_PER_DOUBLING: f64 = 500.0;

/// Converts pointer input on the canvas into `(k, tx, ty)` samples.
///
/// Dragging pans, wheel and pinch zoom about the pointer, double click resets.
/// `k` is clamped to the configured extent here, before it reaches the
/// renderer. All pointer input of one UI frame folds into a single sample.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    state: ZoomState,
    scale_extent: [f64; 2],
}

impl GestureRecognizer {
    pub fn new(scale_extent: [f64; 2]) -> Self {
        Self {
            state: ZoomState::IDENTITY,
            scale_extent,
        }
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Returns the new transform when this frame's input changed it.
    pub fn update(&mut self, response: &Response, rect: Rect) -> Option<ZoomState> {
        let before = self.state;

        // Pan: drag with primary mouse button
        if response.dragged_by(PointerButton::Primary) {
            let delta = response.drag_delta();
            self.state = pan(self.state, delta.x as f64, delta.y as f64);
        }

        // Zoom: scroll wheel or pinch, centered on the pointer
        let (scroll, pinch) = response.ctx.input(|i| {
            if response.hovered() {
                (i.smooth_scroll_delta.y as f64, i.zoom_delta() as f64)
            } else {
                (0.0, 1.0)
            }
        });
        let factor = wheel_factor(scroll) * pinch;
        if factor != 1.0 {
            if let Some(pointer) = response.hover_pos() {
                let anchor = [(pointer.x - rect.left()) as f64, (pointer.y - rect.top()) as f64];
                self.state = zoom_about(self.state, anchor, factor, self.scale_extent);
            }
        }

        if response.double_clicked() {
            self.state = ZoomState::IDENTITY;
        }

        (self.state != before).then_some(self.state)
    }
}

pub fn pan(state: ZoomState, dx: f64, dy: f64) -> ZoomState {
    ZoomState::new(state.k, state.x + dx, state.y + dy)
}

/// Zoom factor for a wheel delta; positive deltas zoom in.
pub fn wheel_factor(delta: f64) -> f64 {
    (delta / WHEEL_POINTS_PER_DOUBLING).exp2()
}

/// Scale by `factor` keeping the canvas point `anchor` fixed, with the
/// resulting `k` clamped to `extent`.
pub fn zoom_about(state: ZoomState, anchor: [f64; 2], factor: f64, extent: [f64; 2]) -> ZoomState {
    let k = (state.k * factor).clamp(extent[0], extent[1]);
    // Pixel-space point under the anchor before zooming.
    let px = (anchor[0] - state.x) / state.k;
    let py = (anchor[1] - state.y) / state.k;
    ZoomState::new(k, anchor[0] - px * k, anchor[1] - py * k)
}
