//! Host-side matrices for the data -> pixel -> clip pipeline.
//!
//! Convention: column vectors, column-major storage, the same as WGSL's
//! `mat4x4<f32>`. A data point `p = (x, y, 0, 1)` reaches clip space as
//!
//! ```text
//! clip = pixel_to_clip * zoom * data_to_pixel * p
//! ```
//!
//! so the zoom acts in logical pixel space, between the two fixed matrices.

use glam::{DMat4, DVec2, DVec4};

use crate::render::scale::{AxisScales, LinearScale};
use crate::render::viewport::Viewport;

/// The two matrices that stay fixed while the user pans and zooms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformPair {
    pub data_to_pixel: DMat4,
    pub pixel_to_clip: DMat4,
}

impl TransformPair {
    /// Full data -> clip transform for a given zoom matrix.
    pub fn combined(&self, zoom: &DMat4) -> DMat4 {
        self.pixel_to_clip * *zoom * self.data_to_pixel
    }

    pub fn data_to_pixel_point(&self, point: DVec2) -> DVec2 {
        (self.data_to_pixel * point.extend(0.0).extend(1.0)).truncate().truncate()
    }

    pub fn data_to_clip(&self, point: DVec2, zoom: &DMat4) -> DVec2 {
        let clip: DVec4 = self.combined(zoom) * point.extend(0.0).extend(1.0);
        DVec2::new(clip.x / clip.w, clip.y / clip.w)
    }
}

/// Build the transform pair for one viewport/scale configuration.
pub fn compile(x_scale: &LinearScale, y_scale: &LinearScale, viewport: &Viewport) -> TransformPair {
    let (sx, sy) = (x_scale.ratio(), y_scale.ratio());

    // Anchored at the midpoints so edge values are not pushed under
    // neighbouring sprites.
    let data_to_pixel = DMat4::from_cols_array_2d(&[
        [sx, 0.0, 0.0, 0.0],
        [0.0, sy, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [
            -sx * x_scale.domain_mid() + x_scale.range_mid(),
            -sy * y_scale.domain_mid() + y_scale.range_mid(),
            0.0,
            1.0,
        ],
    ]);

    // [0, w] x [0, h] -> [-1, 1] x [-1, 1], y flipped since screen y grows down.
    let pixel_to_clip = DMat4::from_cols_array_2d(&[
        [2.0 / viewport.width(), 0.0, 0.0, 0.0],
        [0.0, -2.0 / viewport.height(), 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [-1.0, 1.0, 0.0, 1.0],
    ]);

    TransformPair {
        data_to_pixel,
        pixel_to_clip,
    }
}

pub fn compile_scales(scales: &AxisScales, viewport: &Viewport) -> TransformPair {
    compile(&scales.x, &scales.y, viewport)
}

/// Pan/zoom state as produced by a gesture layer: `pixel' = k * pixel + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl ZoomState {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    /// Uniform scale on x/y, identity on z, translation in the last column.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_cols_array_2d(&[
            [self.k, 0.0, 0.0, 0.0],
            [0.0, self.k, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [self.x, self.y, 0.0, 1.0],
        ])
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Narrow a host matrix to the `f32` column layout the uniform block holds.
pub fn to_gpu_matrix(m: &DMat4) -> [[f32; 4]; 4] {
    m.to_cols_array_2d().map(|col| col.map(|v| v as f32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::render::scale::build_scales;

    const EPS: f64 = 1e-9;

    fn pair_for(x: Vec<f32>, y: Vec<f32>, w: f64, h: f64) -> (AxisScales, TransformPair) {
        let data = Dataset::new(x, y).unwrap();
        let vp = Viewport::new(w, h, 1.0).unwrap();
        let scales = build_scales(&data, &vp).unwrap();
        (scales, compile_scales(&scales, &vp))
    }

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn domain_midpoint_lands_at_clip_origin() {
        for (w, h) in [(600.0, 600.0), (800.0, 600.0), (333.0, 917.0)] {
            let (scales, pair) = pair_for(vec![-4.0, 10.0], vec![0.25, 3.0], w, h);
            let mid = DVec2::new(scales.x.domain_mid(), scales.y.domain_mid());
            let clip = pair.data_to_clip(mid, &DMat4::IDENTITY);
            assert!(close(clip, DVec2::ZERO), "{w}x{h}: {clip:?}");
        }
    }

    #[test]
    fn data_to_pixel_agrees_with_scales() {
        let (scales, pair) = pair_for(vec![-4.0, 10.0], vec![0.25, 3.0], 800.0, 600.0);
        for p in [DVec2::new(-4.0, 0.25), DVec2::new(10.0, 3.0), DVec2::new(1.5, 2.0)] {
            let expected = DVec2::new(scales.x.apply(p.x), scales.y.apply(p.y));
            assert!(close(pair.data_to_pixel_point(p), expected));
        }
    }

    #[test]
    fn data_to_pixel_inverse_round_trips() {
        let (_, pair) = pair_for(vec![-4.0, 10.0], vec![0.25, 3.0], 800.0, 600.0);
        let inverse = pair.data_to_pixel.inverse();
        for p in [DVec2::new(-3.9, 0.3), DVec2::new(0.0, 1.0), DVec2::new(9.5, 2.9)] {
            let there = pair.data_to_pixel * p.extend(0.0).extend(1.0);
            let back = inverse * there;
            assert!(close(back.truncate().truncate(), p));
        }
    }

    #[test]
    fn identity_zoom_is_a_no_op() {
        let (_, pair) = pair_for(vec![-1.0, 1.0], vec![-1.0, 1.0], 800.0, 600.0);
        let without_zoom = pair.pixel_to_clip * pair.data_to_pixel;
        assert_eq!(pair.combined(&ZoomState::IDENTITY.matrix()), without_zoom);
    }

    #[test]
    fn pixel_to_clip_corners() {
        let vp = Viewport::new(800.0, 600.0, 1.0).unwrap();
        let x = LinearScale::new(crate::data::Axis::X, [0.0, 1.0], [0.0, 800.0]).unwrap();
        let y = LinearScale::new(crate::data::Axis::Y, [0.0, 1.0], [0.0, 600.0]).unwrap();
        let pair = compile(&x, &y, &vp);
        let to_clip = |px: f64, py: f64| {
            let v = pair.pixel_to_clip * DVec4::new(px, py, 0.0, 1.0);
            DVec2::new(v.x, v.y)
        };
        assert!(close(to_clip(0.0, 0.0), DVec2::new(-1.0, 1.0)));
        assert!(close(to_clip(800.0, 600.0), DVec2::new(1.0, -1.0)));
        assert!(close(to_clip(400.0, 300.0), DVec2::ZERO));
    }

    #[test]
    fn zoom_applies_in_pixel_space() {
        let (_, pair) = pair_for(vec![-1.0, 1.0], vec![-1.0, 1.0], 600.0, 600.0);
        let zoom = ZoomState::new(2.0, -300.0, -300.0).matrix();
        // Pixel (300, 300) -> 2 * 300 - 300 = 300: the center stays put.
        let center = pair.data_to_clip(DVec2::ZERO, &zoom);
        assert!(close(center, DVec2::ZERO));
        // Pixel (450, 450) -> 600: the bottom-right corner of the canvas.
        let q = pair.data_to_clip(DVec2::new(0.5, 0.5), &zoom);
        assert!(close(q, DVec2::new(1.0, -1.0)));
    }

    #[test]
    fn gpu_matrix_keeps_column_layout() {
        let m = ZoomState::new(3.0, 10.0, -20.0).matrix();
        let gpu = to_gpu_matrix(&m);
        assert_eq!(gpu[0], [3.0, 0.0, 0.0, 0.0]);
        assert_eq!(gpu[3], [10.0, -20.0, 0.0, 1.0]);
    }
}
