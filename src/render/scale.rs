//! Linear scales from dataset extents into the square plotting box.

use crate::data::{Axis, Dataset};
use crate::error::{PlotError, Result};
use crate::render::viewport::Viewport;

/// Affine map from a data interval onto a pixel interval.
///
/// The map is anchored at the interval midpoints rather than at an endpoint,
/// so `domain_mid` lands exactly on `range_mid` and reversing either interval
/// mirrors the mapping about the same center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    /// Fails with `InvalidDomain` when `domain[0] == domain[1]`.
    pub fn new(axis: Axis, domain: [f64; 2], range: [f64; 2]) -> Result<Self> {
        if domain[1] == domain[0] {
            return Err(PlotError::InvalidDomain {
                axis,
                value: domain[0],
            });
        }
        Ok(Self { domain, range })
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// `range_span / domain_span`, signed.
    pub fn ratio(&self) -> f64 {
        (self.range[1] - self.range[0]) / (self.domain[1] - self.domain[0])
    }

    pub fn domain_mid(&self) -> f64 {
        (self.domain[0] + self.domain[1]) / 2.0
    }

    pub fn range_mid(&self) -> f64 {
        (self.range[0] + self.range[1]) / 2.0
    }

    pub fn apply(&self, value: f64) -> f64 {
        (value - self.domain_mid()) * self.ratio() + self.range_mid()
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        (pixel - self.range_mid()) / self.ratio() + self.domain_mid()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

/// Scales for both axes sharing one square box centered in the viewport.
///
/// The longer viewport dimension gets a symmetric buffer of
/// `(dimension - min(width, height)) / 2` on each side.
pub fn build_scales(dataset: &Dataset, viewport: &Viewport) -> Result<AxisScales> {
    let square = viewport.square_side();
    let scale_for = |axis: Axis, dimension: f64| -> Result<LinearScale> {
        let buffer = (dimension - square) / 2.0;
        let (min, max) = dataset.extent(axis).ok_or(PlotError::InvalidDomain {
            axis,
            value: f64::NAN,
        })?;
        LinearScale::new(axis, [min, max], [buffer, dimension - buffer])
    };
    Ok(AxisScales {
        x: scale_for(Axis::X, viewport.width())?,
        y: scale_for(Axis::Y, viewport.height())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unit_dataset() -> Dataset {
        Dataset::new(vec![-1.0, 0.0, 1.0], vec![-1.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn midpoint_maps_exactly() {
        for (domain, range) in [
            ([-3.0, 7.0], [0.0, 600.0]),
            ([0.1, 0.3], [100.0, 700.0]),
            ([5.0, -5.0], [0.0, 1.0]),
            ([1e6, 1e6 + 1.0], [12.5, 612.5]),
        ] {
            let scale = LinearScale::new(Axis::X, domain, range).unwrap();
            let mid = (domain[0] + domain[1]) / 2.0;
            assert_eq!(scale.apply(mid), (range[0] + range[1]) / 2.0);
        }
    }

    #[test]
    fn endpoints_map_in_order() {
        let scale = LinearScale::new(Axis::Y, [-2.0, 6.0], [50.0, 450.0]).unwrap();
        assert!((scale.apply(-2.0) - 50.0).abs() < EPS);
        assert!((scale.apply(6.0) - 450.0).abs() < EPS);

        let flipped = LinearScale::new(Axis::Y, [6.0, -2.0], [50.0, 450.0]).unwrap();
        assert!((flipped.apply(6.0) - 50.0).abs() < EPS);
        assert!((flipped.apply(-2.0) - 450.0).abs() < EPS);
    }

    #[test]
    fn invert_undoes_apply() {
        let scale = LinearScale::new(Axis::X, [-1.0, 4.0], [100.0, 700.0]).unwrap();
        for v in [-0.75, 0.0, 1.3, 3.99] {
            assert!((scale.invert(scale.apply(v)) - v).abs() < EPS);
        }
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        let err = LinearScale::new(Axis::X, [2.0, 2.0], [0.0, 1.0]).unwrap_err();
        assert!(matches!(err, PlotError::InvalidDomain { axis: Axis::X, .. }));
    }

    #[test]
    fn square_viewport_has_no_buffer() {
        let vp = Viewport::new(600.0, 600.0, 1.0).unwrap();
        let scales = build_scales(&unit_dataset(), &vp).unwrap();
        assert_eq!(scales.x.domain(), [-1.0, 1.0]);
        assert_eq!(scales.x.range(), [0.0, 600.0]);
        assert_eq!(scales.y.range(), [0.0, 600.0]);
    }

    #[test]
    fn wide_viewport_buffers_x_only() {
        let vp = Viewport::new(800.0, 600.0, 1.0).unwrap();
        let scales = build_scales(&unit_dataset(), &vp).unwrap();
        assert_eq!(scales.x.range(), [100.0, 700.0]);
        assert_eq!(scales.y.range(), [0.0, 600.0]);
    }

    #[test]
    fn tall_viewport_buffers_y_only() {
        let vp = Viewport::new(400.0, 1000.0, 1.0).unwrap();
        let scales = build_scales(&unit_dataset(), &vp).unwrap();
        assert_eq!(scales.x.range(), [0.0, 400.0]);
        assert_eq!(scales.y.range(), [300.0, 700.0]);
    }

    #[test]
    fn constant_y_column_names_y_axis() {
        let data = Dataset::new(vec![0.0, 1.0], vec![4.0, 4.0]).unwrap();
        let vp = Viewport::new(600.0, 600.0, 1.0).unwrap();
        let err = build_scales(&data, &vp).unwrap_err();
        assert!(matches!(
            err,
            PlotError::InvalidDomain {
                axis: Axis::Y,
                value
            } if value == 4.0
        ));
    }
}
