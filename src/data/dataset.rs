use std::fmt;

use crate::error::{PlotError, Result};

/// One of the two plotted dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Two parallel coordinate columns. Point `i` is `(x[i], y[i])`.
///
/// Values are kept as `f32` because that is what the storage buffers hold;
/// the columns are never modified after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Vec<f32>,
    y: Vec<f32>,
}

impl Dataset {
    pub fn new(x: Vec<f32>, y: Vec<f32>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(PlotError::MismatchedLengths {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(PlotError::EmptyDataset);
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f32] {
        &self.x
    }

    pub fn y(&self) -> &[f32] {
        &self.y
    }

    pub fn values(&self, axis: Axis) -> &[f32] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    /// Min and max of one column, skipping NaN and infinities.
    /// Returns `None` when the column has no finite value.
    pub fn extent(&self, axis: Axis) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in self.values(axis) {
            if v.is_finite() {
                let v = v as f64;
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_columns() {
        let err = Dataset::new(vec![0.0, 1.0], vec![0.0]).unwrap_err();
        assert!(matches!(err, PlotError::MismatchedLengths { x: 2, y: 1 }));
    }

    #[test]
    fn rejects_empty_columns() {
        let err = Dataset::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, PlotError::EmptyDataset));
    }

    #[test]
    fn extent_skips_non_finite() {
        let data = Dataset::new(
            vec![f32::NAN, -2.0, 3.0, f32::INFINITY],
            vec![1.0, 1.0, 1.0, 1.0],
        )
        .unwrap();
        assert_eq!(data.extent(Axis::X), Some((-2.0, 3.0)));
        assert_eq!(data.extent(Axis::Y), Some((1.0, 1.0)));
    }

    #[test]
    fn extent_of_all_nan_column_is_none() {
        let data = Dataset::new(vec![f32::NAN], vec![0.0]).unwrap();
        assert_eq!(data.extent(Axis::X), None);
    }
}
