use crate::data::Dataset;
use crate::error::Result;

use super::scale::{build_scales, AxisScales};
use super::transform::{compile_scales, TransformPair};
use super::viewport::Viewport;

/// Scales and fixed matrices for one dataset in one viewport.
///
/// Pure CPU work. Computing it before touching the GPU means a degenerate
/// axis is reported before any buffer is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub viewport: Viewport,
    pub scales: AxisScales,
    pub transforms: TransformPair,
}

impl PlotLayout {
    pub fn compute(dataset: &Dataset, viewport: Viewport) -> Result<Self> {
        let scales = build_scales(dataset, &viewport)?;
        let transforms = compile_scales(&scales, &viewport);
        tracing::debug!(
            "Layout for {}x{}: x {:?} -> {:?}, y {:?} -> {:?}",
            viewport.width(),
            viewport.height(),
            scales.x.domain(),
            scales.x.range(),
            scales.y.domain(),
            scales.y.range()
        );
        Ok(Self {
            viewport,
            scales,
            transforms,
        })
    }
}
