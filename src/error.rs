use thiserror::Error;

use crate::data::dataset::Axis;

/// Every failure is terminal for the rendering session: there is no
/// degraded or software rendering path.
#[derive(Debug, Error)]
pub enum PlotError {
    /// All values on one axis are equal, so the scale has zero span.
    #[error("invalid domain on {axis} axis: every value equals {value}")]
    InvalidDomain { axis: Axis, value: f64 },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("dataset columns differ in length (x: {x}, y: {y})")]
    MismatchedLengths { x: usize, y: usize },

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    /// No GPU context could be obtained.
    #[error("GPU backend unavailable: {0}")]
    UnsupportedBackend(String),

    /// The backend rejected a buffer, shader or pipeline.
    #[error("failed to create {resource}: {reason}")]
    ResourceCreationFailure {
        resource: &'static str,
        reason: String,
    },

    #[error("cannot load data: {0}")]
    DataLoad(String),

    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T, E = PlotError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_domain_names_the_axis() {
        let err = PlotError::InvalidDomain {
            axis: Axis::X,
            value: 2.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("x axis"), "{msg}");
        assert!(msg.contains("2.5"), "{msg}");
    }

    #[test]
    fn resource_failure_display() {
        let err = PlotError::ResourceCreationFailure {
            resource: "sprite pipeline",
            reason: "validation error".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to create sprite pipeline: validation error"
        );
    }
}
