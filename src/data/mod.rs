pub mod dataset;
pub mod loader;

pub use dataset::{Axis, Dataset};
