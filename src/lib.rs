//! GPU scatter plot for large point clouds with pan/zoom driven by a single
//! uniform write per gesture.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod ui;

pub use error::{PlotError, Result};
