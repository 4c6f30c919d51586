use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};

/// Where the points come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Uniform random points in `[-1, 1]` on both axes.
    Random {
        count: usize,
        /// Fixed seed for reproducible clouds; entropy when absent.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Two numeric columns of a CSV file with a header row.
    /// Without column names the first two columns are used.
    Csv {
        path: PathBuf,
        #[serde(default)]
        x_column: Option<String>,
        #[serde(default)]
        y_column: Option<String>,
    },
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Random {
            count: 100_000,
            seed: None,
        }
    }
}

/// How sprites look. Baked into the shader when the pipeline is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteStyle {
    /// The `C` in `size = sqrt(k) / C`. A visual tuning constant.
    pub size_divisor: f32,
    /// RGBA, 0..1 per channel. Alpha is the fixed blend alpha.
    pub color: [f32; 4],
}

impl Default for SpriteStyle {
    fn default() -> Self {
        Self {
            size_divisor: 1000.0,
            color: [0.27, 0.51, 0.71, 0.6],
        }
    }
}

/// Application configuration, read from a JSON file.
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Initial window size in logical pixels.
    pub window_size: [f32; 2],
    pub data: DataSource,
    pub sprite: SpriteStyle,
    /// Allowed zoom factor range, applied by the gesture recognizer.
    pub scale_extent: [f64; 2],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            window_size: [800.0, 600.0],
            data: DataSource::default(),
            sprite: SpriteStyle::default(),
            scale_extent: [0.1, 1000.0],
        }
    }
}

impl PlotConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PlotError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_json(&text)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Config for an optional command-line path: defaults without one, and
    /// a `Config` error when the named file cannot be used.
    pub fn from_arg(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| PlotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let [lo, hi] = self.scale_extent;
        if !(lo > 0.0 && lo <= hi && hi.is_finite()) {
            return Err(PlotError::Config(format!(
                "scale_extent must satisfy 0 < min <= max, got [{lo}, {hi}]"
            )));
        }
        if !(self.sprite.size_divisor.is_finite() && self.sprite.size_divisor > 0.0) {
            return Err(PlotError::Config(format!(
                "sprite.size_divisor must be positive, got {}",
                self.sprite.size_divisor
            )));
        }
        if let DataSource::Random { count: 0, .. } = self.data {
            return Err(PlotError::Config("data.count must be at least 1".into()));
        }
        Ok(())
    }
}
