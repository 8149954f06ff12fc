//! Rendering options and input validation.

use crate::error::ConfigError;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// What the horizontal axis of every subplot measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum XAxis {
    /// Training step
    Step,
    /// Wall-clock time elapsed since each run's first sample
    #[default]
    Time,
}

/// Options controlling the composite figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub x_axis: XAxis,
    /// Subplot grid columns, reduced to the metric count when larger
    pub columns: usize,
    /// Exponential smoothing coefficient in [0, 1)
    pub smoothing: f64,
    /// Output resolution in dots per inch
    pub dpi: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            x_axis: XAxis::Time,
            columns: 4,
            smoothing: 0.6,
            dpi: 70,
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(ConfigError::InvalidSmoothing(self.smoothing));
        }
        if self.columns == 0 {
            return Err(ConfigError::Zero { name: "columns" });
        }
        if self.dpi == 0 {
            return Err(ConfigError::Zero { name: "dpi" });
        }
        Ok(())
    }
}

/// Check that at least one directory was given and that each one exists and
/// is a directory. The first violation is returned.
pub fn validate_input_dirs<P: AsRef<Path>>(dirs: &[P]) -> Result<Vec<PathBuf>, ConfigError> {
    if dirs.is_empty() {
        return Err(ConfigError::NoInputs);
    }
    dirs.iter()
        .map(|dir| {
            let dir = dir.as_ref();
            if !dir.exists() {
                Err(ConfigError::Missing(dir.to_path_buf()))
            } else if !dir.is_dir() {
                Err(ConfigError::NotADirectory(dir.to_path_buf()))
            } else {
                Ok(dir.to_path_buf())
            }
        })
        .collect()
}

/// clap value parser for the smoothing coefficient.
pub fn parse_smoothing(raw: &str) -> Result<f64, String> {
    let alpha: f64 = raw
        .parse()
        .map_err(|e| format!("`{raw}` is not a number: {e}"))?;
    if (0.0..1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(ConfigError::InvalidSmoothing(alpha).to_string())
    }
}
