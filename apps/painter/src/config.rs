use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use painter_core::queue::DEFAULT_CAPACITY;
use painter_core::{LoopConfig, Size};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How delivered frames are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rasterized canvas, one PNG per frame.
    #[default]
    Png,
    /// Fill-call recording, one JSON document per frame.
    Json,
}

/// Application settings, read from a JSON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub queue_capacity: usize,
    pub output_dir: PathBuf,
    pub output: OutputFormat,
    /// `env_logger` filter string. Takes precedence over `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for PainterConfig {
    fn default() -> Self {
        let canvas = Size::default();
        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            queue_capacity: DEFAULT_CAPACITY,
            output_dir: PathBuf::from("frames"),
            output: OutputFormat::Png,
            log_filter: None,
        }
    }
}

impl PainterConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must not be empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::Invalid("queue_capacity must be positive".into()));
        }
        Ok(())
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            canvas: Size::new(self.canvas_width, self.canvas_height),
            queue_capacity: self.queue_capacity,
        }
    }
}
