use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{OutputFormat, PainterConfig};

/// Paint drawing scripts into frame files.
///
/// Each SCRIPT file is submitted as one batch. `-`, or no scripts and no
/// demo, reads a single batch from stdin.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(name = "painter", author, version, about)]
pub struct CliArgs {
    /// JSON config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory frames are written to
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Frame file format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Built-in producer to run before any SCRIPT (green-border, diagonal-figure)
    #[arg(long, value_name = "NAME")]
    pub demo: Option<String>,

    /// Pause between payloads, in milliseconds
    #[arg(
        long = "interval-ms",
        value_name = "N",
        default_value = "0",
        value_parser = parse_millis
    )]
    pub interval: Duration,

    /// Script files, `-` for stdin
    #[arg(value_name = "SCRIPT")]
    pub scripts: Vec<String>,
}

impl CliArgs {
    /// Command-line values win over file values.
    pub fn apply(&self, config: &mut PainterConfig) {
        if let Some(out) = &self.out {
            config.output_dir = out.clone();
        }
        if let Some(format) = self.format {
            config.output = format;
        }
    }
}

fn parse_millis(raw: &str) -> Result<Duration, std::num::ParseIntError> {
    raw.parse().map(Duration::from_millis)
}
