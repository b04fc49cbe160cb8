//! Configuration management for gapfill.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::error::{GapfillError, Result};
use crate::postprocess::{resolve_pipeline, StepSpec};

/// Command-line arguments for gapfill
#[derive(Parser, Debug)]
#[command(name = "gapfill")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the CSV file to process
    pub input: PathBuf,

    /// Where to write the processed CSV (stdout when omitted)
    #[arg(short, long, env = "GAPFILL_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Path to JSON configuration file with the pipeline steps
    #[arg(short, long, env = "GAPFILL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Name of the timestamp column (defaults to the first column)
    #[arg(short, long, env = "GAPFILL_TIME_COLUMN")]
    pub time_column: Option<String>,

    /// Column to interpolate; appends a LinearInterpolation step
    #[arg(long, requires_all = ["interval", "limit"])]
    pub column: Option<String>,

    /// Grid interval in seconds for --column
    #[arg(long, requires = "column")]
    pub interval: Option<i64>,

    /// Longest gap to fill, in seconds, for --column
    #[arg(long, requires = "column", allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GAPFILL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Input table configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Name of the timestamp column; `None` means the first column
    #[serde(default)]
    pub time_column: Option<String>,

    /// Header used for the timestamp column when writing output
    #[serde(default = "default_output_time_column")]
    pub output_time_column: String,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,

    /// Post-processing steps, applied in order
    #[serde(default)]
    pub pipeline: Vec<StepSpec>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Paths resolved from the command line
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, RunPaths)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, RunPaths)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if args.time_column.is_some() {
            config.input.time_column = args.time_column;
        }
        config.log_level = args.log_level;

        if let (Some(column), Some(interval), Some(limit)) = (args.column, args.interval, args.limit)
        {
            config.pipeline.push(StepSpec::new(
                "LinearInterpolation",
                json!({
                    "col_name": column,
                    "interpolation_interval": interval,
                    "limit": limit,
                }),
            ));
        }

        let paths = RunPaths {
            input: args.input,
            output: args.output,
        };

        Ok((config, paths))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.input.time_column.is_some() {
            self.input.time_column = other.input.time_column;
        }
        self.input.output_time_column = other.input.output_time_column;
        self.pipeline.extend(other.pipeline);
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(GapfillError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if matches!(&self.input.time_column, Some(name) if name.trim().is_empty()) {
            return Err(GapfillError::Config {
                message: "Time column name cannot be empty".to_string(),
            });
        }

        if self.input.output_time_column.trim().is_empty() {
            return Err(GapfillError::Config {
                message: "Output time column name cannot be empty".to_string(),
            });
        }

        if self.pipeline.is_empty() {
            return Err(GapfillError::Config {
                message: "No pipeline steps configured; pass --column/--interval/--limit or a config file"
                    .to_string(),
            });
        }

        // Every step must resolve to a known operation with well-typed arguments
        resolve_pipeline(&self.pipeline)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            pipeline: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            time_column: None,
            output_time_column: default_output_time_column(),
        }
    }
}

// Default value functions for serde
fn default_output_time_column() -> String {
    "timestamp".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
