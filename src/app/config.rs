//! Configuration for the clock application
//!
//! Precedence: CLI > config file > defaults. The config file is TOML and is
//! looked up at `<config dir>/dual-clock/config.toml` unless a path is given.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::clock::fixed_offset;
use crate::core::{ScreenId, Surface};
use crate::error::{Error, Result};
use crate::lifecycle::CONSOLE_CALLBACK_PRIORITY;
use crate::present::text_mode::CELL_BYTES;
use crate::present::TextModeDriver;

/// CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dual-clock")]
#[command(version)]
#[command(about = "A clock shown on a TV and a handheld screen at once", long_about = None)]
pub struct CliArgs {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Delay between frames in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Stop after this many frames (0 runs until the host exits)
    #[arg(short, long, value_name = "N")]
    pub frames: Option<u64>,

    /// Offset from UTC in seconds, less than one day either way
    #[arg(long, value_name = "SECS", allow_hyphen_values = true)]
    pub utc_offset: Option<i64>,

    /// Lifecycle script, e.g. "release@10,acquire@20,exit@30"
    #[arg(short, long, value_name = "SCRIPT")]
    pub script: Option<String>,
}

/// Geometry of one output surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub screen: ScreenId,
    pub rows: usize,
    pub cols: usize,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Surfaces in presentation order
    pub surfaces: Vec<SurfaceConfig>,
    /// Delay between frames in milliseconds
    pub interval_ms: u64,
    /// Size of the frame heap screen buffers are carved from
    pub heap_capacity: usize,
    /// Priority of the lifecycle callbacks
    pub callback_priority: u32,
    /// Offset from UTC applied to the system clock
    pub utc_offset_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surfaces: vec![
                SurfaceConfig {
                    screen: ScreenId::Tv,
                    rows: 27,
                    cols: 80,
                },
                SurfaceConfig {
                    screen: ScreenId::Drc,
                    rows: 18,
                    cols: 80,
                },
            ],
            interval_ms: 10,
            heap_capacity: 64 * 1024,
            callback_priority: CONSOLE_CALLBACK_PRIORITY,
            utc_offset_secs: 0,
        }
    }
}

impl Config {
    /// Load configuration with precedence: CLI > file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self> {
        let mut config = match &args.config {
            // An explicit path must exist
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_from_file(&path)?,
                _ => Config::default(),
            },
        };

        config.apply_cli_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!("loaded config from {:?}", path);
        Ok(config)
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(interval) = args.interval_ms {
            self.interval_ms = interval;
        }
        if let Some(offset) = args.utc_offset {
            self.utc_offset_secs = offset;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.surfaces.is_empty() {
            return Err(Error::Config("at least one surface is required".to_string()));
        }
        fixed_offset(self.utc_offset_secs)?;
        for surface in &self.surfaces {
            if surface.rows == 0 || surface.cols == 0 {
                return Err(Error::InvalidGeometry {
                    rows: surface.rows,
                    cols: surface.cols,
                });
            }
        }
        Ok(())
    }

    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dual-clock").join("config.toml"))
    }

    /// Blank surfaces in configured order
    pub fn build_surfaces(&self) -> Result<Vec<Surface>> {
        self.surfaces
            .iter()
            .map(|s| Surface::new(s.screen, s.rows, s.cols))
            .collect()
    }

    /// A text-mode driver with one screen per configured surface
    pub fn text_mode_driver(&self) -> TextModeDriver {
        self.surfaces
            .iter()
            .fold(TextModeDriver::new(), |driver, s| driver.with_screen(s.screen, s.rows, s.cols))
    }

    /// Frame heap bytes needed by a text-mode driver for these surfaces
    pub fn text_mode_buffer_bytes(&self) -> usize {
        self.surfaces.iter().map(|s| s.rows * s.cols * CELL_BYTES).sum()
    }
}
