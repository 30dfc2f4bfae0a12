//! Error types for console, presenter and configuration operations

use std::io;
use thiserror::Error;

/// Crate error type
#[derive(Error, Debug)]
pub enum Error {
    /// The frame heap could not satisfy a buffer allocation
    #[error("Frame heap exhausted: requested {requested} bytes, {available} available")]
    Allocation { requested: usize, available: usize },

    /// A surface was configured with a zero dimension
    #[error("Invalid surface geometry: {rows} rows x {cols} cols")]
    InvalidGeometry { rows: usize, cols: usize },

    /// Configuration rejected during validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file could not be parsed
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for dual-clock operations
pub type Result<T> = std::result::Result<T, Error>;
