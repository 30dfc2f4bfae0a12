//! Dual Clock Library
//!
//! An on-screen clock for a two-screen console: the same text is written to
//! a TV-sized grid and a handheld-sized grid, and both are presented on
//! hardware framebuffers only while the host grants display ownership.
//!
//! - `core`: Surfaces (fixed text grids) and the console that writes to them
//! - `present`: Screen driver trait, frame heap and the foreground-gated presenter
//! - `clock`: Calendar time sources and the clock frame layout
//! - `lifecycle`: Host process model (foreground acquire/release)
//! - `app`: Main loop and configuration

pub mod app;
pub mod clock;
pub mod core;
pub mod error;
pub mod lifecycle;
pub mod present;

pub use error::{Error, Result};
