//! Text Console Module
//!
//! Fixed-geometry character grids, one per output, and the console that
//! writes to all of them at once. This module contains:
//! - Surfaces with linear-offset cursor and one-row scrolling
//! - The console front end (`clear`, formatted writes)
//! - Serializable snapshots

mod console;
mod snapshot;
mod surface;

pub use console::Console;
pub use snapshot::{Snapshot, SurfaceSnapshot};
pub use surface::{ScreenId, Surface, BLANK, TAB_WIDTH};
