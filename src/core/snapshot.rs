//! Console snapshots
//!
//! A serializable capture of every surface plus the presenter state, used by
//! the headless runner and by tests.

use serde::{Deserialize, Serialize};

use super::surface::{ScreenId, Surface};

/// A complete snapshot of the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Whether the presenter held the screens
    pub foreground: bool,
    /// Redraws that reached the hardware
    pub redraws: u64,
    pub surfaces: Vec<SurfaceSnapshot>,
}

/// Snapshot of one surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    pub screen: ScreenId,
    pub rows: usize,
    pub cols: usize,
    pub offset: usize,
    pub scrolls: u64,
    /// Row contents with trailing blanks removed
    pub lines: Vec<String>,
}

impl From<&Surface> for SurfaceSnapshot {
    fn from(surface: &Surface) -> Self {
        Self {
            screen: surface.screen(),
            rows: surface.rows(),
            cols: surface.cols(),
            offset: surface.offset(),
            scrolls: surface.scrolls(),
            lines: (0..surface.rows())
                .filter_map(|row| surface.row_text(row))
                .map(|line| line.trim_end().to_string())
                .collect(),
        }
    }
}

impl Snapshot {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Plain text rendering, one block per surface
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for surface in &self.surfaces {
            result.push_str(&format!(
                "[{}] {}x{} offset={} scrolls={}\n",
                surface.screen.name(),
                surface.rows,
                surface.cols,
                surface.offset,
                surface.scrolls
            ));
            for line in &surface.lines {
                result.push_str(line);
                result.push('\n');
            }
        }
        result
    }
}
