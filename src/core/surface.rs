//! Text Surface
//!
//! A fixed-size, row-major character grid bound to one physical output.
//! Writing past the last cell scrolls the grid up by one row.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fill character for cleared and scrolled-in cells
pub const BLANK: char = ' ';

/// Tab advance granularity, measured on the linear cursor offset
pub const TAB_WIDTH: usize = 4;

const BACKSPACE: char = '\x08';

/// Hardware output a surface is presented on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenId {
    /// The TV output
    Tv,
    /// The handheld (gamepad) output
    Drc,
}

impl ScreenId {
    pub fn name(self) -> &'static str {
        match self {
            ScreenId::Tv => "tv",
            ScreenId::Drc => "drc",
        }
    }
}

/// One text grid with its write cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    screen: ScreenId,
    rows: usize,
    cols: usize,
    /// Cell contents, `rows * cols` long
    cells: Vec<char>,
    /// Linear index of the next write, always in `0..=cells.len()`
    offset: usize,
    /// Number of scroll events since construction
    scrolls: u64,
}

impl Surface {
    /// Create a blank surface. Both dimensions must be non-zero.
    pub fn new(screen: ScreenId, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidGeometry { rows, cols });
        }
        Ok(Self {
            screen,
            rows,
            cols,
            cells: vec![BLANK; rows * cols],
            offset: 0,
            scrolls: 0,
        })
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Current cursor offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total scroll events so far
    pub fn scrolls(&self) -> u64 {
        self.scrolls
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Get the cells of one row
    pub fn row(&self, row: usize) -> Option<&[char]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Get one row as a string of exactly `cols` characters
    pub fn row_text(&self, row: usize) -> Option<String> {
        self.row(row).map(|cells| cells.iter().collect())
    }

    /// Get a single cell
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols {
            return None;
        }
        self.row(row).map(|cells| cells[col])
    }

    /// Blank every cell and home the cursor
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
        self.offset = 0;
    }

    /// Append one character, scrolling first if the grid is full
    pub fn write_char(&mut self, c: char) {
        let len = self.cells.len();
        if self.offset >= len {
            self.scroll_up();
        }

        match c {
            '\n' => self.offset += self.cols - self.offset % self.cols,
            // Tab stops are taken on the linear offset, not the column.
            '\t' => self.offset = (self.offset + TAB_WIDTH - self.offset % TAB_WIDTH).min(len),
            BACKSPACE => {
                if self.offset == 0 {
                    tracing::debug!(screen = self.screen.name(), "backspace at origin ignored");
                    return;
                }
                self.offset -= 1;
                self.cells[self.offset] = BLANK;
            }
            _ => {
                self.cells[self.offset] = c;
                self.offset += 1;
            }
        }
    }

    /// Append every character of `s`
    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
        }
    }

    /// Drop row 0, shift the rest up and blank the last row
    fn scroll_up(&mut self) {
        let shift = (self.rows - 1) * self.cols;
        self.cells.copy_within(self.cols.., 0);
        self.cells[shift..].fill(BLANK);
        self.offset -= self.cols;
        self.scrolls += 1;
        tracing::debug!(screen = self.screen.name(), scrolls = self.scrolls, "scrolled");
    }
}
