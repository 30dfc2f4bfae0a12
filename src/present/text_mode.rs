//! Text-mode screen driver
//!
//! Emulates a character-cell framebuffer: each cell takes two bytes, the
//! character code followed by an attribute byte, the way VGA text memory is
//! laid out. Flipping copies the back buffer into a front buffer that can be
//! read back as text.

use super::{Region, ScreenDriver};
use crate::core::ScreenId;

/// Bytes per character cell
pub const CELL_BYTES: usize = 2;

/// Attribute byte for drawn text (white on black)
pub const TEXT_ATTRIBUTE: u8 = 0x0F;

/// Code stored for characters outside printable ASCII
const REPLACEMENT: u8 = b'?';

#[derive(Debug)]
struct Screen {
    id: ScreenId,
    rows: usize,
    cols: usize,
    enabled: bool,
    bound: Option<Region>,
    front: Vec<u8>,
    flips: u64,
}

impl Screen {
    fn line(&self, row: usize) -> String {
        let start = row * self.cols * CELL_BYTES;
        self.front[start..start + self.cols * CELL_BYTES]
            .chunks_exact(CELL_BYTES)
            .map(|cell| char::from(cell[0]))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct TextModeDriver {
    screens: Vec<Screen>,
    initialized: bool,
    flushed_bytes: u64,
}

impl TextModeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a screen of `rows` x `cols` cells
    pub fn with_screen(mut self, id: ScreenId, rows: usize, cols: usize) -> Self {
        self.screens.retain(|s| s.id != id);
        self.screens.push(Screen {
            id,
            rows,
            cols,
            enabled: false,
            bound: None,
            front: blank_buffer(rows * cols),
            flips: 0,
        });
        self
    }

    fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.iter().find(|s| s.id == id)
    }

    fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen> {
        self.screens.iter_mut().find(|s| s.id == id)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_enabled(&self, id: ScreenId) -> bool {
        self.screen(id).is_some_and(|s| s.enabled)
    }

    /// Buffer region the screen currently scans out of
    pub fn bound_region(&self, id: ScreenId) -> Option<Region> {
        self.screen(id).and_then(|s| s.bound)
    }

    pub fn flips(&self, id: ScreenId) -> u64 {
        self.screen(id).map_or(0, |s| s.flips)
    }

    pub fn flushed_bytes(&self) -> u64 {
        self.flushed_bytes
    }

    /// Front buffer contents, one string per row
    pub fn front_lines(&self, id: ScreenId) -> Option<Vec<String>> {
        self.screen(id)
            .map(|s| (0..s.rows).map(|row| s.line(row)).collect())
    }

    /// All enabled screens as text, each headed by its name
    pub fn render(&self) -> String {
        let mut out = String::new();
        for screen in self.screens.iter().filter(|s| s.enabled) {
            out.push_str(&format!("[{}]\n", screen.id.name()));
            for row in 0..screen.rows {
                out.push_str(screen.line(row).trim_end());
                out.push('\n');
            }
        }
        out
    }
}

fn blank_buffer(cells: usize) -> Vec<u8> {
    [b' ', 0].repeat(cells)
}

impl ScreenDriver for TextModeDriver {
    fn init(&mut self) {
        self.initialized = true;
    }

    fn buffer_size(&self, screen: ScreenId) -> usize {
        self.screen(screen)
            .map_or(0, |s| s.rows * s.cols * CELL_BYTES)
    }

    fn set_buffer(&mut self, screen: ScreenId, region: Region) {
        match self.screen_mut(screen) {
            Some(s) => s.bound = Some(region),
            None => tracing::warn!(screen = screen.name(), "buffer bound to unknown screen"),
        }
    }

    fn enable(&mut self, screen: ScreenId, enabled: bool) {
        if let Some(s) = self.screen_mut(screen) {
            s.enabled = enabled;
        }
    }

    fn clear_buffer(&mut self, _screen: ScreenId, pixels: &mut [u8], color: u32) {
        for cell in pixels.chunks_exact_mut(CELL_BYTES) {
            cell[0] = b' ';
            cell[1] = (color & 0xFF) as u8;
        }
    }

    fn put_text(&mut self, screen: ScreenId, pixels: &mut [u8], col: usize, row: usize, text: &str) {
        let Some(cols) = self.screen(screen).map(|s| s.cols) else {
            return;
        };
        for (i, ch) in text.chars().enumerate() {
            let x = col + i;
            if x >= cols {
                break;
            }
            let index = (row * cols + x) * CELL_BYTES;
            let Some(cell) = pixels.get_mut(index..index + CELL_BYTES) else {
                break;
            };
            cell[0] = if ch.is_ascii_graphic() || ch == ' ' {
                ch as u8
            } else {
                REPLACEMENT
            };
            cell[1] = TEXT_ATTRIBUTE;
        }
    }

    fn flush_range(&mut self, pixels: &[u8]) {
        self.flushed_bytes += pixels.len() as u64;
    }

    fn flip_buffers(&mut self, screen: ScreenId, pixels: &[u8]) {
        if let Some(s) = self.screen_mut(screen) {
            let len = s.front.len().min(pixels.len());
            s.front[..len].copy_from_slice(&pixels[..len]);
            s.flips += 1;
        }
    }
}
