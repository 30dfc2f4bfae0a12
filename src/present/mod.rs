//! Display Presenter
//!
//! Copies surface grids onto hardware screen buffers. Buffers are carved out
//! of a frame heap when the host grants foreground ownership and released in
//! bulk when it takes it away. While in the background every redraw is a
//! no-op.

pub mod heap;
pub mod recording;
pub mod text_mode;

pub use heap::{FrameHeap, Region};
pub use recording::{DriverCall, RecordingDriver};
pub use text_mode::TextModeDriver;

use crate::core::{ScreenId, Surface};
use crate::error::Result;

/// Frame heap tag recorded on every foreground acquisition
pub const CONSOLE_FRAME_HEAP_TAG: u32 = 0x4654_5055;

/// Alignment of screen buffers inside the frame heap
pub const BUFFER_ALIGN: usize = 4;

/// Color used to clear a buffer before drawing
pub const CLEAR_COLOR: u32 = 0;

/// Hardware screen API
///
/// Pixel memory is owned by the presenter; drawing calls receive the bytes
/// bound to the screen they target.
pub trait ScreenDriver {
    /// Bring up the screen hardware
    fn init(&mut self);

    /// Bytes needed for one screen's buffer
    fn buffer_size(&self, screen: ScreenId) -> usize;

    /// Point the screen at a buffer region
    fn set_buffer(&mut self, screen: ScreenId, region: Region);

    fn enable(&mut self, screen: ScreenId, enabled: bool);

    fn clear_buffer(&mut self, screen: ScreenId, pixels: &mut [u8], color: u32);

    /// Draw `text` starting at character cell (`col`, `row`)
    fn put_text(&mut self, screen: ScreenId, pixels: &mut [u8], col: usize, row: usize, text: &str);

    /// Write back the CPU cache for `pixels`
    fn flush_range(&mut self, pixels: &[u8]);

    /// Swap front and back buffers
    fn flip_buffers(&mut self, screen: ScreenId, pixels: &[u8]);
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    screen: ScreenId,
    region: Region,
}

/// Foreground-gated renderer for a set of surfaces
#[derive(Debug)]
pub struct Presenter<D> {
    driver: D,
    heap: FrameHeap,
    tag: u32,
    /// One binding per surface, in surface order. Empty in the background.
    bindings: Vec<Binding>,
    foreground: bool,
    redraws: u64,
}

impl<D: ScreenDriver> Presenter<D> {
    pub fn new(driver: D, heap: FrameHeap) -> Self {
        Self::with_tag(driver, heap, CONSOLE_FRAME_HEAP_TAG)
    }

    pub fn with_tag(driver: D, heap: FrameHeap, tag: u32) -> Self {
        Self {
            driver,
            heap,
            tag,
            bindings: Vec::new(),
            foreground: false,
            redraws: 0,
        }
    }

    pub fn is_foreground(&self) -> bool {
        self.foreground
    }

    /// Number of redraws that reached the hardware
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn heap(&self) -> &FrameHeap {
        &self.heap
    }

    /// Bound buffer for the surface at `index`, if in the foreground
    pub fn buffer(&self, index: usize) -> Option<&[u8]> {
        self.bindings
            .get(index)
            .map(|binding| self.heap.slice(binding.region))
    }

    /// Take ownership of the screens and draw `surfaces` immediately.
    ///
    /// Does nothing if already in the foreground. If a buffer cannot be
    /// allocated, everything allocated for this acquisition is released and
    /// the presenter stays in the background.
    pub fn acquire_foreground(&mut self, surfaces: &[Surface]) -> Result<()> {
        if self.foreground {
            return Ok(());
        }

        self.heap.record_state(self.tag);
        self.driver.init();

        let mut bindings: Vec<Binding> = Vec::with_capacity(surfaces.len());
        for surface in surfaces {
            let screen = surface.screen();
            let size = self.driver.buffer_size(screen);
            let region = match self.heap.alloc(size, BUFFER_ALIGN) {
                Ok(region) => region,
                Err(e) => {
                    tracing::error!(screen = screen.name(), size, "screen buffer allocation failed");
                    for binding in &bindings {
                        self.driver.enable(binding.screen, false);
                    }
                    self.heap.free_by_state(self.tag);
                    return Err(e);
                }
            };
            self.driver.set_buffer(screen, region);
            self.driver.enable(screen, true);
            bindings.push(Binding { screen, region });
        }

        self.bindings = bindings;
        self.foreground = true;
        tracing::info!(
            screens = self.bindings.len(),
            heap_used = self.heap.used(),
            "acquired foreground"
        );

        self.redraw(surfaces);
        Ok(())
    }

    /// Give up the screens and free their buffers. Does nothing if already
    /// in the background.
    pub fn release_foreground(&mut self) {
        if !self.foreground {
            return;
        }

        self.heap.free_by_state(self.tag);
        self.bindings.clear();
        self.foreground = false;
        tracing::info!("released foreground");
    }

    /// Draw every surface onto its screen and flip. No-op in the background.
    pub fn redraw(&mut self, surfaces: &[Surface]) {
        if !self.foreground {
            tracing::trace!("redraw skipped in background");
            return;
        }

        let mut line = String::new();
        for (surface, binding) in surfaces.iter().zip(&self.bindings) {
            let pixels = self.heap.slice_mut(binding.region);
            self.driver.clear_buffer(binding.screen, pixels, CLEAR_COLOR);

            for row in 0..surface.rows() {
                line.clear();
                if let Some(cells) = surface.row(row) {
                    line.extend(cells);
                }
                self.driver.put_text(binding.screen, pixels, 0, row, &line);
            }

            self.driver.flush_range(pixels);
            self.driver.flip_buffers(binding.screen, pixels);
        }
        self.redraws += 1;
    }
}
