//! Screen driver that records every call, for tests and diagnostics

use super::{Region, ScreenDriver};
use crate::core::ScreenId;

/// One recorded driver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Init,
    SetBuffer { screen: ScreenId, offset: usize, len: usize },
    Enable { screen: ScreenId, enabled: bool },
    ClearBuffer { screen: ScreenId, color: u32 },
    PutText { screen: ScreenId, col: usize, row: usize, text: String },
    FlushRange { len: usize },
    FlipBuffers { screen: ScreenId },
}

#[derive(Debug, Default)]
pub struct RecordingDriver {
    buffer_size: usize,
    calls: Vec<DriverCall>,
}

impl RecordingDriver {
    /// Every screen reports `buffer_size` bytes
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DriverCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count(&self, pred: impl Fn(&DriverCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl ScreenDriver for RecordingDriver {
    fn init(&mut self) {
        self.calls.push(DriverCall::Init);
    }

    fn buffer_size(&self, _screen: ScreenId) -> usize {
        self.buffer_size
    }

    fn set_buffer(&mut self, screen: ScreenId, region: Region) {
        self.calls.push(DriverCall::SetBuffer {
            screen,
            offset: region.offset(),
            len: region.len(),
        });
    }

    fn enable(&mut self, screen: ScreenId, enabled: bool) {
        self.calls.push(DriverCall::Enable { screen, enabled });
    }

    fn clear_buffer(&mut self, screen: ScreenId, _pixels: &mut [u8], color: u32) {
        self.calls.push(DriverCall::ClearBuffer { screen, color });
    }

    fn put_text(&mut self, screen: ScreenId, _pixels: &mut [u8], col: usize, row: usize, text: &str) {
        self.calls.push(DriverCall::PutText {
            screen,
            col,
            row,
            text: text.to_string(),
        });
    }

    fn flush_range(&mut self, pixels: &[u8]) {
        self.calls.push(DriverCall::FlushRange { len: pixels.len() });
    }

    fn flip_buffers(&mut self, screen: ScreenId, _pixels: &[u8]) {
        self.calls.push(DriverCall::FlipBuffers { screen });
    }
}
