//! Frame heap
//!
//! Bump allocator over a fixed block of memory. Allocations are never freed
//! individually: callers record a tagged state and later rewind to it,
//! releasing everything allocated since in one step.

use crate::error::{Error, Result};

/// A byte range handed out by [`FrameHeap::alloc`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    offset: usize,
    len: usize,
}

impl Region {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn end(&self) -> usize {
        self.offset + self.len
    }
}

#[derive(Debug)]
pub struct FrameHeap {
    memory: Vec<u8>,
    /// First free byte
    top: usize,
    /// Recorded `(tag, top)` pairs, oldest first
    states: Vec<(u32, usize)>,
}

fn align_up(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (value + align - 1) & !(align - 1)
}

impl FrameHeap {
    pub fn new(capacity: usize) -> Self {
        Self {
            memory: vec![0; capacity],
            top: 0,
            states: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.memory.len()
    }

    pub fn used(&self) -> usize {
        self.top
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.top
    }

    /// Remember the current top under `tag`
    pub fn record_state(&mut self, tag: u32) {
        self.states.push((tag, self.top));
    }

    /// Allocate `size` bytes aligned to `align` (a power of two)
    pub fn alloc(&mut self, size: usize, align: usize) -> Result<Region> {
        let start = align_up(self.top, align);
        match start.checked_add(size) {
            Some(end) if end <= self.capacity() => {
                self.top = end;
                Ok(Region { offset: start, len: size })
            }
            _ => Err(Error::Allocation {
                requested: size,
                available: self.capacity().saturating_sub(start),
            }),
        }
    }

    /// Rewind to the most recent state recorded under `tag`, dropping it and
    /// every state recorded after it. Returns false if `tag` is unknown.
    pub fn free_by_state(&mut self, tag: u32) -> bool {
        match self.states.iter().rposition(|&(t, _)| t == tag) {
            Some(index) => {
                self.top = self.states[index].1;
                self.states.truncate(index);
                true
            }
            None => false,
        }
    }

    pub fn slice(&self, region: Region) -> &[u8] {
        &self.memory[region.offset..region.end()]
    }

    pub fn slice_mut(&mut self, region: Region) -> &mut [u8] {
        &mut self.memory[region.offset..region.end()]
    }
}
