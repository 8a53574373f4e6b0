//! File extent management
//!
//! Extents represent contiguous data regions on disk.

use crate::utils::sector;

/// File extent (contiguous data region)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Starting LBA
    pub lba: u32,

    /// Length in bytes
    pub length: u32,
}

impl Extent {
    /// Create new extent
    pub fn new(lba: u32, length: u32) -> Self {
        Self { lba, length }
    }

    /// Number of device blocks covering the extent
    pub fn block_count(&self, block_size: usize) -> u64 {
        sector::blocks_for_bytes(self.length as u64, block_size)
    }

    /// End LBA (exclusive)
    pub fn end_lba(&self, block_size: usize) -> u64 {
        self.lba as u64 + self.block_count(block_size)
    }

    /// Does the extent hold no data?
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
