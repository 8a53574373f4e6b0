//! Mount configuration.
//!
//! Runtime knobs for descriptor scanning and directory reads.

use crate::types::{DIRECTORY_BATCH_BLOCKS, MAX_VOLUME_DESCRIPTORS, VOLUME_DESCRIPTOR_START};

/// Options applied when mounting a volume.
#[derive(Debug, Clone)]
pub struct MountOptions {
    /// First LBA of the volume descriptor sequence.
    pub descriptor_start: u64,
    /// Maximum number of descriptor blocks scanned.
    pub max_descriptors: usize,
    /// Maximum number of blocks read per directory batch.
    pub dir_batch_blocks: usize,
    /// Use the supplementary (Joliet) descriptor when present.
    pub prefer_joliet: bool,
    /// Reject directory records whose little/big-endian copies disagree.
    pub strict_both_endian: bool,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            descriptor_start: VOLUME_DESCRIPTOR_START,
            max_descriptors: MAX_VOLUME_DESCRIPTORS,
            dir_batch_blocks: DIRECTORY_BATCH_BLOCKS,
            prefer_joliet: true,
            strict_both_endian: false,
        }
    }
}

impl MountOptions {
    /// Options that only look at the primary descriptor (plain ISO9660 names).
    pub fn primary_only() -> Self {
        Self {
            prefer_joliet: false,
            ..Default::default()
        }
    }

    /// Set the first descriptor LBA.
    pub fn descriptor_start(mut self, lba: u64) -> Self {
        self.descriptor_start = lba;
        self
    }

    /// Set the descriptor scan limit.
    pub fn max_descriptors(mut self, count: usize) -> Self {
        self.max_descriptors = count;
        self
    }

    /// Set the directory batch size in blocks.
    pub fn dir_batch_blocks(mut self, blocks: usize) -> Self {
        self.dir_batch_blocks = blocks;
        self
    }

    /// Enable or disable Joliet selection.
    pub fn prefer_joliet(mut self, enabled: bool) -> Self {
        self.prefer_joliet = enabled;
        self
    }

    /// Enable or disable both-endian consistency checks.
    pub fn strict_both_endian(mut self, enabled: bool) -> Self {
        self.strict_both_endian = enabled;
        self
    }

    /// Batch size actually used (never zero).
    pub(crate) fn batch_blocks(&self) -> usize {
        self.dir_batch_blocks.max(1)
    }
}
