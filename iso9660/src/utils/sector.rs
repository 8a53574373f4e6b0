//! Block alignment and calculation utilities
//!
//! The device block size is whatever the collaborator reports, so nothing
//! here assumes 2048 or a power of two.

/// Number of blocks needed to hold `byte_count` bytes
pub fn blocks_for_bytes(byte_count: u64, block_size: usize) -> u64 {
    byte_count.div_ceil(block_size as u64)
}

/// Round `offset` up to the next multiple of `block_size`
///
/// An offset already on a boundary moves to the following one, which is
/// what a zero-length padding record asks for.
pub fn next_block_boundary(offset: usize, block_size: usize) -> usize {
    (offset / block_size + 1) * block_size
}
