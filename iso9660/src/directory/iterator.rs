//! Directory record iteration
//!
//! Walks the records packed into one batch of directory blocks. Records never
//! span a block boundary; a zero length byte marks padding up to the next
//! boundary. Malformed records are reported (as `Err`) and stepped over by
//! their declared length, so one bad record never hides the ones after it.

use crate::directory::record::DirEntry;
use crate::error::{Iso9660Error, Result};
use crate::utils::sector;

/// Iterator over the records of a directory batch buffer
///
/// Yields the byte offset of each record within the buffer together with the
/// parse result.
pub struct RecordIter<'b> {
    buffer: &'b [u8],
    block_size: usize,
    offset: usize,
}

impl<'b> RecordIter<'b> {
    /// Iterate `buffer`, which must start on a block boundary
    pub fn new(buffer: &'b [u8], block_size: usize) -> Self {
        Self {
            buffer,
            block_size: block_size.max(1),
            offset: 0,
        }
    }
}

impl<'b> Iterator for RecordIter<'b> {
    type Item = (usize, Result<DirEntry>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Check if we've consumed the batch
            if self.offset >= self.buffer.len() {
                return None;
            }

            let start = self.offset;
            let length = self.buffer[start] as usize;

            // Zero-length record: rest of the block is padding
            if length == 0 {
                self.offset = sector::next_block_boundary(start, self.block_size);
                continue;
            }

            // Declared length runs past the data we have
            if start + length > self.buffer.len() {
                self.offset = sector::next_block_boundary(start, self.block_size);
                return Some((start, Err(Iso9660Error::InvalidDirectoryRecord)));
            }

            self.offset = start + length;
            return Some((start, DirEntry::parse(&self.buffer[start..start + length])));
        }
    }
}
