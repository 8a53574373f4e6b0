//! Block device abstraction
//!
//! The driver reads through [`BlockDevice`], whose `read` reports how many
//! whole blocks landed in the buffer. Anything short of the requested count
//! is end-of-extent or an error, and callers treat it that way.
//!
//! [`BlockIoDevice`] adapts any `gpt_disk_io::BlockIo` (firmware block I/O,
//! in-memory images, chunked storage) to that contract.

use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// Block-addressable, read-only source of sectors
pub trait BlockDevice {
    /// Size of one block in bytes
    fn block_size(&self) -> usize;

    /// Read `block_count` blocks starting at `start_block` into `buffer`
    ///
    /// Returns the number of blocks actually read. `buffer` must hold at
    /// least `block_count * block_size()` bytes; implementations read fewer
    /// blocks when it does not.
    fn read(&mut self, start_block: u64, buffer: &mut [u8], block_count: usize) -> usize;
}

impl<D: BlockDevice + ?Sized> BlockDevice for &mut D {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn read(&mut self, start_block: u64, buffer: &mut [u8], block_count: usize) -> usize {
        (**self).read(start_block, buffer, block_count)
    }
}

/// [`BlockDevice`] over a `gpt_disk_io::BlockIo`
///
/// `start_lba` shifts every read, so an ISO stored inside a partition or at
/// an offset in a larger image can be mounted as if it began at block 0.
pub struct BlockIoDevice<B: BlockIo> {
    inner: B,
    start_lba: u64,
}

impl<B: BlockIo> BlockIoDevice<B> {
    /// Wrap a block I/O whose block 0 is the start of the ISO
    pub fn new(inner: B) -> Self {
        Self::with_offset(inner, 0)
    }

    /// Wrap a block I/O whose ISO starts at `start_lba`
    pub fn with_offset(inner: B, start_lba: u64) -> Self {
        Self { inner, start_lba }
    }

    /// Offset applied to every read
    pub fn start_lba(&self) -> u64 {
        self.start_lba
    }

    /// Borrow the wrapped block I/O
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Mutably borrow the wrapped block I/O
    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.inner
    }

    /// Unwrap the block I/O
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: BlockIo> BlockDevice for BlockIoDevice<B> {
    fn block_size(&self) -> usize {
        self.inner.block_size().to_u32() as usize
    }

    fn read(&mut self, start_block: u64, buffer: &mut [u8], block_count: usize) -> usize {
        let block_size = self.block_size();
        if block_size == 0 {
            return 0;
        }

        let count = block_count.min(buffer.len() / block_size);
        if count == 0 {
            return 0;
        }

        let lba = self.start_lba + start_block;
        if self
            .inner
            .read_blocks(Lba(lba), &mut buffer[..count * block_size])
            .is_ok()
        {
            return count;
        }

        // Batch failed: report how far the device can actually be read.
        for (done, chunk) in buffer[..count * block_size]
            .chunks_exact_mut(block_size)
            .enumerate()
        {
            if let Err(err) = self.inner.read_blocks(Lba(lba + done as u64), chunk) {
                log::debug!("block read failed at LBA {}: {:?}", lba + done as u64, err);
                return done;
            }
        }

        count
    }
}
