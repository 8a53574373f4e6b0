//! Common test utilities and mock block devices

#![allow(dead_code)]

pub mod builder;
use builder::{IsoBuilder, BLOCK_SIZE};

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use iso9660::{BlockDevice, BlockIoDevice};
use std::io;

/// In-memory block device for testing
#[derive(Debug, Clone)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
    pub block_size: usize,
}

impl MemoryBlockDevice {
    /// Create a new memory block device from raw data
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            block_size: BLOCK_SIZE, // ISO9660 sector size
        }
    }

    /// Create from a file path
    pub fn from_file(path: &str) -> io::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(data))
    }

    /// Wrap in the driver's block device adapter
    pub fn into_device(self) -> BlockIoDevice<MemoryBlockDevice> {
        BlockIoDevice::new(self)
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_size as u32).expect("valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok((self.data.len() / self.block_size) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        let offset = start_lba.0 as usize * self.block_size;
        if offset + dst.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        dst.copy_from_slice(&self.data[offset..offset + dst.len()]);
        Ok(())
    }

    fn write_blocks(&mut self, _start_lba: Lba, _src: &[u8]) -> Result<(), Self::Error> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "test image is read-only",
        ))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// One `BlockDevice::read` call as seen by [`CountingDevice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCall {
    pub start_block: u64,
    pub requested: usize,
    pub returned: usize,
}

/// Records every read and can refuse blocks at or after a given LBA
pub struct CountingDevice<D: BlockDevice> {
    pub inner: D,
    pub reads: Vec<ReadCall>,
    pub fail_from: Option<u64>,
}

impl<D: BlockDevice> CountingDevice<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            reads: Vec::new(),
            fail_from: None,
        }
    }

    /// Make every block at `lba` or beyond unreadable
    pub fn fail_from(mut self, lba: u64) -> Self {
        self.fail_from = Some(lba);
        self
    }

    pub fn clear(&mut self) {
        self.reads.clear();
    }

    pub fn read_count(&self) -> usize {
        self.reads.len()
    }
}

impl<D: BlockDevice> BlockDevice for CountingDevice<D> {
    fn block_size(&self) -> usize {
        self.inner.block_size()
    }

    fn read(&mut self, start_block: u64, buffer: &mut [u8], block_count: usize) -> usize {
        let allowed = match self.fail_from {
            Some(limit) if start_block >= limit => 0,
            Some(limit) => block_count.min((limit - start_block) as usize),
            None => block_count,
        };

        let returned = if allowed == 0 {
            0
        } else {
            self.inner.read(start_block, buffer, allowed)
        };

        self.reads.push(ReadCall {
            start_block,
            requested: block_count,
            returned,
        });
        returned
    }
}

/// Build `builder` into a counting device over the in-memory image
pub fn counting(builder: IsoBuilder) -> CountingDevice<BlockIoDevice<MemoryBlockDevice>> {
    CountingDevice::new(builder.build().into_device())
}
