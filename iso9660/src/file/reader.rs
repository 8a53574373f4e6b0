//! File reader implementation
//!
//! An opened file is fully read into memory; the handle is a cursor over
//! those bytes.

use super::metadata::Stat;
use alloc::vec::Vec;

/// Read-only, in-memory file handle
#[derive(Debug, Clone)]
pub struct FileHandle {
    data: Vec<u8>,
    stat: Stat,
    position: u64,
}

impl FileHandle {
    /// Create new file handle over `data`
    pub fn new(data: Vec<u8>, stat: Stat) -> Self {
        Self {
            data,
            stat,
            position: 0,
        }
    }

    /// Read bytes from current position
    ///
    /// Returns the number of bytes copied; 0 at end of file.
    pub fn read(&mut self, buffer: &mut [u8]) -> usize {
        let start = usize::try_from(self.position)
            .unwrap_or(usize::MAX)
            .min(self.data.len());
        let count = buffer.len().min(self.data.len() - start);
        buffer[..count].copy_from_slice(&self.data[start..start + count]);
        self.position += count as u64;
        count
    }

    /// Seek to position
    ///
    /// Positions past the end are allowed; reads there return 0.
    pub fn seek(&mut self, pos: u64) {
        self.position = pos;
    }

    /// Get current position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Get file size
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Metadata of the opened entry
    pub fn stat(&self) -> Stat {
        self.stat
    }

    /// Whole file contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the file contents
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(feature = "std")]
impl std::io::Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(FileHandle::read(self, buf))
    }
}

#[cfg(feature = "std")]
impl std::io::Seek for FileHandle {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        let target = match pos {
            std::io::SeekFrom::Start(offset) => Some(offset),
            std::io::SeekFrom::End(delta) => self.size().checked_add_signed(delta),
            std::io::SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
        };

        match target {
            Some(offset) => {
                self.position = offset;
                Ok(offset)
            }
            None => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "seek to a negative position",
            )),
        }
    }
}
