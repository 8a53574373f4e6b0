//! File reading and extent management

pub mod extent;
pub mod metadata;
pub mod reader;

use crate::device::BlockDevice;
use crate::directory::record::DirEntry;
use crate::error::{Iso9660Error, Result};
use crate::types::VolumeInfo;
use alloc::vec;
use alloc::vec::Vec;

/// Read file contents
///
/// Issues one read covering every block of the extent and returns exactly
/// `data_length` bytes; block padding past the end is dropped. An empty file
/// returns an empty buffer without touching the device.
///
/// An extent that ends past the volume space recorded in the descriptor is
/// rejected with `ExtentTooLarge` before anything is allocated.
///
/// # Arguments
/// * `device` - Block device
/// * `volume` - Mounted volume info
/// * `file` - File entry to read
///
/// # Returns
/// File contents, `ShortRead` if the device delivered fewer blocks than the
/// extent spans
pub fn read_file<D: BlockDevice + ?Sized>(
    device: &mut D,
    volume: &VolumeInfo,
    file: &DirEntry,
) -> Result<Vec<u8>> {
    if file.is_directory() {
        return Err(Iso9660Error::IsADirectory);
    }

    let extent = file.extent();
    if extent.is_empty() {
        return Ok(Vec::new());
    }

    let block_size = device.block_size();
    if block_size == 0 {
        return Err(Iso9660Error::BlockSizeTooSmall);
    }

    if !fits_volume(volume, extent.lba as u64, extent.block_count(block_size), block_size) {
        log::debug!(
            "file at LBA {}: {} bytes run past the end of the volume",
            extent.lba,
            extent.length
        );
        return Err(Iso9660Error::ExtentTooLarge);
    }

    let block_count =
        usize::try_from(extent.block_count(block_size)).map_err(|_| Iso9660Error::ExtentTooLarge)?;
    let buffer_len = block_count
        .checked_mul(block_size)
        .ok_or(Iso9660Error::ExtentTooLarge)?;

    let mut data = vec![0u8; buffer_len];
    let read = device.read(extent.lba as u64, &mut data, block_count);
    if read < block_count {
        log::debug!(
            "file at LBA {}: short read ({} of {} blocks)",
            extent.lba,
            read,
            block_count
        );
        return Err(Iso9660Error::ShortRead);
    }

    data.truncate(extent.length as usize);
    Ok(data)
}

/// Does `[lba, lba + blocks)` lie inside the volume space?
///
/// A descriptor that records no volume size does not bound anything.
fn fits_volume(volume: &VolumeInfo, lba: u64, blocks: u64, block_size: usize) -> bool {
    let volume_bytes = volume.volume_space_size as u64 * volume.logical_block_size as u64;
    if volume_bytes == 0 {
        return true;
    }

    (lba + blocks)
        .checked_mul(block_size as u64)
        .map_or(false, |end| end <= volume_bytes)
}
