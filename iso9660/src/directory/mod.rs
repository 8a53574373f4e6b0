//! Directory record parsing and navigation

pub mod flags;
pub mod iterator;
pub mod path;
pub mod record;

pub use path::find_entry;

use crate::config::MountOptions;
use crate::device::BlockDevice;
use crate::error::{Iso9660Error, Result};
use crate::types::StringEncoding;
use crate::utils::string;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use iterator::RecordIter;
use record::DirEntry;

/// List a directory
///
/// Reads the directory extent in batches of at most
/// `options.dir_batch_blocks` blocks and returns every usable record with
/// its decoded, version-stripped name, in on-disk order. "." and ".." are
/// included.
///
/// Malformed records are skipped. A short read ends the listing early with
/// whatever was parsed so far; if not even the first block could be read the
/// call fails with `ShortRead`.
///
/// # Arguments
/// * `device` - Block device
/// * `encoding` - Encoding of file identifiers on this volume
/// * `options` - Batch size and both-endian policy
/// * `entry` - Directory record to list
pub fn read_dir<D: BlockDevice + ?Sized>(
    device: &mut D,
    encoding: StringEncoding,
    options: &MountOptions,
    entry: &DirEntry,
) -> Result<Vec<(DirEntry, String)>> {
    if !entry.is_directory() {
        return Err(Iso9660Error::NotADirectory);
    }

    let block_size = device.block_size();
    if block_size == 0 {
        return Err(Iso9660Error::BlockSizeTooSmall);
    }

    let extent = entry.extent();
    let total_blocks = extent.block_count(block_size);
    let batch_blocks = (options.batch_blocks() as u64).min(total_blocks) as usize;
    let batch_bytes = batch_blocks
        .checked_mul(block_size)
        .ok_or(Iso9660Error::ExtentTooLarge)?;

    let mut buffer = vec![0u8; batch_bytes];
    let mut entries = Vec::new();

    let end = extent.end_lba(block_size);
    let mut block = extent.lba as u64;
    let mut remaining = extent.length as u64;

    while block < end {
        let wanted = ((end - block) as usize).min(batch_blocks);
        let got = device.read(block, &mut buffer, wanted).min(wanted);

        if got == 0 && block == extent.lba as u64 {
            log::debug!("directory at LBA {}: first read failed", extent.lba);
            return Err(Iso9660Error::ShortRead);
        }

        // Only the bytes the extent actually covers hold records.
        let valid = ((got * block_size) as u64).min(remaining) as usize;
        parse_batch(&buffer[..valid], block_size, encoding, options, &mut entries);

        if got < wanted {
            log::debug!(
                "directory at LBA {}: short read at LBA {} ({} of {} blocks), listing truncated",
                extent.lba,
                block,
                got,
                wanted
            );
            break;
        }

        block += got as u64;
        remaining = remaining.saturating_sub((got * block_size) as u64);
    }

    Ok(entries)
}

/// Parse one batch buffer, appending surviving `(record, name)` pairs
fn parse_batch(
    buffer: &[u8],
    block_size: usize,
    encoding: StringEncoding,
    options: &MountOptions,
    entries: &mut Vec<(DirEntry, String)>,
) {
    for (offset, parsed) in RecordIter::new(buffer, block_size) {
        let record = match parsed {
            Ok(record) => record,
            Err(err) => {
                log::trace!("skipping record at batch offset {}: {}", offset, err);
                continue;
            }
        };

        if !record.both_endian_consistent() {
            if options.strict_both_endian {
                log::trace!("skipping record at batch offset {}: both-endian mismatch", offset);
                continue;
            }
            log::trace!("record at batch offset {}: both-endian mismatch, using LE", offset);
        }

        let decoded = string::decode_name(record.file_identifier(), encoding);
        let name = string::strip_version(&decoded);
        if name.is_empty() {
            continue;
        }

        if record.is_multi_extent() {
            log::warn!("'{}' is a multi-extent file; only the first extent is read", name);
        }

        let name = String::from(name);
        entries.push((record, name));
    }
}
