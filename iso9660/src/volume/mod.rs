//! Volume descriptor parsing
//!
//! ISO9660 volume descriptors start at sector 16 and describe the filesystem layout.
//! Multiple descriptors may be present (Primary, Supplementary, Boot Record).
//! The scan keeps the primary and the supplementary (Joliet) descriptor and
//! decides which root directory and name encoding the volume is read with.

pub mod primary;
pub mod supplementary;

use crate::config::MountOptions;
use crate::device::BlockDevice;
use crate::directory::record::DirEntry;
use crate::error::{Iso9660Error, Result};
use crate::types::{StringEncoding, VolumeDescriptorType, VolumeInfo, VOLUME_HEADER_SIZE};
use crate::utils::string;
use alloc::vec;
use primary::VolumeDescriptor;

/// Mount an ISO9660 volume from a block device
///
/// Reads up to `options.max_descriptors` descriptors starting at
/// `options.descriptor_start`, one block each, and builds [`VolumeInfo`].
/// A short read or the set terminator ends the scan; blocks without the
/// "CD001" identifier are skipped.
///
/// When a supplementary descriptor was seen (and `prefer_joliet` is set) its
/// root record and UTF-16BE names win; otherwise the primary descriptor is
/// used with ASCII names. A supplementary root record that does not decode
/// to a directory falls back to the primary one.
///
/// # Arguments
/// * `device` - Block device containing the ISO
/// * `options` - Scan configuration
///
/// # Returns
/// Parsed volume information, or `NoPrimaryVolume` if the sequence holds no
/// primary descriptor
pub fn mount<D: BlockDevice + ?Sized>(
    device: &mut D,
    options: &MountOptions,
) -> Result<VolumeInfo> {
    let block_size = device.block_size();
    if block_size < VOLUME_HEADER_SIZE {
        return Err(Iso9660Error::BlockSizeTooSmall);
    }

    let mut block = vec![0u8; block_size];
    let mut primary: Option<VolumeDescriptor> = None;
    let mut supplementary: Option<VolumeDescriptor> = None;

    for index in 0..options.max_descriptors {
        let lba = options.descriptor_start + index as u64;
        if device.read(lba, &mut block, 1) != 1 {
            log::debug!("descriptor scan stopped: short read at LBA {}", lba);
            break;
        }

        let header = match VolumeDescriptorHeader::parse(&block) {
            Some(header) if header.has_valid_identifier() => header,
            _ => {
                log::trace!("LBA {}: no CD001 identifier, skipping", lba);
                continue;
            }
        };

        match header.descriptor_type() {
            Some(VolumeDescriptorType::Terminator) => {
                log::debug!("LBA {}: descriptor set terminator", lba);
                break;
            }
            Some(VolumeDescriptorType::Primary) => match primary::parse(&block) {
                Ok(pvd) => {
                    log::debug!("LBA {}: primary volume descriptor", lba);
                    primary = Some(pvd);
                }
                Err(err) => log::debug!("LBA {}: unusable primary descriptor: {}", lba, err),
            },
            Some(VolumeDescriptorType::Supplementary) => match primary::parse(&block) {
                Ok(svd) => {
                    log::debug!(
                        "LBA {}: supplementary volume descriptor (joliet level {:?})",
                        lba,
                        svd.joliet_level()
                    );
                    supplementary = Some(svd);
                }
                Err(err) => log::debug!("LBA {}: unusable supplementary descriptor: {}", lba, err),
            },
            other => {
                log::trace!("LBA {}: ignoring descriptor type {:?}", lba, other);
            }
        }
    }

    let primary = primary.ok_or(Iso9660Error::NoPrimaryVolume)?;
    let has_joliet = supplementary.is_some();

    let primary_root = DirEntry::parse(&primary.root_directory_record)?;
    if !primary_root.is_directory() {
        log::warn!("root directory record is not flagged as a directory");
    }

    let joliet = match supplementary {
        Some(svd) if options.prefer_joliet => match usable_root(&svd) {
            Some(root) => Some((svd, root)),
            None => {
                log::debug!("supplementary root record unusable, falling back to primary");
                None
            }
        },
        _ => None,
    };

    let (selected, root, encoding) = match joliet {
        Some((svd, root)) => (svd, root, StringEncoding::Utf16Be),
        None => (primary, primary_root.clone(), StringEncoding::Ascii),
    };

    let volume_id = string::decode(&selected.volume_id, encoding)
        .trim_end_matches(|c: char| c == ' ' || c == '\0')
        .into();

    let info = VolumeInfo {
        volume_id,
        root,
        encoding,
        logical_block_size: selected.logical_block_size.get(),
        volume_space_size: selected.volume_space_size.get(),
        has_joliet,
        joliet_level: selected.joliet_level(),
        has_rock_ridge: detect_rock_ridge(device, &primary_root, options),
    };

    log::info!(
        "mounted '{}': {} names, root at LBA {} ({} bytes)",
        info.volume_id,
        if encoding == StringEncoding::Utf16Be { "joliet" } else { "iso9660" },
        info.root.extent_lba,
        info.root.data_length
    );

    Ok(info)
}

/// Root record of a supplementary descriptor, if it decodes to a directory
fn usable_root(svd: &VolumeDescriptor) -> Option<DirEntry> {
    DirEntry::parse(&svd.root_directory_record)
        .ok()
        .filter(DirEntry::is_directory)
}

/// Look at the primary root "." record for a SUSP indicator or Rock Ridge entry
///
/// Mastering tools write SUSP entries into the primary tree only, so the
/// detection ignores which tree was selected for names.
fn detect_rock_ridge<D: BlockDevice + ?Sized>(
    device: &mut D,
    primary_root: &DirEntry,
    options: &MountOptions,
) -> bool {
    let listing =
        match crate::directory::read_dir(device, StringEncoding::Ascii, options, primary_root) {
            Ok(listing) => listing,
            Err(err) => {
                log::debug!("rock ridge detection failed: {}", err);
                return false;
            }
        };

    listing
        .iter()
        .find(|(_, name)| name == ".")
        .and_then(|(entry, _)| entry.system_use.as_ref())
        .map(|area| area.has_extensions())
        .unwrap_or(false)
}

/// Volume Descriptor header (first 7 bytes of each descriptor)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDescriptorHeader {
    /// Type code (0=boot, 1=primary, 2=supplementary, 255=terminator)
    pub type_code: u8,

    /// Standard identifier "CD001"
    pub identifier: [u8; 5],

    /// Version (always 1)
    pub version: u8,
}

impl VolumeDescriptorHeader {
    /// CD001 magic bytes
    pub const MAGIC: &'static [u8; 5] = b"CD001";

    /// Decode the header at the start of `data`
    pub fn parse(data: &[u8]) -> Option<Self> {
        let raw = data.get(..VOLUME_HEADER_SIZE)?;
        Some(Self {
            type_code: raw[0],
            identifier: [raw[1], raw[2], raw[3], raw[4], raw[5]],
            version: raw[6],
        })
    }

    /// Check the standard identifier
    ///
    /// The version byte is not checked; some mastering tools write 2 for
    /// enhanced descriptors.
    pub fn has_valid_identifier(&self) -> bool {
        &self.identifier == Self::MAGIC
    }

    /// Descriptor type, `None` for reserved codes
    pub fn descriptor_type(&self) -> Option<VolumeDescriptorType> {
        VolumeDescriptorType::from_code(self.type_code)
    }
}
