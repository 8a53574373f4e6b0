//! Primary Volume Descriptor parsing
//!
//! The Primary Volume Descriptor (PVD) is always present and describes
//! the basic ISO9660 filesystem structure. Supplementary descriptors share
//! the same layout, so both decode through [`VolumeDescriptor`].
//!
//! Fields are decoded from fixed byte offsets (ECMA-119 8.4) rather than by
//! overlaying a packed struct on the sector buffer.

use crate::error::{Iso9660Error, Result};
use crate::types::VolumeDescriptorType;
use super::VolumeDescriptorHeader;

/// Offset of the system identifier
const SYSTEM_ID_OFFSET: usize = 8;
/// Offset of the volume identifier
const VOLUME_ID_OFFSET: usize = 40;
/// Offset of the volume space size (both-endian 32)
const VOLUME_SPACE_SIZE_OFFSET: usize = 80;
/// Offset of the escape sequences (supplementary descriptors only)
const ESCAPE_SEQUENCES_OFFSET: usize = 88;
/// Offset of the logical block size (both-endian 16)
const LOGICAL_BLOCK_SIZE_OFFSET: usize = 128;
/// Offset of the embedded root directory record
pub const ROOT_RECORD_OFFSET: usize = 156;
/// Size of the embedded root directory record
pub const ROOT_RECORD_SIZE: usize = 34;

/// Bytes needed to decode every field used here
pub const DESCRIPTOR_MIN_SIZE: usize = ROOT_RECORD_OFFSET + ROOT_RECORD_SIZE;

/// Primary or supplementary volume descriptor
///
/// See ECMA-119 8.4 (primary) and 8.5 (supplementary).
#[derive(Debug, Clone)]
pub struct VolumeDescriptor {
    /// Primary or Supplementary
    pub descriptor_type: VolumeDescriptorType,

    /// Descriptor version byte
    pub version: u8,

    /// System identifier (32 bytes, encoding depends on descriptor type)
    pub system_id: [u8; 32],

    /// Volume identifier (32 bytes, encoding depends on descriptor type)
    pub volume_id: [u8; 32],

    /// Volume space size (both-endian 32-bit)
    pub volume_space_size: BothEndian32,

    /// Escape sequences (Joliet level markers on supplementary descriptors)
    pub escape_sequences: [u8; 32],

    /// Logical block size (both-endian 16-bit, usually 2048)
    pub logical_block_size: BothEndian16,

    /// Root directory record (34 bytes)
    pub root_directory_record: [u8; ROOT_RECORD_SIZE],
}

/// Both-endian 32-bit value (stored as LE then BE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BothEndian32 {
    /// Little-endian value
    pub le: [u8; 4],
    /// Big-endian value
    pub be: [u8; 4],
}

impl BothEndian32 {
    /// Decode from the first 8 bytes of `data`
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let raw = data.get(..8)?;
        Some(Self {
            le: [raw[0], raw[1], raw[2], raw[3]],
            be: [raw[4], raw[5], raw[6], raw[7]],
        })
    }

    /// Get value (uses little-endian)
    pub fn get(&self) -> u32 {
        u32::from_le_bytes(self.le)
    }

    /// Do both copies hold the same value?
    pub fn is_consistent(&self) -> bool {
        u32::from_le_bytes(self.le) == u32::from_be_bytes(self.be)
    }
}

/// Both-endian 16-bit value (stored as LE then BE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BothEndian16 {
    /// Little-endian value
    pub le: [u8; 2],
    /// Big-endian value
    pub be: [u8; 2],
}

impl BothEndian16 {
    /// Decode from the first 4 bytes of `data`
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let raw = data.get(..4)?;
        Some(Self {
            le: [raw[0], raw[1]],
            be: [raw[2], raw[3]],
        })
    }

    /// Get value (uses little-endian)
    pub fn get(&self) -> u16 {
        u16::from_le_bytes(self.le)
    }

    /// Do both copies hold the same value?
    pub fn is_consistent(&self) -> bool {
        u16::from_le_bytes(self.le) == u16::from_be_bytes(self.be)
    }
}

fn array<const N: usize>(data: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&data[offset..offset + N]);
    out
}

/// Parse a primary or supplementary descriptor from sector data
pub fn parse(data: &[u8]) -> Result<VolumeDescriptor> {
    if data.len() < DESCRIPTOR_MIN_SIZE {
        return Err(Iso9660Error::InvalidSignature);
    }

    let header = VolumeDescriptorHeader::parse(data).ok_or(Iso9660Error::InvalidSignature)?;
    if !header.has_valid_identifier() {
        return Err(Iso9660Error::InvalidSignature);
    }

    let descriptor_type = match header.descriptor_type() {
        Some(t @ (VolumeDescriptorType::Primary | VolumeDescriptorType::Supplementary)) => t,
        _ => return Err(Iso9660Error::InvalidSignature),
    };

    // Length checked above, both-endian decodes cannot fail here.
    let volume_space_size = BothEndian32::from_bytes(&data[VOLUME_SPACE_SIZE_OFFSET..])
        .ok_or(Iso9660Error::InvalidSignature)?;
    let logical_block_size = BothEndian16::from_bytes(&data[LOGICAL_BLOCK_SIZE_OFFSET..])
        .ok_or(Iso9660Error::InvalidSignature)?;

    Ok(VolumeDescriptor {
        descriptor_type,
        version: header.version,
        system_id: array(data, SYSTEM_ID_OFFSET),
        volume_id: array(data, VOLUME_ID_OFFSET),
        volume_space_size,
        escape_sequences: array(data, ESCAPE_SEQUENCES_OFFSET),
        logical_block_size,
        root_directory_record: array(data, ROOT_RECORD_OFFSET),
    })
}
