//! Common types and constants for ISO9660

use crate::directory::record::DirEntry;
use alloc::string::String;

/// Volume descriptor set starts at sector 16
pub const VOLUME_DESCRIPTOR_START: u64 = 16;

/// Upper bound on descriptors scanned before giving up
pub const MAX_VOLUME_DESCRIPTORS: usize = 256;

/// Blocks read per batch when listing a directory
pub const DIRECTORY_BATCH_BLOCKS: usize = 10;

/// Size of the volume descriptor header (type + "CD001" + version)
pub const VOLUME_HEADER_SIZE: usize = 7;

/// Volume descriptor type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VolumeDescriptorType {
    /// Boot Record (El Torito)
    BootRecord = 0,
    /// Primary Volume Descriptor
    Primary = 1,
    /// Supplementary Volume Descriptor (Joliet)
    Supplementary = 2,
    /// Volume Partition Descriptor
    Partition = 3,
    /// Volume Descriptor Set Terminator
    Terminator = 255,
}

impl VolumeDescriptorType {
    /// Map a raw type code, `None` for reserved codes
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::BootRecord),
            1 => Some(Self::Primary),
            2 => Some(Self::Supplementary),
            3 => Some(Self::Partition),
            255 => Some(Self::Terminator),
            _ => None,
        }
    }
}

/// Encoding of directory record file identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringEncoding {
    /// Byte-for-byte (primary volume descriptor)
    #[default]
    Ascii,
    /// Big-endian UTF-16 (Joliet supplementary volume descriptor)
    Utf16Be,
}

/// Kind of entry a path lookup must end on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

impl EntryKind {
    /// Does `entry` have this kind?
    pub fn matches(self, entry: &DirEntry) -> bool {
        match self {
            Self::File => !entry.is_directory(),
            Self::Directory => entry.is_directory(),
        }
    }
}

/// Parsed volume information
///
/// Built once by [`crate::volume::mount`] and never modified afterwards.
#[derive(Debug, Clone)]
pub struct VolumeInfo {
    /// Volume identifier, trimmed and decoded under `encoding`
    pub volume_id: String,

    /// Root directory record of the selected descriptor
    pub root: DirEntry,

    /// Encoding of file identifiers below `root`
    pub encoding: StringEncoding,

    /// Logical block size declared by the descriptor (usually 2048)
    pub logical_block_size: u16,

    /// Volume space size (total logical blocks)
    pub volume_space_size: u32,

    /// Whether a supplementary descriptor was found
    pub has_joliet: bool,

    /// Joliet level from the descriptor escape sequences (1..=3)
    pub joliet_level: Option<u8>,

    /// Whether the root directory carries SUSP / Rock Ridge entries
    pub has_rock_ridge: bool,
}

impl VolumeInfo {
    /// Root directory extent location (LBA)
    pub fn root_extent_lba(&self) -> u32 {
        self.root.extent_lba
    }

    /// Root directory extent length (bytes)
    pub fn root_extent_len(&self) -> u32 {
        self.root.data_length
    }
}
