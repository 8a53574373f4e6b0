//! Directory Record structure
//!
//! Directory records describe files and subdirectories. A record is decoded
//! into an owned [`DirEntry`] field by field; nothing borrows the sector
//! buffer once parsing returns.
//!
//! Layout (ECMA-119 9.1):
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 1 | length of directory record |
//! | 1 | 1 | extended attribute record length |
//! | 2 | 8 | extent location (both-endian 32) |
//! | 10 | 8 | data length (both-endian 32) |
//! | 18 | 7 | recording date and time |
//! | 25 | 1 | file flags |
//! | 26 | 1 | file unit size |
//! | 27 | 1 | interleave gap size |
//! | 28 | 4 | volume sequence number (both-endian 16) |
//! | 32 | 1 | file identifier length |
//! | 33 | n | file identifier, plus one pad byte when n is even |
//! | .. | .. | system use area up to the record length |

use crate::directory::flags::FileFlags;
use crate::error::{Iso9660Error, Result};
use crate::extensions::susp::SystemUseArea;
use crate::file::extent::Extent;
use crate::utils::datetime::DateTime7;
use crate::volume::primary::{BothEndian16, BothEndian32};
use alloc::vec::Vec;

/// Directory record, decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Length of directory record (BP 1)
    pub length: u8,

    /// Extended attribute record length (BP 2)
    pub extended_attr_length: u8,

    /// Extent location, little-endian copy (BP 3-10)
    pub extent_lba: u32,

    /// Data length, little-endian copy (BP 11-18)
    pub data_length: u32,

    /// Recording date and time (BP 19-25)
    pub recording_datetime: DateTime7,

    /// File flags (BP 26)
    pub flags: FileFlags,

    /// File unit size (interleaved files) (BP 27)
    pub file_unit_size: u8,

    /// Interleave gap size (BP 28)
    pub interleave_gap: u8,

    /// Volume sequence number, little-endian copy (BP 29-32)
    pub volume_sequence: u16,

    /// Raw file identifier bytes (BP 34 onwards)
    pub file_identifier: Vec<u8>,

    /// Opaque system use area, if the record has one
    pub system_use: Option<SystemUseArea>,

    both_endian_consistent: bool,
}

impl DirEntry {
    /// Fixed part of a record, up to and including the identifier length
    pub const HEADER_SIZE: usize = 33;

    /// Minimum record length (header plus a one-byte identifier)
    pub const MIN_LENGTH: u8 = 34;

    /// Parse directory record from bytes
    ///
    /// `data` starts at the record; it may extend past the record end.
    pub fn parse(data: &[u8]) -> Result<Self> {
        // Validate minimum length
        if data.len() < Self::HEADER_SIZE {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        // Validate record length
        let length = data[0];
        if (length as usize) < Self::HEADER_SIZE || length as usize > data.len() {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        // Validate file identifier length
        let id_len = data[32] as usize;
        if id_len == 0 || id_len + Self::HEADER_SIZE > length as usize {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        let malformed = Iso9660Error::InvalidDirectoryRecord;
        let extent = BothEndian32::from_bytes(&data[2..10]).ok_or(malformed)?;
        let size = BothEndian32::from_bytes(&data[10..18]).ok_or(malformed)?;
        let sequence = BothEndian16::from_bytes(&data[28..32]).ok_or(malformed)?;

        let mut datetime = [0u8; 7];
        datetime.copy_from_slice(&data[18..25]);

        let id_start = Self::HEADER_SIZE;
        let id_end = id_start + id_len;
        let system_use_start = id_end + usize::from(id_len % 2 == 0);
        let system_use = if system_use_start < length as usize {
            Some(SystemUseArea::new(&data[system_use_start..length as usize]))
        } else {
            None
        };

        Ok(Self {
            length,
            extended_attr_length: data[1],
            extent_lba: extent.get(),
            data_length: size.get(),
            recording_datetime: DateTime7::from_bytes(&datetime),
            flags: FileFlags::from_bits(data[25]),
            file_unit_size: data[26],
            interleave_gap: data[27],
            volume_sequence: sequence.get(),
            file_identifier: data[id_start..id_end].to_vec(),
            system_use,
            both_endian_consistent: extent.is_consistent()
                && size.is_consistent()
                && sequence.is_consistent(),
        })
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.flags.directory
    }

    /// Is this a regular file?
    pub fn is_file(&self) -> bool {
        !self.flags.directory
    }

    /// Is this one piece of a multi-extent file?
    pub fn is_multi_extent(&self) -> bool {
        self.flags.not_final
    }

    /// Get file identifier bytes
    pub fn file_identifier(&self) -> &[u8] {
        &self.file_identifier
    }

    /// Data extent of this record
    pub fn extent(&self) -> Extent {
        Extent::new(self.extent_lba, self.data_length)
    }

    /// Do the little- and big-endian copies of every both-endian field agree?
    pub fn both_endian_consistent(&self) -> bool {
        self.both_endian_consistent
    }
}
