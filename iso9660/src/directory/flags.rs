//! File flags (directory record byte 25)

/// Hidden from directory listings
pub const HIDDEN: u8 = 0x01;
/// Entry is a directory
pub const DIRECTORY: u8 = 0x02;
/// Associated file
pub const ASSOCIATED: u8 = 0x04;
/// Extended attribute record describes the format
pub const RECORD: u8 = 0x08;
/// Owner/group permissions present in extended attributes
pub const PROTECTION: u8 = 0x10;
/// Not the final record of a multi-extent file
pub const MULTI_EXTENT: u8 = 0x80;

/// File flags from directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileFlags {
    /// Hidden file
    pub hidden: bool,

    /// Directory (not a file)
    pub directory: bool,

    /// Associated file
    pub associated: bool,

    /// Extended attribute record format
    pub extended_format: bool,

    /// Owner/group permissions in extended attributes
    pub extended_permissions: bool,

    /// Not final directory record for this file
    pub not_final: bool,
}

impl FileFlags {
    /// Decode the raw flag byte
    pub fn from_bits(bits: u8) -> Self {
        Self {
            hidden: bits & HIDDEN != 0,
            directory: bits & DIRECTORY != 0,
            associated: bits & ASSOCIATED != 0,
            extended_format: bits & RECORD != 0,
            extended_permissions: bits & PROTECTION != 0,
            not_final: bits & MULTI_EXTENT != 0,
        }
    }

    /// Re-encode as the raw flag byte
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.hidden {
            bits |= HIDDEN;
        }
        if self.directory {
            bits |= DIRECTORY;
        }
        if self.associated {
            bits |= ASSOCIATED;
        }
        if self.extended_format {
            bits |= RECORD;
        }
        if self.extended_permissions {
            bits |= PROTECTION;
        }
        if self.not_final {
            bits |= MULTI_EXTENT;
        }
        bits
    }
}
