//! File metadata extraction
//!
//! Packs a directory record into the stat view handed out with file and
//! directory handles.

use crate::directory::record::DirEntry;
use alloc::string::String;

/// Metadata of a file or directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stat {
    /// Entry is a directory
    pub is_directory: bool,

    /// Always false: the volume is read-only
    pub is_writable: bool,

    /// Data length in bytes
    pub size: u64,

    /// Modification time (Unix seconds)
    pub mtime: i64,

    /// Access time (Unix seconds)
    pub atime: i64,

    /// Creation time (Unix seconds)
    pub ctime: i64,
}

/// One named entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListingEntry {
    /// Decoded name, version suffix removed
    pub name: String,

    /// Entry metadata
    pub stat: Stat,
}

impl DirEntry {
    /// Metadata view of this record
    ///
    /// ISO9660 keeps a single recording timestamp, so all three times share
    /// it. An invalid timestamp reads as the epoch.
    pub fn to_stat(&self) -> Stat {
        let time = self.recording_datetime.to_unix_timestamp().unwrap_or(0);
        Stat {
            is_directory: self.is_directory(),
            is_writable: false,
            size: self.data_length as u64,
            mtime: time,
            atime: time,
            ctime: time,
        }
    }

    /// Listing entry for this record under `name`
    pub fn to_listing_entry(&self, name: String) -> DirListingEntry {
        DirListingEntry {
            name,
            stat: self.to_stat(),
        }
    }

    /// Is this hidden?
    pub fn is_hidden(&self) -> bool {
        self.flags.hidden
    }
}

impl DirListingEntry {
    /// Get file extension
    pub fn extension(&self) -> Option<&str> {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}
