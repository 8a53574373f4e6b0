//! Error types for ISO9660 operations

use core::fmt;

/// Result type for ISO9660 operations
pub type Result<T> = core::result::Result<T, Iso9660Error>;

/// Errors that can occur during ISO9660 operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iso9660Error {
    /// Device returned fewer blocks than requested
    ShortRead,

    /// Device block size cannot hold a volume descriptor header
    BlockSizeTooSmall,

    /// Invalid volume descriptor signature
    InvalidSignature,

    /// Descriptor sequence ended without a primary volume descriptor
    NoPrimaryVolume,

    /// Corrupted directory record
    InvalidDirectoryRecord,

    /// File or directory not found
    NotFound,

    /// Entry exists but is not a directory
    NotADirectory,

    /// Entry exists but is a directory
    IsADirectory,

    /// Invalid path format
    InvalidPath,

    /// Requested open mode is not supported on a read-only volume
    UnsupportedMode,

    /// Filesystem has not been initialized
    NotInitialized,

    /// Extent does not fit in addressable memory
    ExtentTooLarge,
}

impl fmt::Display for Iso9660Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortRead => write!(f, "Short read from block device"),
            Self::BlockSizeTooSmall => write!(f, "Block size too small for volume descriptor"),
            Self::InvalidSignature => write!(f, "Invalid volume descriptor signature"),
            Self::NoPrimaryVolume => write!(f, "Primary volume descriptor not found"),
            Self::InvalidDirectoryRecord => write!(f, "Corrupted directory record"),
            Self::NotFound => write!(f, "File or directory not found"),
            Self::NotADirectory => write!(f, "Not a directory"),
            Self::IsADirectory => write!(f, "Is a directory"),
            Self::InvalidPath => write!(f, "Invalid path format"),
            Self::UnsupportedMode => write!(f, "Open mode not supported on read-only volume"),
            Self::NotInitialized => write!(f, "Filesystem not initialized"),
            Self::ExtentTooLarge => write!(f, "Extent exceeds addressable size"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Iso9660Error {}
