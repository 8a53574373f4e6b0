//! ISO9660 Filesystem Implementation
//!
//! A `no_std` read-only ISO9660 filesystem provider with Joliet name support.
//!
//! # Overview
//!
//! ISO9660 is the standard filesystem for CD-ROMs, DVDs and Blu-ray game
//! discs. This crate provides:
//! - Volume descriptor scanning (Primary, Supplementary/Joliet)
//! - Directory listing with batched extent reads
//! - Case-insensitive path resolution
//! - Whole-file reads from extent-based storage
//! - Detection (not interpretation) of SUSP / Rock Ridge system use areas
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Device layer** - [`BlockDevice`] contract, adapter for `gpt_disk_io::BlockIo`
//! 2. **Volume layer** - Scans volume descriptors from sector 16, picks root and encoding
//! 3. **Directory layer** - Parses directory records and resolves paths
//! 4. **File layer** - Reads file data from extents
//! 5. **Provider layer** - [`IsoFs`], the `open` / `open_dir` surface
//!
//! # Usage
//!
//! ```ignore
//! use iso9660::{BlockIoDevice, FsProvider, IsoFs, OpenMode};
//!
//! let mut device = BlockIoDevice::new(block_io);
//! let mut fs = IsoFs::new(&mut device);
//! if !fs.initialize() {
//!     return;
//! }
//!
//! let mut param = fs.open("/PS3_GAME/PARAM.SFO", OpenMode::Read).unwrap();
//! let bytes = param.as_bytes();
//!
//! for entry in fs.open_dir("/PS3_GAME").unwrap() {
//!     // entry.name, entry.stat
//! }
//! ```
//!
//! The layered functions ([`mount`], [`find_entry`], [`read_dir`],
//! [`read_file`]) are public too and report failures as [`Iso9660Error`].

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod device;
pub mod directory;
pub mod error;
pub mod extensions;
pub mod file;
pub mod fs;
pub mod types;
pub mod utils;
pub mod volume;

pub use config::MountOptions;
pub use device::{BlockDevice, BlockIoDevice};
pub use directory::record::DirEntry;
pub use error::{Iso9660Error, Result};
pub use file::metadata::{DirListingEntry, Stat};
pub use file::reader::FileHandle;
pub use fs::{DirHandle, FsProvider, IsoFs, OpenMode};
pub use types::{EntryKind, StringEncoding, VolumeInfo};

// High-level API exports
pub use directory::{find_entry, read_dir};
pub use file::read_file;
pub use volume::mount;
