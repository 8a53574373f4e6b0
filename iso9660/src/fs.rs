//! Read-only filesystem provider
//!
//! [`IsoFs`] is the driver surface: it borrows a block device, scans the
//! volume once in [`IsoFs::initialize`], and then serves `open` / `open_dir`
//! requests. Failures are reported as `None` (or `false` for
//! initialization); the cause is logged at debug level.
//!
//! The driver keeps no cache. After initialization its only state is the
//! immutable root record and name encoding.

use crate::config::MountOptions;
use crate::device::BlockDevice;
use crate::directory::{self, record::DirEntry};
use crate::error::{Iso9660Error, Result};
use crate::file::{self, metadata::DirListingEntry, reader::FileHandle};
use crate::types::{EntryKind, StringEncoding, VolumeInfo};
use crate::volume;
use alloc::string::String;
use alloc::vec::Vec;

/// Requested access mode for [`FsProvider::open`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read only
    Read,
    /// Write only
    Write,
    /// Read and write
    ReadWrite,
    /// Append
    Append,
    /// Create or truncate
    Create,
}

/// Filesystem provider interface
pub trait FsProvider {
    /// Open a file. Returns `None` if it cannot be opened in `mode`.
    fn open(&mut self, path: &str, mode: OpenMode) -> Option<FileHandle>;

    /// Open a directory for listing.
    fn open_dir(&mut self, path: &str) -> Option<DirHandle>;
}

/// Ordered, rewindable directory listing
#[derive(Debug, Clone, Default)]
pub struct DirHandle {
    entries: Vec<DirListingEntry>,
    position: usize,
}

impl DirHandle {
    /// Wrap a listing
    pub fn new(entries: Vec<DirListingEntry>) -> Self {
        Self {
            entries,
            position: 0,
        }
    }

    /// All entries, in on-disk order
    pub fn entries(&self) -> &[DirListingEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the listing empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restart iteration from the first entry
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl Iterator for DirHandle {
    type Item = DirListingEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.position)?.clone();
        self.position += 1;
        Some(entry)
    }
}

#[derive(Debug, Clone)]
enum State {
    Uninitialized,
    Initialized(VolumeInfo),
}

/// ISO9660 driver over a borrowed block device
pub struct IsoFs<'d, D: BlockDevice + ?Sized> {
    device: &'d mut D,
    options: MountOptions,
    state: State,
}

impl<'d, D: BlockDevice + ?Sized> IsoFs<'d, D> {
    /// Create an uninitialized driver with default options
    pub fn new(device: &'d mut D) -> Self {
        Self::with_options(device, MountOptions::default())
    }

    /// Create an uninitialized driver
    pub fn with_options(device: &'d mut D, options: MountOptions) -> Self {
        Self {
            device,
            options,
            state: State::Uninitialized,
        }
    }

    /// Scan the volume descriptors and fix the root directory and encoding
    ///
    /// Returns `true` once the volume is usable. Calling it again after
    /// success is a no-op; after a failure the driver stays not-ready and
    /// the scan may be retried.
    pub fn initialize(&mut self) -> bool {
        if let State::Initialized(_) = self.state {
            return true;
        }

        match volume::mount(&mut *self.device, &self.options) {
            Ok(info) => {
                self.state = State::Initialized(info);
                true
            }
            Err(err) => {
                log::debug!("initialize failed: {}", err);
                false
            }
        }
    }

    /// Has `initialize` succeeded?
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Initialized(_))
    }

    /// Mounted volume information
    pub fn volume(&self) -> Option<&VolumeInfo> {
        match &self.state {
            State::Initialized(info) => Some(info),
            State::Uninitialized => None,
        }
    }

    /// Root directory record of the selected descriptor
    pub fn root(&self) -> Option<&DirEntry> {
        self.volume().map(|info| &info.root)
    }

    /// Encoding used for file names
    pub fn encoding(&self) -> Option<StringEncoding> {
        self.volume().map(|info| info.encoding)
    }

    /// Options the driver was created with
    pub fn options(&self) -> &MountOptions {
        &self.options
    }

    /// Resolve `path` to a record of the given kind
    pub fn lookup(&mut self, path: &str, kind: EntryKind) -> Option<DirEntry> {
        report(path, self.try_lookup(path, kind))
    }

    /// List a directory record as `(record, name)` pairs
    pub fn read_dir(&mut self, entry: &DirEntry) -> Option<Vec<(DirEntry, String)>> {
        let result = match &self.state {
            State::Initialized(info) => {
                directory::read_dir(&mut *self.device, info.encoding, &self.options, entry)
            }
            State::Uninitialized => Err(Iso9660Error::NotInitialized),
        };
        report("<record>", result)
    }

    /// Read a file record into memory
    pub fn read(&mut self, entry: &DirEntry) -> Option<Vec<u8>> {
        let result = match &self.state {
            State::Initialized(info) => file::read_file(&mut *self.device, info, entry),
            State::Uninitialized => Err(Iso9660Error::NotInitialized),
        };
        report("<record>", result)
    }

    fn try_lookup(&mut self, path: &str, kind: EntryKind) -> Result<DirEntry> {
        match &self.state {
            State::Initialized(info) => {
                directory::find_entry(&mut *self.device, info, &self.options, path, kind)
            }
            State::Uninitialized => Err(Iso9660Error::NotInitialized),
        }
    }

    fn try_open(&mut self, path: &str, mode: OpenMode) -> Result<FileHandle> {
        if mode != OpenMode::Read {
            return Err(Iso9660Error::UnsupportedMode);
        }

        let entry = self.try_lookup(path, EntryKind::File)?;
        let info = match &self.state {
            State::Initialized(info) => info,
            State::Uninitialized => return Err(Iso9660Error::NotInitialized),
        };
        let data = file::read_file(&mut *self.device, info, &entry)?;
        Ok(FileHandle::new(data, entry.to_stat()))
    }

    fn try_open_dir(&mut self, path: &str) -> Result<DirHandle> {
        let entry = self.try_lookup(path, EntryKind::Directory)?;
        let encoding = match &self.state {
            State::Initialized(info) => info.encoding,
            State::Uninitialized => return Err(Iso9660Error::NotInitialized),
        };

        let items = directory::read_dir(&mut *self.device, encoding, &self.options, &entry)?;
        let entries = items
            .into_iter()
            .map(|(record, name)| record.to_listing_entry(name))
            .collect();

        Ok(DirHandle::new(entries))
    }
}

impl<'d, D: BlockDevice + ?Sized> FsProvider for IsoFs<'d, D> {
    fn open(&mut self, path: &str, mode: OpenMode) -> Option<FileHandle> {
        report(path, self.try_open(path, mode))
    }

    fn open_dir(&mut self, path: &str) -> Option<DirHandle> {
        report(path, self.try_open_dir(path))
    }
}

fn report<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("{}: {}", what, err);
            None
        }
    }
}
