//! Path resolution
//!
//! Walks a slash-separated path from the root directory, listing one
//! directory per segment. Nothing is cached; every lookup re-reads the
//! directories it passes through.

use super::read_dir;
use super::record::DirEntry;
use crate::config::MountOptions;
use crate::device::BlockDevice;
use crate::error::{Iso9660Error, Result};
use crate::types::{EntryKind, VolumeInfo};
use crate::utils::string;
use alloc::vec::Vec;

/// Lexically normalized path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath<'p> {
    /// Segments from the root, without "." and with ".." applied
    pub segments: Vec<&'p str>,

    /// The input ended in a separator
    pub trailing_separator: bool,
}

impl<'p> NormalizedPath<'p> {
    /// Does the path name the root directory?
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Split `path` on '/' or '\' and resolve "." and ".." lexically
///
/// Empty segments collapse, ".." at the root stays at the root and a
/// `;version` suffix on a segment is dropped, since listed names never
/// carry one.
pub fn normalize(path: &str) -> NormalizedPath<'_> {
    let mut segments = Vec::new();

    for segment in path.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(string::strip_version(other)),
        }
    }

    NormalizedPath {
        segments,
        trailing_separator: path.ends_with(is_separator),
    }
}

/// Find a file or directory by path
///
/// Navigates the directory tree from root to locate a file/directory.
/// Paths are case-insensitive and support both `/` and `\` separators.
///
/// A path naming the root ("", "/", "\") returns the root record whatever
/// `kind` asks for. Otherwise every intermediate segment must be a
/// directory, and the final entry must be of `kind`. When a directory holds
/// a file and a directory of the same name, the first one of the wanted kind
/// is taken. A trailing separator on a `File` lookup fails with
/// `InvalidPath`.
///
/// # Arguments
/// * `device` - Block device
/// * `volume` - Mounted volume info
/// * `options` - Options the volume was mounted with
/// * `path` - Path to find (e.g., "/boot/vmlinuz", "\\PS3_GAME\\PARAM.SFO")
/// * `kind` - Whether a file or a directory is wanted
///
/// # Example
/// ```ignore
/// use iso9660::{mount, find_entry, EntryKind, MountOptions};
///
/// let options = MountOptions::default();
/// let volume = mount(&mut device, &options)?;
/// let file = find_entry(&mut device, &volume, &options, "/boot/vmlinuz", EntryKind::File)?;
/// ```
pub fn find_entry<D: BlockDevice + ?Sized>(
    device: &mut D,
    volume: &VolumeInfo,
    options: &MountOptions,
    path: &str,
    kind: EntryKind,
) -> Result<DirEntry> {
    let normalized = normalize(path);

    if normalized.is_root() {
        return Ok(volume.root.clone());
    }

    if normalized.trailing_separator && kind == EntryKind::File {
        return Err(Iso9660Error::InvalidPath);
    }

    let mut current = volume.root.clone();
    let last = normalized.segments.len() - 1;

    for (index, segment) in normalized.segments.iter().enumerate() {
        let listing = read_dir(device, volume.encoding, options, &current)?;
        // Intermediate segments must be directories; same-named entries are
        // told apart by kind.
        let wanted = if index == last { kind } else { EntryKind::Directory };

        let mut name_matched = false;
        let found = listing.into_iter().find_map(|(entry, name)| {
            if !string::name_matches(&name, segment) {
                return None;
            }
            name_matched = true;
            wanted.matches(&entry).then_some(entry)
        });

        current = match found {
            Some(entry) => entry,
            None if !name_matched => return Err(Iso9660Error::NotFound),
            None => {
                return Err(match wanted {
                    EntryKind::File => Iso9660Error::IsADirectory,
                    EntryKind::Directory => Iso9660Error::NotADirectory,
                })
            }
        };
    }

    Ok(current)
}
