//! String handling utilities
//!
//! File identifiers are stored either as plain bytes (primary descriptor) or
//! as big-endian UTF-16 (Joliet). Everything else in the on-disk structures
//! is binary and never goes through these helpers.

use crate::types::StringEncoding;
use alloc::string::String;

/// Identifier byte naming the directory itself
pub const CURRENT_DIR_ID: u8 = 0x00;

/// Identifier byte naming the parent directory
pub const PARENT_DIR_ID: u8 = 0x01;

/// Decode raw bytes under `encoding`
///
/// ASCII passes bytes through one char per byte; bytes above 0x7F map to
/// the matching Latin-1 code point. UTF-16BE reads big-endian code units
/// independent of host byte order; a trailing odd byte is ignored and
/// unpaired surrogates become U+FFFD.
pub fn decode(bytes: &[u8], encoding: StringEncoding) -> String {
    match encoding {
        StringEncoding::Ascii => bytes.iter().map(|&b| b as char).collect(),
        StringEncoding::Utf16Be => {
            let units = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
            char::decode_utf16(units)
                .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        }
    }
}

/// Decode a directory record file identifier
///
/// The single-byte identifiers 0x00 and 0x01 are "." and ".." under every
/// encoding. The result still carries any `;version` suffix.
pub fn decode_name(identifier: &[u8], encoding: StringEncoding) -> String {
    match identifier {
        [CURRENT_DIR_ID] => String::from("."),
        [PARENT_DIR_ID] => String::from(".."),
        _ => decode(identifier, encoding),
    }
}

/// Strip version suffix from filename (e.g., "FILE.TXT;1" -> "FILE.TXT")
pub fn strip_version(name: &str) -> &str {
    match name.find(';') {
        Some(pos) => &name[..pos],
        None => name,
    }
}

/// Case-insensitive (ASCII fold only) comparison of a stored name and a path segment
///
/// A stored name ending in a bare '.' ("README.", written for extensionless
/// level-1 files) also matches the segment without the dot.
pub fn name_matches(stored: &str, segment: &str) -> bool {
    if stored.eq_ignore_ascii_case(segment) {
        return true;
    }

    if stored == "." || stored == ".." {
        return false;
    }

    match stored.strip_suffix('.') {
        Some(base) if !base.is_empty() => base.eq_ignore_ascii_case(segment),
        _ => false,
    }
}
