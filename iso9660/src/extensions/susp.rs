//! System Use Sharing Protocol detection
//!
//! Bytes after a record's file identifier form the system use area. SUSP
//! (and Rock Ridge on top of it) stores tagged entries there. Only the first
//! entry header is decoded, to tell whether such extensions are present; the
//! payload stays opaque.

use alloc::vec::Vec;

/// Size of a SUSP entry header (signature, length, version)
pub const HEADER_SIZE: usize = 4;

/// System Use Entry header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemUseHeader {
    /// Signature (2 bytes, e.g. "PX", "NM", "SP")
    pub signature: [u8; 2],

    /// Length of entry, header included
    pub length: u8,

    /// Version
    pub version: u8,
}

impl SystemUseHeader {
    /// Decode the header at the start of `data`
    pub fn parse(data: &[u8]) -> Option<Self> {
        let raw = data.get(..HEADER_SIZE)?;
        Some(Self {
            signature: [raw[0], raw[1]],
            length: raw[2],
            version: raw[3],
        })
    }

    /// Is the signature one defined by SUSP or Rock Ridge?
    pub fn is_known_signature(&self) -> bool {
        signatures::SUSP
            .iter()
            .chain(signatures::ROCK_RIDGE.iter())
            .any(|sig| **sig == self.signature)
    }

    /// Is this the SUSP indicator ("SP") carried by a root "." record?
    pub fn is_susp_indicator(&self) -> bool {
        &self.signature == signatures::SUSP_INDICATOR
    }
}

/// System use area of a directory record, uninterpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemUseArea {
    bytes: Vec<u8>,
}

impl SystemUseArea {
    /// Copy the area out of a record
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Is the area empty?
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// First entry header, if the area is large enough to hold one
    pub fn header(&self) -> Option<SystemUseHeader> {
        SystemUseHeader::parse(&self.bytes)
    }

    /// Does the area start with a recognized SUSP / Rock Ridge entry?
    pub fn has_extensions(&self) -> bool {
        self.header()
            .map(|h| h.is_known_signature() && h.length as usize >= HEADER_SIZE)
            .unwrap_or(false)
    }
}

/// Signature constants
pub mod signatures {
    /// SUSP indicator
    pub const SUSP_INDICATOR: &[u8; 2] = b"SP";
    /// Continuation area
    pub const CONTINUATION: &[u8; 2] = b"CE";
    /// Padding
    pub const PADDING: &[u8; 2] = b"PD";
    /// SUSP terminator
    pub const TERMINATOR: &[u8; 2] = b"ST";
    /// Extensions reference
    pub const EXTENSIONS_REFERENCE: &[u8; 2] = b"ER";
    /// Rock Ridge presence (RRIP 1.09)
    pub const ROCK_RIDGE_PRESENT: &[u8; 2] = b"RR";
    /// POSIX file attributes signature
    pub const POSIX_ATTRS: &[u8; 2] = b"PX";
    /// POSIX device number signature
    pub const POSIX_DEV: &[u8; 2] = b"PN";
    /// Symbolic link signature
    pub const SYMLINK: &[u8; 2] = b"SL";
    /// Alternate name signature
    pub const ALTERNATE_NAME: &[u8; 2] = b"NM";
    /// Child link signature
    pub const CHILD_LINK: &[u8; 2] = b"CL";
    /// Parent link signature
    pub const PARENT_LINK: &[u8; 2] = b"PL";
    /// Relocated directory signature
    pub const RELOCATED_DIR: &[u8; 2] = b"RE";
    /// Timestamps signature
    pub const TIMESTAMPS: &[u8; 2] = b"TF";

    /// Entries defined by SUSP itself
    pub const SUSP: [&[u8; 2]; 5] = [
        SUSP_INDICATOR,
        CONTINUATION,
        PADDING,
        TERMINATOR,
        EXTENSIONS_REFERENCE,
    ];

    /// Entries defined by Rock Ridge
    pub const ROCK_RIDGE: [&[u8; 2]; 9] = [
        ROCK_RIDGE_PRESENT,
        POSIX_ATTRS,
        POSIX_DEV,
        SYMLINK,
        ALTERNATE_NAME,
        CHILD_LINK,
        PARENT_LINK,
        RELOCATED_DIR,
        TIMESTAMPS,
    ];
}
