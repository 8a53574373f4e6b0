//! Supplementary Volume Descriptor (Joliet)
//!
//! Joliet volumes mark their supplementary descriptor with one of three
//! escape sequences naming the UCS-2 level. The level is informational; any
//! supplementary descriptor is treated as carrying UTF-16BE names.

use super::primary::VolumeDescriptor;
use crate::types::VolumeDescriptorType;

/// Escape sequences for Joliet levels 1, 2 and 3
const JOLIET_ESCAPES: [(&[u8; 3], u8); 3] = [(b"%/@", 1), (b"%/C", 2), (b"%/E", 3)];

/// Joliet level announced by the escape sequence field
pub fn joliet_level(escape_sequences: &[u8]) -> Option<u8> {
    escape_sequences.windows(3).find_map(|window| {
        JOLIET_ESCAPES
            .iter()
            .find(|(seq, _)| window == &seq[..])
            .map(|&(_, level)| level)
    })
}

impl VolumeDescriptor {
    /// Is this a supplementary descriptor?
    pub fn is_supplementary(&self) -> bool {
        self.descriptor_type == VolumeDescriptorType::Supplementary
    }

    /// Joliet level, `None` for primary descriptors or missing escapes
    pub fn joliet_level(&self) -> Option<u8> {
        if !self.is_supplementary() {
            return None;
        }
        joliet_level(&self.escape_sequences)
    }
}
