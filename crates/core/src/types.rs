//! Container format detection.

use serde::{Deserialize, Serialize};

/// OLE/CFB signature (D0 CF 11 E0 A1 B1 1A E1).
const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// ZIP local file header signature (PK\x03\x04).
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// The container format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Legacy binary presentation inside an OLE/CFB compound file.
    Ppt,
    /// Office Open XML package (ZIP). Not handled by this crate.
    Pptx,
}

impl DocumentFormat {
    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&CFB_MAGIC) {
            return Some(Self::Ppt);
        }

        if bytes.starts_with(&ZIP_MAGIC) {
            return Some(Self::Pptx);
        }

        None
    }
}
