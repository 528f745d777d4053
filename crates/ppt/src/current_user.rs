//! Reader for the "Current User" stream.
//!
//! The stream holds a single CurrentUserAtom whose fixed layout gives the
//! offset of the newest UserEditAtom in the document stream, and whose header
//! token tells whether the document is encrypted.

use crate::cursor::{read_bytes, read_u16, read_u32, read_u8};
use crate::header::RecordHeader;
use crate::record_types;
use encoding_rs::WINDOWS_1252;
use pptext_core::Result;
use std::io::Cursor;

/// Header token of an encrypted document.
pub const HEADER_TOKEN_ENCRYPTED: u32 = 0xF3D1_C4DF;

/// Header token of an unencrypted document.
pub const HEADER_TOKEN_PLAIN: u32 = 0xE391_C05F;

/// Decoded CurrentUserAtom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUserAtom {
    pub header: RecordHeader,
    /// Size of the fixed part of the atom, normally 0x14.
    pub size: u32,
    pub header_token: u32,
    /// Offset of the most recent UserEditAtom in the document stream.
    pub offset_to_current_edit: u32,
    pub doc_file_version: u16,
    pub major_version: u8,
    pub minor_version: u8,
    /// ANSI user name of the last editor.
    pub user_name: String,
    /// 8 when the file has main master slides, 9 when extra masters must be ignored.
    pub rel_version: u32,
}

impl CurrentUserAtom {
    /// Decode the atom from the start of the Current User stream.
    pub fn decode(buffer: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(buffer);
        let header = RecordHeader::read(&mut cursor)?;

        if header.type_code != record_types::RT_CURRENT_USER_ATOM {
            log::warn!(
                "Current User stream starts with {} instead of a CurrentUserAtom",
                header.type_name()
            );
        }

        const WHAT: &str = "current user atom";
        let size = read_u32(&mut cursor, WHAT)?;
        let header_token = read_u32(&mut cursor, WHAT)?;
        let offset_to_current_edit = read_u32(&mut cursor, WHAT)?;
        let name_len = read_u16(&mut cursor, WHAT)?;
        let doc_file_version = read_u16(&mut cursor, WHAT)?;
        let major_version = read_u8(&mut cursor, WHAT)?;
        let minor_version = read_u8(&mut cursor, WHAT)?;
        let _unused = read_u16(&mut cursor, WHAT)?;
        let name_bytes = read_bytes(&mut cursor, u32::from(name_len), "current user name")?;
        let rel_version = read_u32(&mut cursor, WHAT)?;

        let (user_name, _) = WINDOWS_1252.decode_without_bom_handling(&name_bytes);

        let atom = Self {
            header,
            size,
            header_token,
            offset_to_current_edit,
            doc_file_version,
            major_version,
            minor_version,
            user_name: user_name.into_owned(),
            rel_version,
        };

        log::debug!(
            "Current user {:?}: current edit at 0x{:X}, token 0x{:08X}",
            atom.user_name,
            atom.offset_to_current_edit,
            atom.header_token
        );

        Ok(atom)
    }

    /// Whether the header token marks the document as encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.header_token == HEADER_TOKEN_ENCRYPTED
    }
}
