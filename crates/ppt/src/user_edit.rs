//! UserEditAtom checkpoints and the walk along their backward-linked chain.

use crate::cursor::{read_u16, read_u32, read_u8, seek_to, StreamCursor};
use crate::header::RecordHeader;
use crate::persist::PersistDirectoryAtom;
use crate::record_types;
use pptext_core::{Error, Result};
use std::collections::HashSet;

const WHAT: &str = "user edit atom";

/// One save checkpoint of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEditAtom {
    pub header: RecordHeader,
    pub last_slide_id_ref: u32,
    pub version: u16,
    pub minor_version: u8,
    pub major_version: u8,
    /// Offset of the previous checkpoint; 0 terminates the chain.
    pub offset_last_edit: u32,
    /// Offset of the PersistDirectoryAtom written by this save.
    pub offset_persist_directory: u32,
    pub doc_persist_id_ref: u32,
    pub persist_id_seed: u32,
    pub last_view: u16,
    /// Directory found at `offset_persist_directory`.
    pub persist_directory: PersistDirectoryAtom,
}

impl UserEditAtom {
    /// Decode the checkpoint at the cursor, then follow
    /// `offset_persist_directory` to decode its directory.
    ///
    /// The cursor is left after the directory atom.
    pub fn decode(cursor: &mut StreamCursor<'_>) -> Result<Self> {
        let start = cursor.position();
        let header = RecordHeader::read(cursor)?;

        if header.type_code != record_types::RT_USER_EDIT_ATOM {
            log::warn!(
                "Expected UserEditAtom at 0x{:X}, found {}",
                start,
                header.type_name()
            );
        }

        let last_slide_id_ref = read_u32(cursor, WHAT)?;
        let version = read_u16(cursor, WHAT)?;
        let minor_version = read_u8(cursor, WHAT)?;
        let major_version = read_u8(cursor, WHAT)?;
        let offset_last_edit = read_u32(cursor, WHAT)?;
        let offset_persist_directory = read_u32(cursor, WHAT)?;
        let doc_persist_id_ref = read_u32(cursor, WHAT)?;
        let persist_id_seed = read_u32(cursor, WHAT)?;
        let last_view = read_u16(cursor, WHAT)?;
        let _unused = read_u16(cursor, WHAT)?;

        seek_to(cursor, offset_persist_directory, "persist directory")?;
        let persist_directory = PersistDirectoryAtom::decode(cursor)?;

        Ok(Self {
            header,
            last_slide_id_ref,
            version,
            minor_version,
            major_version,
            offset_last_edit,
            offset_persist_directory,
            doc_persist_id_ref,
            persist_id_seed,
            last_view,
            persist_directory,
        })
    }
}

/// Collect every checkpoint reachable from `start_offset`, newest first.
///
/// The cursor is reset to position 0 afterwards. An offset that comes round
/// a second time means the chain is cyclic and the stream is corrupt.
pub fn walk_edit_chain(cursor: &mut StreamCursor<'_>, start_offset: u32) -> Result<Vec<UserEditAtom>> {
    let mut edits = Vec::new();
    let mut visited = HashSet::new();
    let mut offset = start_offset;

    loop {
        if !visited.insert(offset) {
            return Err(Error::CorruptedFile(format!(
                "user edit chain loops back to offset 0x{:X}",
                offset
            )));
        }

        seek_to(cursor, offset, "user edit")?;
        let edit = UserEditAtom::decode(cursor)?;
        offset = edit.offset_last_edit;
        edits.push(edit);

        if offset == 0 {
            break;
        }
    }

    cursor.set_position(0);
    log::debug!("Edit chain from 0x{:X} has {} checkpoints", start_offset, edits.len());
    Ok(edits)
}
