//! Persist object directories and their resolution into current offsets.
//!
//! Every save appends a PersistDirectoryAtom listing the objects written by
//! that save. An object's current location is the one recorded by the newest
//! save that mentions it.

use crate::cursor::{payload_end, read_u32, StreamCursor};
use crate::header::RecordHeader;
use crate::record_types;
use crate::user_edit::UserEditAtom;
use pptext_core::{Error, Result};
use std::collections::HashSet;

const PERSIST_ID_MASK: u32 = 0x000F_FFFF;
const PERSIST_COUNT_SHIFT: u32 = 20;
const PERSIST_COUNT_MASK: u32 = 0x0FFF;

/// A run of consecutive persist ids and their stream offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistDirectoryEntry {
    /// First persist id of the run (low 20 bits of the packed field).
    pub persist_start_id: u32,
    /// Offset of object `persist_start_id + i` at index `i`.
    pub offsets: Vec<u32>,
}

impl PersistDirectoryEntry {
    /// Decode one entry: the packed id/count field followed by `count` offsets.
    pub fn decode(cursor: &mut StreamCursor<'_>) -> Result<Self> {
        let packed = read_u32(cursor, "persist directory entry")?;
        let persist_start_id = packed & PERSIST_ID_MASK;
        let persist_count = (packed >> PERSIST_COUNT_SHIFT) & PERSIST_COUNT_MASK;

        let offsets = (0..persist_count)
            .map(|_| read_u32(cursor, "persist directory entry"))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            persist_start_id,
            offsets,
        })
    }

    /// Number of objects in this run (high 12 bits of the packed field).
    pub fn persist_count(&self) -> u32 {
        self.offsets.len() as u32
    }

    /// `(persist id, stream offset)` pairs of this run.
    pub fn objects(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let start = self.persist_start_id;
        self.offsets
            .iter()
            .enumerate()
            .map(move |(i, &offset)| (start + i as u32, offset))
    }
}

/// The persist directory written by one save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistDirectoryAtom {
    pub header: RecordHeader,
    pub entries: Vec<PersistDirectoryEntry>,
}

impl PersistDirectoryAtom {
    /// Decode a directory atom starting at the cursor.
    pub fn decode(cursor: &mut StreamCursor<'_>) -> Result<Self> {
        let start = cursor.position();
        let header = RecordHeader::read(cursor)?;

        if header.type_code != record_types::RT_PERSIST_DIRECTORY_ATOM {
            log::warn!(
                "Expected PersistDirectoryAtom at 0x{:X}, found {}",
                start,
                header.type_name()
            );
        }

        let end = payload_end(cursor, header.size, "persist directory")?;
        let mut entries = Vec::new();
        while cursor.position() < end {
            entries.push(PersistDirectoryEntry::decode(cursor)?);
            if cursor.position() > end {
                return Err(Error::CorruptedFile(format!(
                    "persist directory entry at 0x{:X} runs past the end of its atom",
                    start
                )));
            }
        }

        Ok(Self { header, entries })
    }

    /// All `(persist id, stream offset)` pairs, in directory order.
    pub fn objects(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.entries.iter().flat_map(PersistDirectoryEntry::objects)
    }
}

/// A persist object and the offset of its current version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistObject {
    pub persist_id: u32,
    pub offset: u32,
}

/// Current location of every persist object, one entry per id.
///
/// Entries keep resolution order: newest checkpoint first, directory order
/// within a checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistMapping {
    objects: Vec<PersistObject>,
}

impl PersistMapping {
    /// Resolve the checkpoints of an edit chain, ordered newest first.
    ///
    /// The first offset seen for an id wins; older ones are discarded.
    pub fn from_edits(edits: &[UserEditAtom]) -> Self {
        Self::from_directories(edits.iter().map(|edit| &edit.persist_directory))
    }

    /// Resolve directories given newest first.
    pub fn from_directories<'a, I>(directories: I) -> Self
    where
        I: IntoIterator<Item = &'a PersistDirectoryAtom>,
    {
        let mut seen = HashSet::new();
        let objects = directories
            .into_iter()
            .flat_map(PersistDirectoryAtom::objects)
            .filter(|&(persist_id, _)| seen.insert(persist_id))
            .map(|(persist_id, offset)| PersistObject { persist_id, offset })
            .collect();

        Self { objects }
    }

    /// Current offset of a persist object.
    pub fn offset(&self, persist_id: u32) -> Option<u32> {
        self.objects
            .iter()
            .find(|o| o.persist_id == persist_id)
            .map(|o| o.offset)
    }

    /// Resolved objects in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &PersistObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
