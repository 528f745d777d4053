//! Byte-level builders for test fixtures.

use crate::current_user::HEADER_TOKEN_PLAIN;
use crate::header::{RecordHeader, CONTAINER_VERSION};
use crate::record_types;

pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

fn record(version: u8, type_code: u16, payload: &[u8]) -> Vec<u8> {
    let header = RecordHeader {
        version,
        instance: 0,
        type_code,
        size: payload.len() as u32,
    };
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

pub fn atom(type_code: u16, payload: &[u8]) -> Vec<u8> {
    record(0, type_code, payload)
}

pub fn container(type_code: u16, children: &[Vec<u8>]) -> Vec<u8> {
    record(CONTAINER_VERSION, type_code, &children.concat())
}

pub fn text_bytes(text: &str) -> Vec<u8> {
    atom(record_types::RT_TEXT_BYTES_ATOM, text.as_bytes())
}

pub fn text_chars(text: &str) -> Vec<u8> {
    atom(record_types::RT_TEXT_CHARS_ATOM, &utf16(text))
}

pub fn cstring(text: &str) -> Vec<u8> {
    atom(record_types::RT_CSTRING, &utf16(text))
}

pub fn slide(children: &[Vec<u8>]) -> Vec<u8> {
    container(record_types::RT_SLIDE, children)
}

/// PersistDirectoryAtom with one entry per `(start_id, offsets)` pair.
pub fn persist_directory(entries: &[(u32, &[u32])]) -> Vec<u8> {
    let mut payload = Vec::new();
    for (start_id, offsets) in entries {
        let packed = start_id | ((offsets.len() as u32) << 20);
        payload.extend_from_slice(&packed.to_le_bytes());
        for offset in offsets.iter() {
            payload.extend_from_slice(&offset.to_le_bytes());
        }
    }
    atom(record_types::RT_PERSIST_DIRECTORY_ATOM, &payload)
}

pub fn user_edit(offset_last_edit: u32, offset_persist_directory: u32) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&1u32.to_le_bytes()); // lastSlideIdRef
    payload.extend_from_slice(&0u16.to_le_bytes()); // version
    payload.push(0); // minorVersion
    payload.push(3); // majorVersion
    payload.extend_from_slice(&offset_last_edit.to_le_bytes());
    payload.extend_from_slice(&offset_persist_directory.to_le_bytes());
    payload.extend_from_slice(&1u32.to_le_bytes()); // docPersistIdRef
    payload.extend_from_slice(&8u32.to_le_bytes()); // persistIdSeed
    payload.extend_from_slice(&1u16.to_le_bytes()); // lastView
    payload.extend_from_slice(&0u16.to_le_bytes()); // unused
    atom(record_types::RT_USER_EDIT_ATOM, &payload)
}

pub fn current_user_with_token(offset_to_current_edit: u32, header_token: u32) -> Vec<u8> {
    let name = b"Presenter";
    let mut payload = Vec::new();
    payload.extend_from_slice(&0x14u32.to_le_bytes()); // size
    payload.extend_from_slice(&header_token.to_le_bytes());
    payload.extend_from_slice(&offset_to_current_edit.to_le_bytes());
    payload.extend_from_slice(&(name.len() as u16).to_le_bytes());
    payload.extend_from_slice(&0x03F4u16.to_le_bytes()); // docFileVersion
    payload.push(3); // majorVersion
    payload.push(0); // minorVersion
    payload.extend_from_slice(&0u16.to_le_bytes()); // unused
    payload.extend_from_slice(name);
    payload.extend_from_slice(&8u32.to_le_bytes()); // relVersion
    atom(record_types::RT_CURRENT_USER_ATOM, &payload)
}

pub fn current_user(offset_to_current_edit: u32) -> Vec<u8> {
    current_user_with_token(offset_to_current_edit, HEADER_TOKEN_PLAIN)
}

/// Append-only document stream under construction.
#[derive(Debug, Default)]
pub struct StreamBuilder {
    pub bytes: Vec<u8>,
}

impl StreamBuilder {
    /// Append a record, returning the offset it was written at.
    pub fn push(&mut self, record: Vec<u8>) -> u32 {
        let offset = self.bytes.len() as u32;
        self.bytes.extend_from_slice(&record);
        offset
    }

    /// Append a persist directory and the user edit pointing at it,
    /// returning the user edit offset.
    pub fn checkpoint(&mut self, previous_edit: u32, entries: &[(u32, &[u32])]) -> u32 {
        let directory = self.push(persist_directory(entries));
        self.push(user_edit(previous_edit, directory))
    }
}
