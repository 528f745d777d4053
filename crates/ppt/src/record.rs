//! Recursive-descent decoder for the record tree.
//!
//! A record is either a container (version `0xF`) holding child records, or
//! an atom holding raw payload bytes. Text-bearing atoms are decoded on the
//! spot and handed to the [`TextAccumulator`] in the order they are met.

use crate::cursor::{payload_end, read_bytes, StreamCursor};
use crate::header::RecordHeader;
use crate::record_types;
use crate::text::{decode_cstring, decode_text_atom, TextAccumulator};
use pptext_core::{Error, Result};

/// Deepest container nesting accepted before the input is treated as corrupt.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Containers whose payload is stepped over without decoding children.
///
/// Their nested strings use a different convention and would pollute the
/// extracted text if decoded as ordinary CString atoms.
const SKIPPED_CONTAINERS: [u16; 2] = [
    record_types::RT_MAIN_MASTER,
    record_types::RT_PROG_BINARY_TAG,
];

/// A decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Container(Container),
    Atom(Atom),
}

/// A record that owns an ordered list of child records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub header: RecordHeader,
    pub children: Vec<Record>,
    /// Set when the payload was stepped over instead of decoded.
    pub skipped: bool,
}

/// A leaf record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub header: RecordHeader,
    pub payload: AtomPayload,
}

/// Payload of an atom after type-specific decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomPayload {
    /// Any atom without a text specialization.
    Raw(Vec<u8>),
    /// `TextCharsAtom` / `TextBytesAtom`.
    Text(String),
    /// `CString`, always UTF-16.
    CString(String),
}

impl Record {
    /// Header of this record.
    pub fn header(&self) -> &RecordHeader {
        match self {
            Record::Container(c) => &c.header,
            Record::Atom(a) => &a.header,
        }
    }

    /// Whether this record is a container.
    pub fn is_container(&self) -> bool {
        matches!(self, Record::Container(_))
    }

    /// Decoded text, for text-bearing atoms.
    pub fn text(&self) -> Option<&str> {
        match self {
            Record::Atom(Atom {
                payload: AtomPayload::Text(text) | AtomPayload::CString(text),
                ..
            }) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Total encoded length including the header.
    pub fn encoded_len(&self) -> u64 {
        u64::from(crate::header::HEADER_SIZE) + u64::from(self.header().size)
    }
}

/// How an atom's payload is interpreted, selected by its type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtomKind {
    CString,
    Text,
    Opaque,
}

impl AtomKind {
    fn from_type_code(type_code: u16) -> Self {
        match type_code {
            record_types::RT_CSTRING => AtomKind::CString,
            record_types::RT_TEXT_CHARS_ATOM | record_types::RT_TEXT_BYTES_ATOM => AtomKind::Text,
            _ => AtomKind::Opaque,
        }
    }
}

/// Decodes records, feeding text candidates into an accumulator.
pub struct RecordDecoder<'a> {
    text: &'a mut TextAccumulator,
}

impl<'a> RecordDecoder<'a> {
    /// Create a decoder that appends text to `text`.
    pub fn new(text: &'a mut TextAccumulator) -> Self {
        Self { text }
    }

    /// Decode one complete record, recursively, starting at the cursor.
    pub fn decode(&mut self, cursor: &mut StreamCursor<'_>) -> Result<Record> {
        self.decode_nested(cursor, 0)
    }

    fn decode_nested(&mut self, cursor: &mut StreamCursor<'_>, depth: usize) -> Result<Record> {
        let version = RecordHeader::peek_version(cursor)?;
        let header = RecordHeader::read(cursor)?;

        if version == crate::header::CONTAINER_VERSION {
            self.decode_container(cursor, header, depth).map(Record::Container)
        } else {
            self.decode_atom(cursor, header).map(Record::Atom)
        }
    }

    fn decode_container(
        &mut self,
        cursor: &mut StreamCursor<'_>,
        header: RecordHeader,
        depth: usize,
    ) -> Result<Container> {
        let end = payload_end(cursor, header.size, "container")?;

        if SKIPPED_CONTAINERS.contains(&header.type_code) {
            log::debug!(
                "Skipping {} container ({} bytes) at 0x{:X}",
                header.type_name(),
                header.size,
                cursor.position()
            );
            cursor.set_position(end);
            return Ok(Container {
                header,
                children: Vec::new(),
                skipped: true,
            });
        }

        if depth >= MAX_NESTING_DEPTH {
            return Err(Error::CorruptedFile(format!(
                "container nesting exceeds {} levels at 0x{:X}",
                MAX_NESTING_DEPTH,
                cursor.position()
            )));
        }

        let mut children = Vec::new();
        while cursor.position() < end {
            let child = self.decode_nested(cursor, depth + 1)?;
            if cursor.position() > end {
                return Err(Error::CorruptedFile(format!(
                    "child {} overruns its {} container (ends at 0x{:X}, container ends at 0x{:X})",
                    child.header().type_name(),
                    header.type_name(),
                    cursor.position(),
                    end
                )));
            }
            children.push(child);
        }

        Ok(Container {
            header,
            children,
            skipped: false,
        })
    }

    fn decode_atom(&mut self, cursor: &mut StreamCursor<'_>, header: RecordHeader) -> Result<Atom> {
        let data = read_bytes(cursor, header.size, "atom")?;

        let payload = match AtomKind::from_type_code(header.type_code) {
            AtomKind::CString => {
                let text = decode_cstring(&data);
                self.text.push(&text);
                AtomPayload::CString(text)
            }
            AtomKind::Text => {
                let text = decode_text_atom(&data);
                self.text.push(&text);
                AtomPayload::Text(text)
            }
            AtomKind::Opaque => AtomPayload::Raw(data),
        };

        Ok(Atom { header, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{atom, container, cstring, text_bytes, text_chars};
    use pptext_core::ExclusionSet;
    use std::io::Cursor;

    fn decode_all(data: &[u8]) -> (Result<Record>, String, u64) {
        let mut acc = TextAccumulator::new(ExclusionSet::empty());
        let mut cursor = Cursor::new(data);
        let result = RecordDecoder::new(&mut acc).decode(&mut cursor);
        (result, acc.as_str().to_string(), cursor.position())
    }

    #[test]
    fn test_opaque_atom_keeps_raw_bytes() {
        let data = atom(record_types::RT_SLIDE_ATOM, &[1, 2, 3]);
        let (record, text, pos) = decode_all(&data);

        let record = record.unwrap();
        assert!(!record.is_container());
        assert_eq!(record.text(), None);
        assert!(matches!(
            record,
            Record::Atom(Atom { payload: AtomPayload::Raw(ref b), .. }) if b == &[1, 2, 3]
        ));
        assert_eq!(text, "");
        assert_eq!(pos, 11);
    }

    #[test]
    fn test_container_children_in_order() {
        let data = container(
            record_types::RT_SLIDE,
            &[
                text_bytes("Title"),
                container(record_types::RT_DRAWING, &[text_chars("Body")]),
                cstring("Link"),
            ],
        );
        let (record, text, pos) = decode_all(&data);

        let record = record.unwrap();
        assert_eq!(text, "Title Body Link ");
        assert_eq!(pos, data.len() as u64);
        assert_eq!(record.encoded_len(), data.len() as u64);

        match record {
            Record::Container(c) => {
                assert!(!c.skipped);
                assert_eq!(c.children.len(), 3);
                assert_eq!(c.children[0].text(), Some("Title"));
                assert!(c.children[1].is_container());
                assert_eq!(c.children[2].text(), Some("Link"));
            }
            Record::Atom(_) => panic!("expected container"),
        }
    }

    #[test]
    fn test_version_decides_container_not_type() {
        // TextCharsAtom type code with container version: children decoded
        let mut data = vec![0x0F, 0x00];
        data.extend_from_slice(&record_types::RT_TEXT_CHARS_ATOM.to_le_bytes());
        let child = text_bytes("Inner");
        data.extend_from_slice(&(child.len() as u32).to_le_bytes());
        data.extend_from_slice(&child);

        let (record, text, _) = decode_all(&data);
        assert!(record.unwrap().is_container());
        assert_eq!(text, "Inner ");
    }

    #[test]
    fn test_skipped_containers_contribute_nothing() {
        for type_code in [record_types::RT_MAIN_MASTER, record_types::RT_PROG_BINARY_TAG] {
            let data = container(type_code, &[cstring("Hidden"), text_bytes("Also hidden")]);
            let (record, text, pos) = decode_all(&data);

            match record.unwrap() {
                Record::Container(c) => {
                    assert!(c.skipped);
                    assert!(c.children.is_empty());
                }
                Record::Atom(_) => panic!("expected container"),
            }
            assert_eq!(text, "");
            assert_eq!(pos, data.len() as u64);
        }
    }

    #[test]
    fn test_skipped_container_followed_by_sibling() {
        let data = container(
            record_types::RT_DOCUMENT,
            &[
                container(record_types::RT_MAIN_MASTER, &[text_bytes("Master")]),
                text_bytes("Visible"),
            ],
        );
        let (record, text, _) = decode_all(&data);
        assert!(record.is_ok());
        assert_eq!(text, "Visible ");
    }

    #[test]
    fn test_child_overrunning_container_is_corrupt() {
        // Container claims 10 bytes, its only child is 8 + 5 = 13 bytes long
        let child = text_bytes("Hello");
        let mut data = vec![0x0F, 0x00];
        data.extend_from_slice(&record_types::RT_SLIDE.to_le_bytes());
        data.extend_from_slice(&10u32.to_le_bytes());
        data.extend_from_slice(&child);

        let (record, _, _) = decode_all(&data);
        assert!(matches!(record, Err(Error::CorruptedFile(_))));
    }

    #[test]
    fn test_truncated_atom_is_corrupt() {
        let mut data = atom(record_types::RT_TEXT_BYTES_ATOM, b"Hello");
        data.truncate(10);

        let (record, text, _) = decode_all(&data);
        assert!(matches!(record, Err(Error::CorruptedFile(_))));
        assert_eq!(text, "");
    }

    #[test]
    fn test_container_past_end_of_stream_is_corrupt() {
        let mut data = container(record_types::RT_MAIN_MASTER, &[text_bytes("Master")]);
        data.truncate(12);

        let (record, _, _) = decode_all(&data);
        assert!(matches!(record, Err(Error::CorruptedFile(_))));
    }

    #[test]
    fn test_excessive_nesting_is_corrupt() {
        let mut data = Vec::new();
        for _ in 0..=MAX_NESTING_DEPTH {
            data = container(record_types::RT_LIST, &[data]);
        }
        let (record, _, _) = decode_all(&data);
        assert!(matches!(record, Err(Error::CorruptedFile(_))));
    }

    #[test]
    fn test_empty_container() {
        let data = container(record_types::RT_LIST, &[]);
        let (record, text, pos) = decode_all(&data);

        match record.unwrap() {
            Record::Container(c) => assert!(c.children.is_empty()),
            Record::Atom(_) => panic!("expected container"),
        }
        assert_eq!(text, "");
        assert_eq!(pos, 8);
    }
}
