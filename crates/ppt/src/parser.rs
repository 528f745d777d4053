//! PPT text extraction entry points.
//!
//! Opens the OLE/CFB container, pulls out the "PowerPoint Document" and
//! "Current User" streams, and recovers the text of the most recently saved
//! version of the document:
//!
//! 1. The CurrentUserAtom gives the offset of the newest UserEditAtom.
//! 2. The UserEditAtom chain is walked back to the first save.
//! 3. The persist directories of all saves are merged, newest wins.
//! 4. Each resolved object is decoded and its text atoms collected.

use crate::aggregate::extract_text;
use crate::current_user::CurrentUserAtom;
use crate::persist::PersistMapping;
use crate::user_edit::walk_edit_chain;
use cfb::CompoundFile;
use pptext_core::{DocumentFormat, Error, ExclusionSet, ExtractOptions, Result};
use std::io::{Cursor, Read, Seek, SeekFrom};

/// Name of the stream holding the record tree.
pub const POWERPOINT_DOCUMENT_STREAM: &str = "PowerPoint Document";

/// Name of the stream holding the CurrentUserAtom.
pub const CURRENT_USER_STREAM: &str = "Current User";

/// Extracts visible text from legacy PPT (OLE/CFB) files.
#[derive(Debug, Clone, Default)]
pub struct PptParser {
    exclusions: ExclusionSet,
}

impl PptParser {
    /// Create a parser using the built-in placeholder exclusions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser configured by `options`.
    pub fn with_options(options: &ExtractOptions) -> Self {
        Self {
            exclusions: options.exclusion_set(),
        }
    }

    /// Replace the exclusion set.
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Extract the text of a PPT file from a reader.
    ///
    /// An empty input yields an empty string.
    pub fn parse<R: Read + Seek>(&self, mut reader: R) -> Result<String> {
        let len = reader.seek(SeekFrom::End(0))?;
        if len == 0 {
            return Ok(String::new());
        }
        reader.seek(SeekFrom::Start(0))?;

        let mut magic = Vec::with_capacity(8);
        reader.by_ref().take(8).read_to_end(&mut magic)?;
        match DocumentFormat::from_magic(&magic) {
            Some(DocumentFormat::Ppt) => {}
            Some(DocumentFormat::Pptx) => {
                return Err(Error::UnsupportedFormat(
                    "file is an Office Open XML (PPTX) package, not a legacy PPT".to_string(),
                ))
            }
            None => {
                return Err(Error::UnsupportedFormat(
                    "missing OLE/CFB signature".to_string(),
                ))
            }
        }
        reader.seek(SeekFrom::Start(0))?;

        let mut cfb = CompoundFile::open(reader)
            .map_err(|e| Error::CfbError(format!("Failed to open CFB container: {}", e)))?;

        let document = read_stream(&mut cfb, POWERPOINT_DOCUMENT_STREAM)?;
        let current_user = read_stream(&mut cfb, CURRENT_USER_STREAM)?;

        self.parse_streams(&document, &current_user)
    }

    /// Extract text from already materialized streams.
    ///
    /// Fails with [`Error::Encrypted`] before the document stream is decoded
    /// when the Current User stream flags encryption, even if the document
    /// stream is empty.
    pub fn parse_streams(&self, document: &[u8], current_user: &[u8]) -> Result<String> {
        if document.is_empty() && current_user.is_empty() {
            return Ok(String::new());
        }

        let user = CurrentUserAtom::decode(current_user)?;
        if user.is_encrypted() {
            return Err(Error::Encrypted);
        }

        if document.is_empty() {
            return Ok(String::new());
        }

        let mut cursor = Cursor::new(document);
        let edits = walk_edit_chain(&mut cursor, user.offset_to_current_edit)?;
        let objects = PersistMapping::from_edits(&edits);

        log::debug!(
            "Resolved {} persist objects from {} checkpoints",
            objects.len(),
            edits.len()
        );

        let text = extract_text(&mut cursor, &objects, self.exclusions.clone())?;

        if text.is_empty() {
            log::warn!(
                "No text content extracted. The presentation may contain only \
                 images/graphics or placeholder text."
            );
        }

        Ok(text)
    }
}

/// Read a named root-level stream fully into memory.
fn read_stream<R: Read + Seek>(cfb: &mut CompoundFile<R>, name: &str) -> Result<Vec<u8>> {
    let path = format!("/{}", name);
    if !cfb.is_stream(&path) {
        return Err(Error::MissingStream(name.to_string()));
    }

    let mut stream = cfb
        .open_stream(&path)
        .map_err(|e| Error::CfbError(format!("Failed to open {} stream: {}", name, e)))?;

    let mut data = Vec::new();
    stream
        .read_to_end(&mut data)
        .map_err(|e| Error::CfbError(format!("Failed to read {} stream: {}", name, e)))?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::current_user::HEADER_TOKEN_ENCRYPTED;
    use crate::record_types;
    use crate::testing::{
        container, cstring, current_user, current_user_with_token, text_bytes, text_chars,
        StreamBuilder,
    };

    #[test]
    fn test_parse_streams_end_to_end() {
        let mut stream = StreamBuilder::default();
        let hello = stream.push(container(record_types::RT_SLIDE, &[text_bytes("Hello")]));
        let world = stream.push(container(record_types::RT_SLIDE, &[text_chars("World")]));
        let edit = stream.checkpoint(0, &[(1, &[hello, world])]);

        let text = PptParser::new()
            .parse_streams(&stream.bytes, &current_user(edit))
            .unwrap();
        assert_eq!(text, "Hello World ");
    }

    #[test]
    fn test_parse_streams_uses_latest_version() {
        let mut stream = StreamBuilder::default();
        let title_v1 = stream.push(container(record_types::RT_SLIDE, &[text_bytes("Draft")]));
        let body = stream.push(container(record_types::RT_SLIDE, &[text_bytes("Body")]));
        let first = stream.checkpoint(0, &[(1, &[title_v1, body])]);

        let title_v2 = stream.push(container(record_types::RT_SLIDE, &[text_bytes("Final")]));
        let second = stream.checkpoint(first, &[(1, &[title_v2])]);

        let text = PptParser::new()
            .parse_streams(&stream.bytes, &current_user(second))
            .unwrap();
        assert_eq!(text, "Final Body ");
    }

    #[test]
    fn test_parse_streams_encrypted() {
        let mut stream = StreamBuilder::default();
        let slide = stream.push(text_bytes("Secret"));
        let edit = stream.checkpoint(0, &[(1, &[slide])]);

        let err = PptParser::new()
            .parse_streams(&stream.bytes, &current_user_with_token(edit, HEADER_TOKEN_ENCRYPTED))
            .unwrap_err();
        assert!(err.is_encrypted());
    }

    #[test]
    fn test_encryption_detected_before_document_decoding() {
        // Document stream is garbage; the encryption flag must win
        let err = PptParser::new()
            .parse_streams(&[0xFF; 16], &current_user_with_token(0x40, HEADER_TOKEN_ENCRYPTED))
            .unwrap_err();
        assert!(matches!(err, Error::Encrypted));
    }

    #[test]
    fn test_parse_streams_empty_document() {
        let text = PptParser::new().parse_streams(&[], &[]).unwrap();
        assert_eq!(text, "");

        let text = PptParser::new().parse_streams(&[], &current_user(0)).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_empty_encrypted_document_reports_encryption() {
        let err = PptParser::new()
            .parse_streams(&[], &current_user_with_token(0, HEADER_TOKEN_ENCRYPTED))
            .unwrap_err();
        assert!(matches!(err, Error::Encrypted));
    }

    #[test]
    fn test_parse_streams_custom_exclusions() {
        let mut stream = StreamBuilder::default();
        let slide = stream.push(container(
            record_types::RT_SLIDE,
            &[text_bytes("*"), cstring("Chorus"), text_bytes("Verse")],
        ));
        let edit = stream.checkpoint(0, &[(1, &[slide])]);
        let user = current_user(edit);

        let all = PptParser::with_options(&ExtractOptions::new().keep_all())
            .parse_streams(&stream.bytes, &user)
            .unwrap();
        assert_eq!(all, "* Chorus Verse ");

        let custom = PptParser::new()
            .with_exclusions(ExclusionSet::new(["Chorus"]))
            .parse_streams(&stream.bytes, &user)
            .unwrap();
        assert_eq!(custom, "* Verse ");
    }

    #[test]
    fn test_parse_empty_reader() {
        let text = PptParser::new().parse(Cursor::new(Vec::<u8>::new())).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_parse_rejects_non_cfb_input() {
        let err = PptParser::new()
            .parse(Cursor::new(b"PK\x03\x04 not a ppt".to_vec()))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));

        let err = PptParser::new()
            .parse(Cursor::new(b"plain text".to_vec()))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
