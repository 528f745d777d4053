//! Text atom decoding and the shared text accumulator.

use encoding_rs::UTF_16LE;
use pptext_core::ExclusionSet;

/// Decode a `TextCharsAtom` / `TextBytesAtom` payload.
///
/// The record type is not trusted to say which encoding is used. A payload
/// holding any zero byte is taken to be UTF-16LE already; otherwise every byte
/// is widened to a UTF-16 code unit. Paragraph breaks (CR) become LF.
pub fn decode_text_atom(payload: &[u8]) -> String {
    let text = if payload.contains(&0) {
        decode_utf16le(payload)
    } else {
        let widened: Vec<u8> = payload.iter().flat_map(|&b| [b, 0x00]).collect();
        decode_utf16le(&widened)
    };

    text.replace('\r', "\n")
}

/// Decode a `CString` payload, which is always UTF-16LE.
pub fn decode_cstring(payload: &[u8]) -> String {
    decode_utf16le(payload)
}

fn decode_utf16le(bytes: &[u8]) -> String {
    let (text, _) = UTF_16LE.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Collects text candidates in decode order.
///
/// Strings matching the exclusion set are dropped. Kept strings are followed
/// by a single space unless they already end with one.
#[derive(Debug, Clone, Default)]
pub struct TextAccumulator {
    exclusions: ExclusionSet,
    buffer: String,
}

impl TextAccumulator {
    /// Create an accumulator filtering with the given exclusion set.
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self {
            exclusions,
            buffer: String::new(),
        }
    }

    /// Offer a decoded string. Returns whether it was kept.
    pub fn push(&mut self, text: &str) -> bool {
        if self.exclusions.contains(text) {
            log::trace!("Excluded placeholder text {:?}", text);
            return false;
        }

        self.buffer.push_str(text);
        if !text.ends_with(' ') {
            self.buffer.push(' ');
        }
        true
    }

    /// Text collected so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Whether nothing but whitespace has been collected.
    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// Finish, yielding an empty string when only whitespace was collected.
    pub fn into_text(self) -> String {
        if self.is_blank() {
            String::new()
        } else {
            self.buffer
        }
    }
}
