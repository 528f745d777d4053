//! The fixed 8-byte header that precedes every record.
//!
//! Layout (little-endian):
//! - bytes 0-1: recVer (low 4 bits) + recInstance (high 12 bits)
//! - bytes 2-3: recType
//! - bytes 4-7: recLen, payload length excluding the header

use crate::cursor::{truncated, StreamCursor};
use crate::record_types;
use byteorder::{LittleEndian, ReadBytesExt};
use pptext_core::Result;

/// Encoded size of a record header in bytes.
pub const HEADER_SIZE: u32 = 8;

/// `recVer` value that marks a container record.
pub const CONTAINER_VERSION: u8 = 0x0F;

const VERSION_MASK: u16 = 0x000F;
const INSTANCE_SHIFT: u16 = 4;

/// Decoded record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// 4-bit record version. `0xF` means container.
    pub version: u8,
    /// 12-bit record instance.
    pub instance: u16,
    /// Record type code.
    pub type_code: u16,
    /// Payload length in bytes, header excluded.
    pub size: u32,
}

impl RecordHeader {
    /// Consume 8 bytes from the cursor and decode them.
    pub fn read(cursor: &mut StreamCursor<'_>) -> Result<Self> {
        let ver_instance = cursor
            .read_u16::<LittleEndian>()
            .map_err(truncated("record header"))?;
        let type_code = cursor
            .read_u16::<LittleEndian>()
            .map_err(truncated("record header"))?;
        let size = cursor
            .read_u32::<LittleEndian>()
            .map_err(truncated("record header"))?;

        Ok(Self {
            version: (ver_instance & VERSION_MASK) as u8,
            instance: ver_instance >> INSTANCE_SHIFT,
            type_code,
            size,
        })
    }

    /// Read the version nibble of the record at the cursor without consuming it.
    pub fn peek_version(cursor: &mut StreamCursor<'_>) -> Result<u8> {
        let position = cursor.position();
        let ver_instance = cursor.read_u16::<LittleEndian>();
        cursor.set_position(position);

        let ver_instance = ver_instance.map_err(truncated("record header"))?;
        Ok((ver_instance & VERSION_MASK) as u8)
    }

    /// Whether the header introduces a container. Decided by the version alone.
    pub fn is_container(&self) -> bool {
        self.version == CONTAINER_VERSION
    }

    /// Encode the header back into its on-disk form.
    pub fn to_bytes(&self) -> [u8; 8] {
        let ver_instance =
            (u16::from(self.version) & VERSION_MASK) | (self.instance << INSTANCE_SHIFT);
        let mut bytes = [0u8; 8];
        bytes[0..2].copy_from_slice(&ver_instance.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.type_code.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.size.to_le_bytes());
        bytes
    }

    /// Type name for diagnostics.
    pub fn type_name(&self) -> String {
        record_types::describe(self.type_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pptext_core::Error;
    use std::io::Cursor;

    #[test]
    fn test_read_header_fields() {
        // ver=0xF, instance=0x123, type=0x03EE, size=0x10
        let data = [0x3F, 0x12, 0xEE, 0x03, 0x10, 0x00, 0x00, 0x00];
        let mut cursor = Cursor::new(&data[..]);

        let header = RecordHeader::read(&mut cursor).unwrap();
        assert_eq!(header.version, 0x0F);
        assert_eq!(header.instance, 0x123);
        assert_eq!(header.type_code, record_types::RT_SLIDE);
        assert_eq!(header.size, 16);
        assert!(header.is_container());
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_bit_split_matches_first_word() {
        for word in [0x0000u16, 0x000F, 0x0010, 0xFFF0, 0xFFFF, 0xABCD, 0x1234] {
            let mut data = word.to_le_bytes().to_vec();
            data.extend_from_slice(&[0xA0, 0x0F, 0x05, 0x00, 0x00, 0x00]);
            let mut cursor = Cursor::new(&data[..]);

            let header = RecordHeader::read(&mut cursor).unwrap();
            assert_eq!(u16::from(header.version), word & 0x000F);
            assert_eq!(header.instance, word >> 4);
            assert_eq!(header.to_bytes().to_vec(), data);
        }
    }

    #[test]
    fn test_container_decided_by_version_only() {
        // A text atom type code with a container version is still a container
        let container = RecordHeader {
            version: 0x0F,
            instance: 0,
            type_code: record_types::RT_TEXT_CHARS_ATOM,
            size: 0,
        };
        assert!(container.is_container());

        // A container type code with an atom version is still an atom
        for version in 0..0x0F {
            let atom = RecordHeader {
                version,
                instance: 0,
                type_code: record_types::RT_DOCUMENT,
                size: 0,
            };
            assert!(!atom.is_container());
        }
    }

    #[test]
    fn test_peek_version_restores_position() {
        let data = [0x00, 0x00, 0x2F, 0x00, 0xF0, 0x03, 0x00, 0x00];
        let mut cursor = Cursor::new(&data[..]);
        cursor.set_position(2);

        assert_eq!(RecordHeader::peek_version(&mut cursor).unwrap(), 0x0F);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_truncated_header() {
        let data = [0x0F, 0x00, 0xE8, 0x03, 0x00];
        let mut cursor = Cursor::new(&data[..]);

        let err = RecordHeader::read(&mut cursor).unwrap_err();
        assert!(matches!(err, Error::CorruptedFile(_)));

        let mut cursor = Cursor::new(&data[4..]);
        assert!(RecordHeader::peek_version(&mut cursor).is_err());
        assert_eq!(cursor.position(), 0);
    }
}
