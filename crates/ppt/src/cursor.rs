//! Bounds-checked helpers over the in-memory stream cursor.
//!
//! Every structure in the document stream is addressed by byte offset, so
//! decoding works on a `Cursor<&[u8]>`. Reads that run off the end of the
//! buffer are reported as corruption, not as I/O failures.

use byteorder::{LittleEndian, ReadBytesExt};
use pptext_core::{Error, Result};
use std::io::{self, Cursor, Read};

/// Cursor over a fully materialized stream.
pub type StreamCursor<'a> = Cursor<&'a [u8]>;

/// Map a short read to a corruption error naming the structure being read.
pub(crate) fn truncated(what: &'static str) -> impl FnOnce(io::Error) -> Error {
    move |e| Error::CorruptedFile(format!("truncated {}: {}", what, e))
}

/// Bytes left between the cursor and the end of the buffer.
pub(crate) fn remaining(cursor: &StreamCursor<'_>) -> u64 {
    (cursor.get_ref().len() as u64).saturating_sub(cursor.position())
}

/// Position the cursor at an absolute offset that must lie inside the buffer.
pub(crate) fn seek_to(cursor: &mut StreamCursor<'_>, offset: u32, what: &'static str) -> Result<()> {
    let len = cursor.get_ref().len() as u64;
    if u64::from(offset) >= len {
        return Err(Error::CorruptedFile(format!(
            "{} offset 0x{:X} lies outside the {}-byte stream",
            what, offset, len
        )));
    }
    cursor.set_position(u64::from(offset));
    Ok(())
}

/// End offset of a payload of `size` bytes starting at the cursor, checked
/// against the buffer length.
pub(crate) fn payload_end(cursor: &StreamCursor<'_>, size: u32, what: &'static str) -> Result<u64> {
    if u64::from(size) > remaining(cursor) {
        return Err(Error::CorruptedFile(format!(
            "{} at 0x{:X} declares {} bytes but only {} remain",
            what,
            cursor.position(),
            size,
            remaining(cursor)
        )));
    }
    Ok(cursor.position() + u64::from(size))
}

/// Read exactly `size` bytes.
pub(crate) fn read_bytes(cursor: &mut StreamCursor<'_>, size: u32, what: &'static str) -> Result<Vec<u8>> {
    payload_end(cursor, size, what)?;
    let mut buf = vec![0u8; size as usize];
    cursor.read_exact(&mut buf).map_err(truncated(what))?;
    Ok(buf)
}

pub(crate) fn read_u8(cursor: &mut StreamCursor<'_>, what: &'static str) -> Result<u8> {
    cursor.read_u8().map_err(truncated(what))
}

pub(crate) fn read_u16(cursor: &mut StreamCursor<'_>, what: &'static str) -> Result<u16> {
    cursor.read_u16::<LittleEndian>().map_err(truncated(what))
}

pub(crate) fn read_u32(cursor: &mut StreamCursor<'_>, what: &'static str) -> Result<u32> {
    cursor.read_u32::<LittleEndian>().map_err(truncated(what))
}
