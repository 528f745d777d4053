//! Text aggregation over the resolved persist objects.

use crate::cursor::{seek_to, StreamCursor};
use crate::persist::PersistMapping;
use crate::record::RecordDecoder;
use crate::text::TextAccumulator;
use pptext_core::{ExclusionSet, Result};

/// Decode every resolved object in resolution order and return the collected
/// text, or an empty string when only whitespace was found.
///
/// Each object's record tree is dropped as soon as it has been walked.
pub fn extract_text(
    cursor: &mut StreamCursor<'_>,
    objects: &PersistMapping,
    exclusions: ExclusionSet,
) -> Result<String> {
    let mut text = TextAccumulator::new(exclusions);

    for object in objects.iter() {
        seek_to(cursor, object.offset, "persist object")?;
        let record = RecordDecoder::new(&mut text).decode(cursor)?;
        log::trace!(
            "Persist object {} at 0x{:X}: {}",
            object.persist_id,
            object.offset,
            record.header().type_name()
        );
    }

    Ok(text.into_text())
}
