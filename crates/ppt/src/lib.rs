//! Legacy PPT (OLE/CFB) text recovery.
//!
//! Decodes the record tree of the "PowerPoint Document" stream and rebuilds
//! the current object graph from its append-only save history, collecting
//! the text of every live object.

pub mod aggregate;
pub mod current_user;
pub mod cursor;
pub mod header;
pub mod parser;
pub mod persist;
pub mod record;
pub mod record_types;
pub mod text;
pub mod user_edit;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use current_user::CurrentUserAtom;
pub use header::RecordHeader;
pub use parser::PptParser;
pub use persist::{PersistDirectoryAtom, PersistDirectoryEntry, PersistMapping, PersistObject};
pub use record::{Atom, AtomPayload, Container, Record, RecordDecoder};
pub use text::TextAccumulator;
pub use user_edit::{walk_edit_chain, UserEditAtom};
