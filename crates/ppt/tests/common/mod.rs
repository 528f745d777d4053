//! Compound-file fixtures on top of the crate's record builders.

#![allow(dead_code)]

use std::io::{Cursor, Write};

pub use pptext_ppt::testing::*;

/// Build an in-memory compound file holding the given root streams.
pub fn compound_file(streams: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cfb = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
    for (name, data) in streams {
        let mut stream = cfb.create_stream(format!("/{}", name)).unwrap();
        stream.write_all(data).unwrap();
    }
    cfb.flush().unwrap();
    cfb.into_inner().into_inner()
}

/// A compound file with both PowerPoint streams.
pub fn ppt_file(document: &[u8], current_user: &[u8]) -> Vec<u8> {
    compound_file(&[
        ("PowerPoint Document", document),
        ("Current User", current_user),
    ])
}
