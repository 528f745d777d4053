//! Core types for recovering text from legacy PowerPoint documents:
//! the error taxonomy, extraction options and container format detection.

pub mod error;
pub mod options;
pub mod types;

pub use error::{Error, Result};
pub use options::{ExclusionSet, ExtractOptions};
pub use types::DocumentFormat;
