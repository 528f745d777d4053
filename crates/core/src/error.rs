//! Error types for legacy PowerPoint text extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during PowerPoint text extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input is not a legacy compound-file presentation.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// A required named stream is absent from the compound file.
    #[error("Could not find the {0} stream inside the PPT file")]
    MissingStream(String),

    /// The document is protected; its records cannot be decoded.
    #[error("The PowerPoint file is encrypted and cannot be read")]
    Encrypted,

    /// Truncated data, out-of-bounds offsets or inconsistent record sizes.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),

    /// OLE/CFB container error.
    #[error("OLE/CFB error: {0}")]
    CfbError(String),

    /// Extraction options could not be parsed.
    #[error("Invalid extraction options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// Whether this error means the document is protected rather than malformed.
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Error::Encrypted)
    }
}
