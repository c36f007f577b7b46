//! Error types for DOCX operations

use thiserror::Error;

/// Errors that can occur while loading, rewriting or saving a DOCX file
#[derive(Error, Debug)]
pub enum DocxError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing or writing XML content
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required part not found in the archive
    #[error("Required part not found: {0}")]
    MissingPart(String),

    /// Saved output could not be moved into place
    #[error("Failed to persist output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, DocxError>;
