//! # docfill-ooxml
//!
//! DOCX placeholder substitution. This crate provides functionality to:
//! - Open and unpack DOCX files, keeping untouched parts byte-identical
//! - Replace `{token}` placeholders in body and table paragraphs,
//!   even when a token's characters are split across text runs
//! - Restyle replaced text (font family, size, color)
//! - Discover the placeholder tokens a document contains
//! - Save the result atomically to a new file
//!
//! ## Example: Filling a Document
//!
//! ```no_run
//! use docfill_core::PlaceholderMap;
//! use docfill_ooxml::{fill_document, Substitutor};
//!
//! let mut values = PlaceholderMap::new();
//! values.insert("{company_name}", "marketian");
//!
//! let substitutor = Substitutor::new(values);
//! let report = fill_document("template.docx", "output.docx", &substitutor)?;
//! println!("{report}");
//! # Ok::<(), docfill_ooxml::DocxError>(())
//! ```

pub mod archive;
pub mod engine;
pub mod error;
mod rewrite;
pub mod scan;
pub mod test_utils;

pub use archive::{DocxArchive, DOCUMENT_PART};
pub use engine::{fill_document, Substitutor};
pub use error::{DocxError, Result};
pub use scan::{scan_document, FoundPlaceholder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
