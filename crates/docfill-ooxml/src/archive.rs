//! Archive handling for DOCX files
//!
//! A DOCX file is a ZIP archive of XML parts and resources. The
//! archive is unpacked fully into memory, mutated in place, and
//! written back out in one shot; every part the substitution does not
//! touch round-trips byte-for-byte.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::ZipWriter;
use zip::CompressionMethod;

use crate::error::{DocxError, Result};

/// Path of the main document part inside the archive
pub const DOCUMENT_PART: &str = "word/document.xml";

/// An unpacked DOCX document
#[derive(Debug, Clone)]
pub struct DocxArchive {
    // BTreeMap keeps write-out order deterministic
    parts: BTreeMap<String, Vec<u8>>,
}

impl DocxArchive {
    /// Open and unpack a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Unpack from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directory entries
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            parts.insert(name, contents);
        }

        Ok(Self { parts })
    }

    /// Get a part's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(|v| v.as_slice())
    }

    /// Get the main document content (word/document.xml).
    ///
    /// A package without this part is not a Word document.
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_PART)
            .ok_or_else(|| DocxError::MissingPart(DOCUMENT_PART.to_string()))
    }

    /// Set or replace a part's contents
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.parts.insert(path.into(), contents);
    }

    /// Check if a part exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    /// List all part paths in the archive
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(|s| s.as_str())
    }

    /// Write the archive to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options =
            zip::write::SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (path, contents) in &self.parts {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Write the archive to `path` atomically.
    ///
    /// The archive is first written to a temporary file in the
    /// destination directory and only renamed over `path` once the
    /// write succeeded, so a failed save never leaves a partial file
    /// that looks like a finished document.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        self.write_to(&mut tmp)?;
        tmp.persist(path)?;
        Ok(())
    }
}
