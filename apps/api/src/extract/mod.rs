//! Text Extractor — turns an uploaded document byte stream into raw text.
//!
//! Dispatch is strictly on the declared file extension (case-insensitive),
//! never on content sniffing. Each format reader is independent and prefers
//! partial text over total failure; a reader only errors when it can recover
//! nothing at all.

pub mod cleaner;
mod doc;
mod docx;
mod pdf;

use std::fmt;

use thiserror::Error;

/// Supported document formats, parsed from the uploaded file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Doc,
    Docx,
}

impl FileKind {
    /// Case-insensitive extension lookup. `None` means unsupported.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "doc" => Some(FileKind::Doc),
            "docx" => Some(FileKind::Docx),
            _ => None,
        }
    }

    /// Extracts the extension from a filename and resolves it.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let ext = filename.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
        FileKind::from_extension(ext)
            .ok_or_else(|| ExtractError::UnsupportedFormat(ext.to_string()))
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Pdf => write!(f, "pdf"),
            FileKind::Doc => write!(f, "doc"),
            FileKind::Docx => write!(f, "docx"),
        }
    }
}

/// Failure taxonomy for the extraction pipeline.
///
/// `Malformed` and `NoTextLayer` are both decode failures, kept distinct so
/// callers can tell "parser could not read the document" apart from
/// "document is structurally valid but carries no text" (e.g. a scanned PDF).
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format '.{0}' (expected .pdf, .doc, or .docx)")]
    UnsupportedFormat(String),

    #[error("failed to decode {kind} document: {reason}")]
    Malformed { kind: FileKind, reason: String },

    #[error("{kind} document contains no extractable text layer")]
    NoTextLayer { kind: FileKind },
}

/// Extracts raw text from document bytes, dispatching on the filename's
/// extension. Returns `UnsupportedFormat` before any reader runs.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    let kind = FileKind::from_filename(filename)?;
    match kind {
        FileKind::Pdf => pdf::read(bytes),
        FileKind::Doc => doc::read(bytes),
        FileKind::Docx => docx::read(bytes),
    }
}
