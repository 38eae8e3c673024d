//! Legacy Word binary (.doc) format reader.
//!
//! The OLE compound-document format has no lightweight parser in this stack,
//! so the reader validates the compound-document magic and then scavenges
//! printable character runs from the raw stream. Word stores body text either
//! as single-byte cp1252 or as UTF-16LE depending on content, so both
//! decodings are attempted and the richer result wins. Formatting artifacts
//! that slip through are absorbed by the cleaner and word-boundary matching
//! downstream.

use super::{ExtractError, FileKind};

const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// A run shorter than this is considered binary noise, not text.
const MIN_RUN_CHARS: usize = 4;

pub fn read(bytes: &[u8]) -> Result<String, ExtractError> {
    if !bytes.starts_with(&OLE_MAGIC) {
        return Err(ExtractError::Malformed {
            kind: FileKind::Doc,
            reason: "not an OLE compound document".to_string(),
        });
    }

    let single_byte = scavenge_single_byte(bytes);
    let utf16 = scavenge_utf16le(bytes);
    let text = if utf16.len() > single_byte.len() {
        utf16
    } else {
        single_byte
    };

    if text.trim().is_empty() {
        return Err(ExtractError::NoTextLayer {
            kind: FileKind::Doc,
        });
    }
    Ok(text)
}

fn is_text_byte(b: u8) -> bool {
    (0x20..0x7F).contains(&b) || b == b'\t' || b == b'\n' || b == b'\r' || b >= 0xC0
}

/// Collects printable runs assuming single-byte (cp1252-family) text.
fn scavenge_single_byte(bytes: &[u8]) -> String {
    let mut runs = Vec::new();
    let mut current = String::new();

    for &b in bytes {
        if is_text_byte(b) {
            // cp1252 high bytes map close enough to their Latin-1 code points.
            current.push(char::from(b));
        } else {
            flush_run(&mut runs, &mut current);
        }
    }
    flush_run(&mut runs, &mut current);
    runs.join("\n")
}

/// Collects printable runs assuming UTF-16LE text (high byte zero).
fn scavenge_utf16le(bytes: &[u8]) -> String {
    let mut runs = Vec::new();
    let mut current = String::new();

    for pair in bytes.chunks_exact(2) {
        let (low, high) = (pair[0], pair[1]);
        if high == 0 && is_text_byte(low) {
            current.push(char::from(low));
        } else {
            flush_run(&mut runs, &mut current);
        }
    }
    flush_run(&mut runs, &mut current);
    runs.join("\n")
}

/// Keeps a run only if it is long enough and contains at least one letter;
/// everything else is treated as structural noise.
fn flush_run(runs: &mut Vec<String>, current: &mut String) {
    let run = std::mem::take(current);
    let trimmed = run.trim();
    if trimmed.chars().count() >= MIN_RUN_CHARS && trimmed.chars().any(|c| c.is_alphabetic()) {
        runs.push(trimmed.to_string());
    }
}
