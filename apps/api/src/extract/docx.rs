//! Modern Word (.docx) format reader.
//!
//! A docx file is a zip archive; the document body lives in
//! `word/document.xml` with text runs in `<w:t>` elements. The XML is
//! streamed with `quick_xml` so a parse error midway keeps whatever text was
//! already collected — partial text beats total failure. Encrypted or
//! non-zip payloads surface as decode failures.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::warn;

use super::{ExtractError, FileKind};

/// Cap on the decompressed document body, as defense against zip bombs.
const MAX_DOCUMENT_XML_BYTES: u64 = 64 * 1024 * 1024;

pub fn read(bytes: &[u8]) -> Result<String, ExtractError> {
    let cursor = Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor).map_err(|e| ExtractError::Malformed {
        kind: FileKind::Docx,
        reason: format!("not a readable docx archive: {e}"),
    })?;

    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Malformed {
            kind: FileKind::Docx,
            reason: format!("missing document body: {e}"),
        })?;

    if entry.size() > MAX_DOCUMENT_XML_BYTES {
        return Err(ExtractError::Malformed {
            kind: FileKind::Docx,
            reason: format!("document body exceeds {MAX_DOCUMENT_XML_BYTES} bytes"),
        });
    }

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Malformed {
            kind: FileKind::Docx,
            reason: format!("failed to read document body: {e}"),
        })?;

    let text = collect_text_runs(&xml);
    if text.trim().is_empty() {
        return Err(ExtractError::NoTextLayer {
            kind: FileKind::Docx,
        });
    }
    Ok(text)
}

/// Walks the document XML collecting `<w:t>` text, with a newline at each
/// paragraph end. On a mid-stream XML error the text gathered so far is kept.
fn collect_text_runs(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    let mut output = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::Text(e)) => {
                if in_text_run {
                    match e.unescape() {
                        Ok(text) => output.push_str(&text),
                        Err(_) => output.push_str(&String::from_utf8_lossy(e.as_ref())),
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => output.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:br" => output.push('\n'),
                b"w:tab" => output.push(' '),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                // Corrupted section: stop here, keep the readable prefix.
                warn!("docx body parse stopped early: {e}");
                break;
            }
            _ => {}
        }
    }

    output
}
