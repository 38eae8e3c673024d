//! PDF format reader.
//!
//! Wraps `pdf_extract` over in-memory bytes. The parser is known to panic on
//! some malformed inputs, so the call runs under `catch_unwind`; a panic is
//! reported as a decode failure for that document only, never as a process
//! fault. A structurally valid PDF that yields no text (image-only scans) is
//! distinguished as `NoTextLayer`.

use std::panic;

use tracing::warn;

use super::{ExtractError, FileKind};

pub fn read(bytes: &[u8]) -> Result<String, ExtractError> {
    let result = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    let text = match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            return Err(ExtractError::Malformed {
                kind: FileKind::Pdf,
                reason: e.to_string(),
            })
        }
        Err(_) => {
            warn!("pdf parser panicked on malformed input");
            return Err(ExtractError::Malformed {
                kind: FileKind::Pdf,
                reason: "parser aborted on malformed document structure".to_string(),
            });
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractError::NoTextLayer {
            kind: FileKind::Pdf,
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a minimal single-page PDF with one text object, computing the
    /// cross-reference offsets as the body is assembled.
    fn minimal_pdf(text: &str) -> Vec<u8> {
        let mut body: Vec<u8> = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();

        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];
        for (i, obj) in objects.iter().enumerate() {
            offsets.push(body.len());
            body.extend_from_slice(format!("{} 0 obj\n{obj}\nendobj\n", i + 1).as_bytes());
        }

        let xref_offset = body.len();
        body.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        body.extend_from_slice(b"0000000000 65535 f \n");
        for off in offsets {
            body.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
        }
        body.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF",
                objects.len() + 1
            )
            .as_bytes(),
        );
        body
    }

    #[test]
    fn test_well_formed_pdf_returns_its_text() {
        let text = read(&minimal_pdf("Jane Doe - Python Developer")).unwrap();
        assert!(text.contains("Jane Doe"), "got: {text:?}");
        assert!(text.contains("Python Developer"), "got: {text:?}");
    }

    #[test]
    fn test_empty_bytes_are_malformed() {
        assert!(matches!(
            read(b""),
            Err(ExtractError::Malformed { kind: FileKind::Pdf, .. })
        ));
    }

    #[test]
    fn test_truncated_header_is_malformed_not_a_panic() {
        // A bare header with no xref table; must come back as an error value.
        assert!(read(b"%PDF-1.7\n").is_err());
    }
}
