//! Text Cleaner — normalizes raw extracted text into the canonical form
//! consumed by all downstream pattern matching.
//!
//! `clean` is total and idempotent: it never fails, and cleaning already
//! clean text is a no-op. The worst case is an empty string.

/// Normalizes raw extracted text.
///
/// Steps (order-independent result):
/// - drop control characters and replacement characters left by lossy decoding
/// - collapse every run of whitespace (including newlines) to a single space
/// - trim leading and trailing whitespace
pub fn clean(raw: &str) -> String {
    let printable: String = raw
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| !c.is_control() && *c != '\u{FFFD}')
        .collect();

    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(clean("a  b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn test_trims_ends() {
        assert_eq!(clean("   hello world   "), "hello world");
    }

    #[test]
    fn test_strips_control_characters() {
        let cleaned = clean("a\u{0}b\u{7}c\u{1B}[0m");
        assert!(!cleaned.chars().any(|c| c.is_control()));
        assert_eq!(cleaned, "abc[0m");
    }

    #[test]
    fn test_strips_replacement_characters() {
        assert_eq!(clean("r\u{FFFD}sum\u{FFFD}"), "rsum");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "  Jane   Doe \n Software\tEngineer  ",
            "already clean",
            "",
            "\u{0}\u{1}\u{2}",
        ];
        for input in inputs {
            let once = clean(input);
            assert_eq!(clean(&once), once, "clean not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_never_leaves_consecutive_whitespace() {
        let cleaned = clean("a \u{00A0} b\r\n\r\nc");
        assert!(!cleaned.contains("  "));
        assert!(!cleaned.contains('\n'));
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(clean(" \n\t\r "), "");
    }
}
