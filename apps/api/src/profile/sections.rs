//! Heuristic section segmentation.
//!
//! Résumés have no schema; a "section" here is a line that looks like a
//! header (short, starts with a known header keyword) followed by everything
//! up to the next header or end of text. This is best-effort fuzzy matching,
//! not a grammar: a document without recognizable headers yields no sections
//! and that is not an error.

use crate::extract::cleaner::clean;

/// Which résumé section a segmented span belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Experience,
    Projects,
    Education,
    Skills,
}

/// A contiguous span of text attributed to one section occurrence.
#[derive(Debug, Clone)]
pub struct SectionEntry {
    pub kind: SectionKind,
    /// Nonempty, whitespace-normalized lines of the span, in document order.
    pub lines: Vec<String>,
}

/// A header line has at most this many words; longer lines are body text
/// that merely mentions a section word.
const MAX_HEADER_WORDS: usize = 4;

/// Cap on lines kept per section, against pathological documents.
const MAX_LINES_PER_SECTION: usize = 20;

const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment",
    "employment history",
    "work history",
];
const PROJECT_HEADERS: &[&str] = &["projects", "personal projects", "academic projects"];
const EDUCATION_HEADERS: &[&str] = &["education", "academic background"];
const SKILL_HEADERS: &[&str] = &["skills", "technical skills", "core skills"];

/// Segments raw (line-structured) text into tagged section spans.
/// Works on the raw text rather than the cleaned form because cleaning
/// collapses the newlines the heuristic depends on.
pub fn segment(raw_text: &str) -> Vec<SectionEntry> {
    let mut sections: Vec<SectionEntry> = Vec::new();
    let mut current: Option<SectionEntry> = None;

    for line in raw_text.lines() {
        if let Some(kind) = detect_header(line) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(SectionEntry {
                kind,
                lines: Vec::new(),
            });
            continue;
        }

        if let Some(section) = current.as_mut() {
            let normalized = clean(line);
            if !normalized.is_empty() && section.lines.len() < MAX_LINES_PER_SECTION {
                section.lines.push(normalized);
            }
        }
    }

    if let Some(section) = current.take() {
        sections.push(section);
    }
    sections
}

/// Classifies a line as a section header, if it is one.
fn detect_header(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim().trim_end_matches([':', '-', '—']).trim();
    if trimmed.is_empty() || trimmed.split_whitespace().count() > MAX_HEADER_WORDS {
        return None;
    }
    let lowered = trimmed.to_lowercase();

    let starts_with_any =
        |headers: &[&str]| headers.iter().any(|h| lowered == *h || lowered.starts_with(&format!("{h} ")));

    if starts_with_any(EXPERIENCE_HEADERS) {
        Some(SectionKind::Experience)
    } else if starts_with_any(PROJECT_HEADERS) {
        Some(SectionKind::Projects)
    } else if starts_with_any(EDUCATION_HEADERS) {
        Some(SectionKind::Education)
    } else if starts_with_any(SKILL_HEADERS) {
        Some(SectionKind::Skills)
    } else {
        None
    }
}
