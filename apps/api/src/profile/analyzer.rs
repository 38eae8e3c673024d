//! Info Extractor — builds the structured profile from cleaned text.
//!
//! This component never fails: a signal that cannot be found is an empty or
//! `None` field, and the caller decides whether that constitutes an error.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::profile::sections::{segment, SectionKind};
use crate::profile::taxonomy::{tokenize, Taxonomy};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern compiles")
});

/// Presence of any of these in the cleaned text is an experience signal.
const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "worked",
    "employment",
    "internship",
    "years",
    "position",
    "responsibilities",
    "company",
];

/// Presence of any of these is an education signal.
const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "degree",
    "university",
    "college",
    "bachelor",
    "master",
    "phd",
    "certification",
    "coursework",
    "gpa",
];

/// The structured profile — the core's sole externally visible output.
/// Created fresh per request; immutable once returned; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct StructuredProfile {
    pub email: Option<String>,
    /// Canonical skill names, first-seen order, each at most once.
    pub skills: Vec<String>,
    /// Category → canonical skills found, each list in first-seen order.
    /// A canonical skill appears under exactly one category.
    pub skills_by_category: BTreeMap<String, Vec<String>>,
    pub experience_keywords: Vec<String>,
    pub education_keywords: Vec<String>,
    pub experience_entries: Vec<String>,
    pub project_entries: Vec<String>,
}

/// Analyzes cleaned text (pattern matching) and raw text (line-structured
/// section segmentation) against the taxonomy.
pub fn analyze(clean_text: &str, raw_text: &str, taxonomy: &Taxonomy) -> StructuredProfile {
    let email = EMAIL_RE
        .find(clean_text)
        .map(|m| m.as_str().to_string());

    let mut skills = Vec::new();
    let mut skills_by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (category, canonical) in taxonomy.matches(clean_text) {
        if seen.insert(canonical) {
            skills.push(canonical.to_string());
            skills_by_category
                .entry(category.to_string())
                .or_default()
                .push(canonical.to_string());
        }
    }

    let tokens: HashSet<String> = tokenize(clean_text).into_iter().collect();
    let experience_keywords = keyword_hits(&tokens, EXPERIENCE_KEYWORDS);
    let education_keywords = keyword_hits(&tokens, EDUCATION_KEYWORDS);

    let mut experience_entries = Vec::new();
    let mut project_entries = Vec::new();
    for section in segment(raw_text) {
        match section.kind {
            SectionKind::Experience => experience_entries.extend(section.lines),
            SectionKind::Projects => project_entries.extend(section.lines),
            SectionKind::Education | SectionKind::Skills => {}
        }
    }

    StructuredProfile {
        email,
        skills,
        skills_by_category,
        experience_keywords,
        education_keywords,
        experience_entries,
        project_entries,
    }
}

/// Returns the keywords present in the text's token set, in list order.
/// Matching on whole tokens keeps "company" from firing inside words like
/// "accompanying". Presence, not frequency, is what downstream boolean
/// signals consume.
fn keyword_hits(tokens: &HashSet<String>, keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| tokens.contains(**kw))
        .map(|kw| kw.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax() -> Taxonomy {
        Taxonomy::builtin()
    }

    #[test]
    fn test_contact_scenario() {
        let text = "Contact: jane.doe@example.com Skills: Python, SQL, Machine Learning Experience: 3 years at Acme Corp";
        let profile = analyze(text, text, &tax());

        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
        assert!(profile.skills.contains(&"python".to_string()));
        assert!(profile.skills.contains(&"sql".to_string()));
        assert!(profile.skills.contains(&"machine learning".to_string()));
        assert!(!profile.experience_keywords.is_empty());
        assert!(profile.experience_keywords.contains(&"experience".to_string()));
        assert!(profile.experience_keywords.contains(&"years".to_string()));
    }

    #[test]
    fn test_empty_text_degrades_without_error() {
        let profile = analyze("", "", &tax());
        assert!(profile.email.is_none());
        assert!(profile.skills.is_empty());
        assert!(profile.skills_by_category.is_empty());
        assert!(profile.experience_keywords.is_empty());
        assert!(profile.experience_entries.is_empty());
    }

    #[test]
    fn test_repeated_skill_is_reported_once() {
        let text = "Python Python PYTHON python";
        let profile = analyze(text, text, &tax());
        assert_eq!(profile.skills, vec!["python"]);
        assert_eq!(
            profile.skills_by_category["programming_languages"],
            vec!["python"]
        );
    }

    #[test]
    fn test_skill_appears_in_exactly_one_category() {
        let text = "Python SQL Docker React machine learning";
        let profile = analyze(text, text, &tax());

        let mut all: Vec<&String> = profile.skills_by_category.values().flatten().collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total, "a skill was listed in more than one place");
        assert_eq!(total, profile.skills.len());
    }

    #[test]
    fn test_skills_keep_first_seen_order() {
        let text = "SQL then Python then Docker then SQL again";
        let profile = analyze(text, text, &tax());
        assert_eq!(profile.skills, vec!["sql", "python", "docker"]);
    }

    #[test]
    fn test_variant_reported_under_canonical_name() {
        let text = "Strong ML and Postgres background";
        let profile = analyze(text, text, &tax());
        assert!(profile.skills.contains(&"machine learning".to_string()));
        assert!(profile.skills.contains(&"postgresql".to_string()));
    }

    #[test]
    fn test_first_email_wins() {
        let text = "a@example.com and b@example.org";
        let profile = analyze(text, text, &tax());
        assert_eq!(profile.email.as_deref(), Some("a@example.com"));
    }

    #[test]
    fn test_no_email_is_none() {
        let profile = analyze("no contact details here", "", &tax());
        assert!(profile.email.is_none());
    }

    #[test]
    fn test_entries_come_from_raw_text_sections() {
        let raw = "Experience\nBackend work at Initech\n\nProjects\nChess engine\n";
        let clean = "Experience Backend work at Initech Projects Chess engine";
        let profile = analyze(clean, raw, &tax());
        assert_eq!(profile.experience_entries, vec!["Backend work at Initech"]);
        assert_eq!(profile.project_entries, vec!["Chess engine"]);
    }

    #[test]
    fn test_keywords_match_whole_tokens_only() {
        let text = "Accompanying notes on positioning and repositories";
        let profile = analyze(text, text, &tax());
        assert!(profile.experience_keywords.is_empty());

        let text = "Responsibilities at the company included positioning";
        let profile = analyze(text, text, &tax());
        assert_eq!(profile.experience_keywords, vec!["responsibilities", "company"]);
    }

    #[test]
    fn test_education_keywords_detected() {
        let text = "BS degree from State University, machine learning coursework";
        let profile = analyze(text, text, &tax());
        assert!(profile.education_keywords.contains(&"degree".to_string()));
        assert!(profile.education_keywords.contains(&"university".to_string()));
        assert!(profile.education_keywords.contains(&"coursework".to_string()));
    }
}
