//! Taxonomy — the single source of truth for what counts as a skill.
//!
//! A read-only registry mapping category → canonical skill → surface-form
//! variants, built once at startup and shared behind an `Arc`. Matching is
//! case-insensitive, respects token boundaries ("java" never matches inside
//! "javascript"), and prefers the longest phrase at a given position
//! ("machine learning" wins over "machine" + "learning").

use std::collections::HashMap;

use anyhow::{bail, Result};

/// (category, canonical skill, extra surface-form variants).
/// The canonical name is always matchable as its own variant.
const TABLE: &[(&str, &str, &[&str])] = &[
    ("programming_languages", "python", &[]),
    ("programming_languages", "java", &[]),
    ("programming_languages", "javascript", &["js"]),
    ("programming_languages", "typescript", &["ts"]),
    ("programming_languages", "c++", &["cpp"]),
    ("programming_languages", "c#", &["csharp"]),
    ("programming_languages", "rust", &[]),
    ("programming_languages", "go", &["golang"]),
    ("programming_languages", "ruby", &[]),
    ("programming_languages", "php", &[]),
    ("programming_languages", "swift", &[]),
    ("programming_languages", "kotlin", &[]),
    ("programming_languages", "scala", &[]),
    ("web_development", "html", &["html5"]),
    ("web_development", "css", &["css3"]),
    ("web_development", "react", &["react.js", "reactjs"]),
    ("web_development", "angular", &["angularjs"]),
    ("web_development", "vue", &["vue.js", "vuejs"]),
    ("web_development", "node.js", &["nodejs", "node"]),
    ("web_development", "express", &["express.js"]),
    ("web_development", "django", &[]),
    ("web_development", "flask", &[]),
    ("web_development", "spring boot", &["spring"]),
    ("web_development", "rest api", &["rest", "restful"]),
    ("databases", "sql", &[]),
    ("databases", "mysql", &[]),
    ("databases", "postgresql", &["postgres"]),
    ("databases", "mongodb", &["mongo"]),
    ("databases", "redis", &[]),
    ("databases", "sqlite", &[]),
    ("databases", "elasticsearch", &[]),
    ("databases", "oracle", &[]),
    ("cloud_devops", "aws", &["amazon web services"]),
    ("cloud_devops", "azure", &[]),
    ("cloud_devops", "gcp", &["google cloud"]),
    ("cloud_devops", "docker", &[]),
    ("cloud_devops", "kubernetes", &["k8s"]),
    ("cloud_devops", "terraform", &[]),
    ("cloud_devops", "jenkins", &[]),
    ("cloud_devops", "ci/cd", &[]),
    ("cloud_devops", "git", &[]),
    ("cloud_devops", "linux", &[]),
    ("cloud_devops", "ansible", &[]),
    ("data_science", "machine learning", &["ml"]),
    ("data_science", "deep learning", &[]),
    ("data_science", "tensorflow", &[]),
    ("data_science", "pytorch", &[]),
    ("data_science", "pandas", &[]),
    ("data_science", "numpy", &[]),
    ("data_science", "scikit-learn", &["sklearn"]),
    ("data_science", "data analysis", &["data analytics"]),
    ("data_science", "nlp", &["natural language processing"]),
    ("data_science", "computer vision", &[]),
    ("data_science", "spark", &["apache spark"]),
    ("mobile", "android", &[]),
    ("mobile", "ios", &[]),
    ("mobile", "react native", &[]),
    ("mobile", "flutter", &[]),
    ("soft_skills", "leadership", &[]),
    ("soft_skills", "communication", &[]),
    ("soft_skills", "teamwork", &[]),
    ("soft_skills", "problem solving", &[]),
    ("soft_skills", "project management", &[]),
    ("soft_skills", "agile", &[]),
    ("soft_skills", "scrum", &[]),
];

#[derive(Debug, Clone)]
struct Entry {
    category: &'static str,
    canonical: &'static str,
}

/// Immutable skill registry. Safe for concurrent reads; never mutated after
/// construction.
pub struct Taxonomy {
    entries: Vec<Entry>,
    /// Normalized variant phrase → index into `entries`. Variants are unique
    /// across the whole registry so a phrase resolves to exactly one skill.
    index: HashMap<String, usize>,
    max_phrase_words: usize,
}

impl Taxonomy {
    /// Builds the built-in registry. Panics at startup if the static table
    /// violates the variant-uniqueness invariant (covered by tests).
    pub fn builtin() -> Self {
        Self::from_table(TABLE).expect("built-in taxonomy table is invalid")
    }

    fn from_table(table: &[(&'static str, &'static str, &[&'static str])]) -> Result<Self> {
        let mut entries = Vec::with_capacity(table.len());
        let mut index = HashMap::new();
        let mut max_phrase_words = 1;

        for &(category, canonical, variants) in table {
            let entry_idx = entries.len();
            entries.push(Entry {
                category,
                canonical,
            });

            for variant in std::iter::once(&canonical).chain(variants) {
                let key = normalize_phrase(variant);
                if key.is_empty() {
                    bail!("variant '{variant}' normalizes to nothing");
                }
                max_phrase_words = max_phrase_words.max(key.split(' ').count());
                if index.insert(key.clone(), entry_idx).is_some() {
                    bail!("variant '{variant}' registered for more than one skill");
                }
            }
        }

        Ok(Self {
            entries,
            index,
            max_phrase_words,
        })
    }

    /// Number of skills in the registry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a single phrase to `(category, canonical)`, case-insensitively.
    pub fn lookup(&self, phrase: &str) -> Option<(&'static str, &'static str)> {
        let key = normalize_phrase(phrase);
        self.index
            .get(&key)
            .map(|&i| (self.entries[i].category, self.entries[i].canonical))
    }

    /// Scans text and returns every taxonomy match as `(category, canonical)`,
    /// in order of appearance. Longest phrase wins at each position; matched
    /// tokens are consumed so submatches inside a phrase are not reported.
    /// Duplicates are preserved here; deduplication is the analyzer's job.
    pub fn matches(&self, text: &str) -> Vec<(&'static str, &'static str)> {
        let tokens = tokenize(text);
        let mut found = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let max_n = self.max_phrase_words.min(tokens.len() - i);
            let mut advanced = false;

            for n in (1..=max_n).rev() {
                let phrase = tokens[i..i + n].join(" ");
                if let Some(&idx) = self.index.get(&phrase) {
                    found.push((self.entries[idx].category, self.entries[idx].canonical));
                    i += n;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                i += 1;
            }
        }

        found
    }
}

/// Splits text into lowercase tokens. Token characters are alphanumerics plus
/// `+`, `#`, `.` and `-` so that "c++", "c#", "node.js" and "scikit-learn"
/// survive as single tokens; stray leading/trailing punctuation is trimmed.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '-') {
            current.extend(c.to_lowercase());
        } else {
            push_token(&mut tokens, &mut current);
        }
    }
    push_token(&mut tokens, &mut current);
    tokens
}

fn push_token(tokens: &mut Vec<String>, current: &mut String) {
    let token = std::mem::take(current);
    let trimmed = token.trim_matches(|c| matches!(c, '.' | '-'));
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
}

/// Normalizes a variant or query phrase to its token-joined form, so that
/// "CI/CD", "ci cd" and "Ci/Cd" all map to the same index key.
fn normalize_phrase(phrase: &str) -> String {
    tokenize(phrase).join(" ")
}
