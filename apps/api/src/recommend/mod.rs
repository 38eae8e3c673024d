//! Recommendation collaborator — the single point of entry for all Gemini
//! API calls in SkillSift.
//!
//! ARCHITECTURAL RULE: no other module may call the Gemini API directly, and
//! nothing in the extraction core may depend on this module being present.
//! `AppState` carries `Option<Arc<dyn Recommender>>`; `None` means the
//! collaborator is unconfigured and the `/ai/*` routes answer 503 while
//! extraction keeps working.

pub mod handlers;
pub mod prompts;

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all recommendation calls.
pub const MODEL: &str = "gemini-1.5-flash";
const MAX_OUTPUT_TOKENS: u32 = 2048;
const MAX_RETRIES: u32 = 3;

/// Free-form user preferences forwarded to the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub industries: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Preferences {
    pub fn industries(&self) -> &str {
        self.industries.as_deref().unwrap_or("Not specified")
    }
    pub fn goals(&self) -> &str {
        self.goals.as_deref().unwrap_or("Not specified")
    }
    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or("Not specified")
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("model returned empty content")]
    EmptyContent,
}

/// The recommendation trait the HTTP layer programs against. Implement this
/// to swap collaborators without touching handlers or the extraction core.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Career role suggestions from the categorized skill inventory.
    async fn career_recommendations(
        &self,
        skills_by_category: &BTreeMap<String, Vec<String>>,
        preferences: &Preferences,
        experience_level: &str,
    ) -> Result<Value, AiError>;

    /// Improvement suggestions for the current skill set vs target roles.
    async fn skill_improvements(
        &self,
        current_skills: &[String],
        target_roles: &[String],
        preferences: &Preferences,
    ) -> Result<Value, AiError>;

    /// Gap analysis of the résumé text against stated preferences.
    async fn resume_gaps(
        &self,
        skills_by_category: &BTreeMap<String, Vec<String>>,
        preferences: &Preferences,
        resume_text: &str,
    ) -> Result<Value, AiError>;

    /// A staged learning path toward a target role.
    async fn learning_path(
        &self,
        current_skills: &[String],
        target_role: &str,
        learning_preference: &str,
    ) -> Result<Value, AiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini `generateContent` client with bounded retries and structured
/// output helpers.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a raw call, returning the model's text output.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent?key={}", self.api_key);
        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let mut last_error: Option<AiError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "AI call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self.client.post(&url).json(&request_body).send().await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AiError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("AI API returned {}: {}", status, body);
                last_error = Some(AiError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(AiError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: GenerateResponse = response.json().await?;
            let text = parsed
                .candidates
                .first()
                .and_then(|c| c.content.parts.first())
                .and_then(|p| p.text.clone())
                .ok_or(AiError::EmptyContent)?;

            debug!("AI call succeeded: {} output chars", text.len());
            return Ok(text);
        }

        Err(last_error.unwrap_or(AiError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the model and parses the response as JSON. The prompt must
    /// instruct the model to return valid JSON.
    pub async fn call_json(&self, prompt: &str) -> Result<Value, AiError> {
        let text = self.call(prompt).await?;
        let text = strip_json_fences(&text);
        serde_json::from_str(text).map_err(AiError::Parse)
    }
}

#[async_trait]
impl Recommender for GeminiClient {
    async fn career_recommendations(
        &self,
        skills_by_category: &BTreeMap<String, Vec<String>>,
        preferences: &Preferences,
        experience_level: &str,
    ) -> Result<Value, AiError> {
        let prompt =
            prompts::career_recommendations(skills_by_category, preferences, experience_level);
        self.call_json(&prompt).await
    }

    async fn skill_improvements(
        &self,
        current_skills: &[String],
        target_roles: &[String],
        preferences: &Preferences,
    ) -> Result<Value, AiError> {
        let prompt = prompts::skill_improvements(current_skills, target_roles, preferences);
        self.call_json(&prompt).await
    }

    async fn resume_gaps(
        &self,
        skills_by_category: &BTreeMap<String, Vec<String>>,
        preferences: &Preferences,
        resume_text: &str,
    ) -> Result<Value, AiError> {
        let prompt = prompts::resume_gaps(skills_by_category, preferences, resume_text);
        self.call_json(&prompt).await
    }

    async fn learning_path(
        &self,
        current_skills: &[String],
        target_role: &str,
        learning_preference: &str,
    ) -> Result<Value, AiError> {
        let prompt = prompts::learning_path(current_skills, target_role, learning_preference);
        self.call_json(&prompt).await
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_preferences_default_to_not_specified() {
        let prefs = Preferences::default();
        assert_eq!(prefs.industries(), "Not specified");
        assert_eq!(prefs.goals(), "Not specified");
        assert_eq!(prefs.location(), "Not specified");
    }

    #[test]
    fn test_gemini_response_shape_parses() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "hello"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.candidates[0].content.parts[0].text.as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn test_gemini_error_shape_parses() {
        let json = r#"{"error": {"message": "API key not valid"}}"#;
        let parsed: GeminiError = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "API key not valid");
    }
}
