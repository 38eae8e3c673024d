//! HTTP handlers for résumé upload and extraction.

use axum::{extract::Multipart, extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::{cleaner::clean, extract_text};
use crate::profile::analyzer::{analyze, StructuredProfile};
use crate::recommend::Preferences;
use crate::state::AppState;

/// A cleaned document shorter than this carries no usable signal.
const MIN_CLEAN_CHARS: usize = 20;

/// The résumé upload plus the free-form preference fields that ride along
/// in the same multipart body.
struct Upload {
    filename: String,
    bytes: Vec<u8>,
    preferences: Preferences,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut preferences = Preferences::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| AppError::Validation("Resume file has no filename".to_string()))?
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                file = Some((filename, bytes.to_vec()));
            }
            "industries" => preferences.industries = read_text_field(field).await?,
            "goals" => preferences.goals = read_text_field(field).await?,
            "location" => preferences.location = read_text_field(field).await?,
            _ => {}
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::Validation("No resume uploaded".to_string()))?;
    Ok(Upload {
        filename,
        bytes,
        preferences,
    })
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<Option<String>, AppError> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))?;
    Ok(Some(text).filter(|t| !t.trim().is_empty()))
}

/// Runs the full extraction pipeline: bytes → raw text → cleaned text →
/// structured profile. Shared by all three upload routes.
fn run_pipeline(
    bytes: &[u8],
    filename: &str,
    state: &AppState,
) -> Result<(String, String, StructuredProfile), AppError> {
    let raw_text = extract_text(bytes, filename)?;
    let clean_text = clean(&raw_text);
    if clean_text.chars().count() < MIN_CLEAN_CHARS {
        return Err(AppError::EmptyDocument);
    }
    let profile = analyze(&clean_text, &raw_text, &state.taxonomy);
    Ok((raw_text, clean_text, profile))
}

fn extracted_info(clean_text: &str, profile: &StructuredProfile) -> Value {
    json!({
        "text_length": clean_text.chars().count(),
        "email": &profile.email,
        "detected_skills": &profile.skills,
        "skills_by_category": &profile.skills_by_category,
        "total_skills_found": profile.skills.len(),
        "has_experience_keywords": !profile.experience_keywords.is_empty(),
        "has_education_keywords": !profile.education_keywords.is_empty(),
        "experience_entries": &profile.experience_entries,
        "project_entries": &profile.project_entries,
        "experience_keywords": &profile.experience_keywords,
    })
}

/// POST /process — full pipeline plus AI insights when the collaborator is
/// configured. AI failures degrade to an `error` key inside `ai_insights`;
/// they never fail the upload itself.
pub async fn process(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let upload = read_upload(multipart).await?;
    let (_, clean_text, profile) = run_pipeline(&upload.bytes, &upload.filename, &state)?;

    info!(
        filename = %upload.filename,
        text_length = clean_text.chars().count(),
        skills_found = profile.skills.len(),
        "Resume processed"
    );

    let mut ai_insights = serde_json::Map::new();
    if let Some(recommender) = &state.recommender {
        match recommender
            .career_recommendations(&profile.skills_by_category, &upload.preferences, "intermediate")
            .await
        {
            Ok(career_recs) => {
                let target_roles = top_roles(&career_recs);
                ai_insights.insert("career_recommendations".to_string(), career_recs);

                match recommender
                    .skill_improvements(&profile.skills, &target_roles, &upload.preferences)
                    .await
                {
                    Ok(v) => {
                        ai_insights.insert("skill_improvements".to_string(), v);
                    }
                    Err(e) => warn!("Skill improvement generation failed: {e}"),
                }

                match recommender
                    .resume_gaps(&profile.skills_by_category, &upload.preferences, &clean_text)
                    .await
                {
                    Ok(v) => {
                        ai_insights.insert("resume_analysis".to_string(), v);
                    }
                    Err(e) => warn!("Resume gap analysis failed: {e}"),
                }

                let top_role = target_roles
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Software Developer".to_string());
                match recommender
                    .learning_path(&profile.skills, &top_role, "balanced")
                    .await
                {
                    Ok(v) => {
                        ai_insights.insert("learning_path".to_string(), v);
                    }
                    Err(e) => warn!("Learning path generation failed: {e}"),
                }
            }
            Err(e) => {
                warn!("AI recommendation generation failed: {e}");
                ai_insights.insert("error".to_string(), json!(e.to_string()));
            }
        }
    }

    Ok(Json(json!({
        "summary": "Resume processed successfully with AI analysis",
        "extracted_info": extracted_info(&clean_text, &profile),
        "preferences": {
            "industries": upload.preferences.industries,
            "goals": upload.preferences.goals,
            "location": upload.preferences.location,
        },
        "ai_insights": ai_insights,
    })))
}

/// Pulls up to three role titles out of a career recommendation payload,
/// falling back to a generic target when the model gave none.
fn top_roles(career_recs: &Value) -> Vec<String> {
    let roles: Vec<String> = career_recs
        .get("recommendations")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|r| r.get("role").and_then(Value::as_str))
                .take(3)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if roles.is_empty() {
        vec!["Software Developer".to_string()]
    } else {
        roles
    }
}

/// POST /extract-skills — skills only, no AI calls.
pub async fn extract_skills(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let upload = read_upload(multipart).await?;
    let (_, _, profile) = run_pipeline(&upload.bytes, &upload.filename, &state)?;

    Ok(Json(json!({
        "skills": &profile.skills,
        "skills_by_category": &profile.skills_by_category,
        "total_skills_found": profile.skills.len(),
        "extracted_info": {
            "email": profile.email.clone().unwrap_or_default(),
            "detected_skills": &profile.skills,
        }
    })))
}

/// POST /extract-resume — full text plus a shallow quality assessment.
pub async fn extract_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let upload = read_upload(multipart).await?;
    let (_, clean_text, profile) = run_pipeline(&upload.bytes, &upload.filename, &state)?;

    let file_type = upload
        .filename
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    let top_categories: Vec<&String> = profile.skills_by_category.keys().take(3).collect();

    Ok(Json(json!({
        "success": true,
        "file_info": {
            "filename": upload.filename,
            "file_type": file_type,
            "text_length": clean_text.chars().count(),
        },
        "extracted_content": {
            "full_text": &clean_text,
            "basic_info": {
                "email": &profile.email,
                "skills": &profile.skills,
                "skills_by_category": &profile.skills_by_category,
                "experience_keywords": &profile.experience_keywords,
                "education_keywords": &profile.education_keywords,
            }
        },
        "analysis": {
            "has_contact_info": profile.email.is_some(),
            "skills_detected": profile.skills.len(),
            "appears_complete": clean_text.chars().count() > 200,
            "top_skill_categories": top_categories,
            "has_technical_background": profile.skills.len() > 5,
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::taxonomy::Taxonomy;

    #[test]
    fn test_top_roles_extracts_titles() {
        let recs = json!({
            "recommendations": [
                {"role": "Data Engineer", "match_score": 90},
                {"role": "Backend Developer", "match_score": 85},
                {"role": "ML Engineer", "match_score": 80},
                {"role": "SRE", "match_score": 70}
            ]
        });
        assert_eq!(
            top_roles(&recs),
            vec!["Data Engineer", "Backend Developer", "ML Engineer"]
        );
    }

    #[test]
    fn test_top_roles_falls_back_when_missing() {
        assert_eq!(top_roles(&json!({})), vec!["Software Developer"]);
        assert_eq!(
            top_roles(&json!({"recommendations": []})),
            vec!["Software Developer"]
        );
    }

    #[test]
    fn test_extracted_info_shape() {
        let taxonomy = Taxonomy::builtin();
        let text = "Contact: jane.doe@example.com Skills: Python, SQL Experience: 3 years";
        let profile = analyze(text, text, &taxonomy);
        let info = extracted_info(text, &profile);

        assert_eq!(info["email"], "jane.doe@example.com");
        assert_eq!(info["total_skills_found"], profile.skills.len());
        assert_eq!(info["has_experience_keywords"], true);
        assert!(info["detected_skills"]
            .as_array()
            .unwrap()
            .contains(&json!("python")));
    }
}
