//! Prompt templates for the recommendation collaborator.
//!
//! Each template instructs the model to return ONLY valid JSON with an exact
//! schema, so `call_json` can parse the output directly.

use std::collections::BTreeMap;

use super::Preferences;

const CAREER_RECOMMENDATIONS_TEMPLATE: &str = r#"You are an expert career counselor. Based on the candidate profile below, recommend career paths.

Candidate skills by category:
{skills_by_category}

Experience level: {experience_level}
Preferred industries: {industries}
Career goals: {goals}
Location preference: {location}

Return ONLY valid JSON with this EXACT structure (no markdown, no explanation):
{
  "recommendations": [
    {
      "role": "job title",
      "match_score": <integer 0-100>,
      "reasoning": "why this role fits the skill set",
      "required_skills_present": ["skills the candidate already has"],
      "skills_to_develop": ["skills to acquire for this role"],
      "industry": "primary industry for this role"
    }
  ],
  "summary": "2-3 sentence overview of the candidate's strongest direction"
}

Provide 3-5 recommendations ordered by match_score descending."#;

const SKILL_IMPROVEMENTS_TEMPLATE: &str = r#"You are a technical mentor. Analyze the gap between the candidate's current skills and their target roles.

Current skills: {current_skills}
Target roles: {target_roles}
Preferred industries: {industries}
Career goals: {goals}

Return ONLY valid JSON with this EXACT structure (no markdown, no explanation):
{
  "skill_gaps": [
    {
      "skill": "skill name",
      "priority": "high" | "medium" | "low",
      "reason": "why this skill matters for the target roles",
      "related_current_skills": ["existing skills that make this easier to learn"]
    }
  ],
  "strengths": ["current skills that are strong assets for the targets"],
  "summary": "1-2 sentence overall assessment"
}"#;

const RESUME_GAPS_TEMPLATE: &str = r#"You are a resume reviewer. Identify gaps and weaknesses in the resume below relative to the candidate's stated goals.

Detected skills by category:
{skills_by_category}

Preferred industries: {industries}
Career goals: {goals}
Location preference: {location}

Resume text:
{resume_text}

Return ONLY valid JSON with this EXACT structure (no markdown, no explanation):
{
  "gaps": [
    {
      "area": "what is missing or weak",
      "severity": "high" | "medium" | "low",
      "suggestion": "concrete fix the candidate can make"
    }
  ],
  "strengths": ["aspects of the resume that already work well"],
  "overall_assessment": "2-3 sentence summary"
}"#;

const LEARNING_PATH_TEMPLATE: &str = r#"You are a learning advisor. Design a staged learning path from the candidate's current skills to the target role.

Current skills: {current_skills}
Target role: {target_role}
Learning preference: {learning_preference}

Return ONLY valid JSON with this EXACT structure (no markdown, no explanation):
{
  "stages": [
    {
      "stage": <integer starting at 1>,
      "title": "stage name",
      "duration": "estimated duration, e.g. '4-6 weeks'",
      "skills": ["skills acquired in this stage"],
      "resources": ["specific course, book, or project suggestions"]
    }
  ],
  "total_duration": "overall estimate",
  "notes": "1-2 sentences of advice tailored to the learning preference"
}

Provide 3-5 stages ordered from foundations to the target role."#;

pub fn career_recommendations(
    skills_by_category: &BTreeMap<String, Vec<String>>,
    preferences: &Preferences,
    experience_level: &str,
) -> String {
    CAREER_RECOMMENDATIONS_TEMPLATE
        .replace("{skills_by_category}", &format_categories(skills_by_category))
        .replace("{experience_level}", experience_level)
        .replace("{industries}", preferences.industries())
        .replace("{goals}", preferences.goals())
        .replace("{location}", preferences.location())
}

pub fn skill_improvements(
    current_skills: &[String],
    target_roles: &[String],
    preferences: &Preferences,
) -> String {
    SKILL_IMPROVEMENTS_TEMPLATE
        .replace("{current_skills}", &format_list(current_skills))
        .replace("{target_roles}", &format_list(target_roles))
        .replace("{industries}", preferences.industries())
        .replace("{goals}", preferences.goals())
}

pub fn resume_gaps(
    skills_by_category: &BTreeMap<String, Vec<String>>,
    preferences: &Preferences,
    resume_text: &str,
) -> String {
    // Keep the prompt bounded regardless of resume size.
    let truncated: String = resume_text.chars().take(8000).collect();
    RESUME_GAPS_TEMPLATE
        .replace("{skills_by_category}", &format_categories(skills_by_category))
        .replace("{industries}", preferences.industries())
        .replace("{goals}", preferences.goals())
        .replace("{location}", preferences.location())
        .replace("{resume_text}", &truncated)
}

pub fn learning_path(
    current_skills: &[String],
    target_role: &str,
    learning_preference: &str,
) -> String {
    LEARNING_PATH_TEMPLATE
        .replace("{current_skills}", &format_list(current_skills))
        .replace("{target_role}", target_role)
        .replace("{learning_preference}", learning_preference)
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "None listed".to_string()
    } else {
        items.join(", ")
    }
}

fn format_categories(skills_by_category: &BTreeMap<String, Vec<String>>) -> String {
    if skills_by_category.is_empty() {
        return "No skills detected".to_string();
    }
    skills_by_category
        .iter()
        .map(|(category, skills)| format!("- {category}: {}", skills.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
