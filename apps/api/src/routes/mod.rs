pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::profile::handlers as profile_handlers;
use crate::recommend::handlers as ai_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/process", post(profile_handlers::process))
        .route("/extract-skills", post(profile_handlers::extract_skills))
        .route("/extract-resume", post(profile_handlers::extract_resume))
        // AI API
        .route(
            "/ai/career-recommendations",
            post(ai_handlers::career_recommendations),
        )
        .route("/ai/skill-analysis", post(ai_handlers::skill_analysis))
        .route("/ai/resume-analysis", post(ai_handlers::resume_analysis))
        .route("/ai/learning-path", post(ai_handlers::learning_path))
        .route("/ai/status", get(ai_handlers::status))
        .layer(body_limit)
        .with_state(state)
}
