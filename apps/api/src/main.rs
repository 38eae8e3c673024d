mod config;
mod errors;
mod extract;
mod profile;
mod recommend;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::profile::taxonomy::Taxonomy;
use crate::recommend::{GeminiClient, Recommender};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillSift API v{}", env!("CARGO_PKG_VERSION"));

    let taxonomy = Arc::new(Taxonomy::builtin());
    info!("Skill taxonomy loaded: {} entries", taxonomy.len());

    // The recommender is optional; without a key the /ai/* routes answer 503.
    let recommender: Option<Arc<dyn Recommender>> = match &config.gemini_api_key {
        Some(key) => {
            info!("AI recommender initialized (model: {})", recommend::MODEL);
            Some(Arc::new(GeminiClient::new(key.clone())))
        }
        None => {
            warn!("GEMINI_API_KEY not set. AI features will be disabled.");
            None
        }
    };

    let state = AppState {
        taxonomy,
        recommender,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
