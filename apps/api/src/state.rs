use std::sync::Arc;

use crate::config::Config;
use crate::profile::taxonomy::Taxonomy;
use crate::recommend::Recommender;

/// Shared application state passed to all handlers.
///
/// The recommender is optional: when no API key is configured the `/ai/*`
/// routes answer 503 while extraction keeps working.
#[derive(Clone)]
pub struct AppState {
    pub taxonomy: Arc<Taxonomy>,
    pub recommender: Option<Arc<dyn Recommender>>,
    pub config: Config,
}
