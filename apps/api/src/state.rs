use std::sync::Arc;

use crate::market::outlook::OutlookProjector;
use crate::matching::relevance::SkillRelevanceScorer;
use crate::models::catalog::JobCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Loaded and validated once at startup.
    pub catalog: Arc<JobCatalog>,
    /// Pluggable relevance scorer. Default: CatalogRelevanceScorer.
    pub relevance_scorer: Arc<dyn SkillRelevanceScorer>,
    /// Pluggable outlook projector. Default: LinearProjector.
    pub projector: Arc<dyn OutlookProjector>,
}
