pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::market::handlers as market;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/catalog", get(matching::handle_list_roles))
        // Analysis
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route(
            "/api/v1/analysis/role-match",
            post(matching::handle_role_match),
        )
        // Skills
        .route("/api/v1/skills/gap", post(matching::handle_level_gaps))
        .route(
            "/api/v1/skills/:skill/prerequisites",
            get(matching::handle_prerequisites),
        )
        // Market
        .route("/api/v1/market/:title", get(market::handle_market_analysis))
        .route(
            "/api/v1/market/:title/salary",
            get(market::handle_salary_trends),
        )
        .with_state(state)
}
