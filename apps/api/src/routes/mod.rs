pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ingest::handlers as ingest;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Ingestion
        .route(
            "/api/v1/profiles",
            post(ingest::handle_put_profile).get(ingest::handle_list_profiles),
        )
        .route(
            "/api/v1/profiles/:candidate_id",
            get(ingest::handle_get_profile).delete(ingest::handle_delete_profile),
        )
        .route(
            "/api/v1/jobs",
            post(ingest::handle_put_job).get(ingest::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/:job_id",
            get(ingest::handle_get_job).delete(ingest::handle_delete_job),
        )
        // Matching
        .route(
            "/api/v1/match/:job_id/:candidate_id",
            post(matching::handle_baseline),
        )
        .route(
            "/api/v1/match/:job_id/:candidate_id/augmented",
            post(matching::handle_augmented),
        )
        .route(
            "/api/v1/match/:job_id/:candidate_id/facts",
            get(matching::handle_fact_sheet),
        )
        .route(
            "/api/v1/match/:job_id/:candidate_id/ask",
            post(matching::handle_ask),
        )
        // Stateless alignment
        .route(
            "/api/v1/alignment/facts",
            post(matching::handle_stateless_facts),
        )
        .route(
            "/api/v1/alignment/augmented",
            post(matching::handle_adhoc_augmented),
        )
        .with_state(state)
}
