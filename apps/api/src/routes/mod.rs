pub mod health;
pub mod options;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::alignment::handlers as alignment;
use crate::prep::handlers as prep;
use crate::settings::MAX_RESUME_BYTES;
use crate::state::AppState;

/// Leaves room for an oversized resume to reach the validator and get its own message.
const MAX_BODY_BYTES: usize = MAX_RESUME_BYTES * 2;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(options::options_handler))
        .route("/api/v1/prep", post(prep::handle_generate_prep))
        .route("/api/v1/alignment", post(alignment::handle_alignment))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
