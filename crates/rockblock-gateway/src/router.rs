//! Axum router wiring.
//!
//! Exposes a single `POST /` route for provider callbacks.

use axum::{routing::post, Router};

use crate::{app_state::AppState, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(transport::webhook::receive))
        .with_state(state)
}
