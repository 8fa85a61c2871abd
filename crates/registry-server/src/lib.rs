//! Student Registry HTTP server
//!
//! JSON over HTTP front end for [`registry_core`]. The binary in `main.rs`
//! is a thin wrapper around [`server::serve`].

pub mod handlers;
pub mod response;
pub mod server;

use axum::routing::{get, post};
use axum::Router;

pub use handlers::AppState;
pub use response::{ApiError, CreatedId, ErrorEnvelope};

/// Build the router with every student endpoint
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/students",
            post(handlers::student::create).get(handlers::student::list),
        )
        .route("/api/students/{id}", get(handlers::student::get_by_id))
        .with_state(state)
}
