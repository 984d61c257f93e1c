use axum::http::Method;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::*;
use crate::gateway::QueryGateway;

pub fn create_router(gateway: QueryGateway) -> Router {
    let state = AppState { gateway };

    Router::new()
        // Plain listing routes
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        // Filtered and raw query routes
        .route("/api/plfs/data", get(filtered_data))
        .route("/api/plfs/query", post(execute_query))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
}
