//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use std::io;

use crate::{openapi::ApiDoc, state::AppState};

/// Create the routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Assemble the full application: `/api` routes plus `/health` and `/ready`,
/// all behind the shared middleware stack.
pub fn app(state: &AppState) -> io::Result<Router> {
    let root = health_router(state.config.app).merge(health::router(state.db.clone()));
    create_router::<ApiDoc>(
        routes(state),
        root,
        &state.config.server,
        &state.config.environment,
    )
}
