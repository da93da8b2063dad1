//! Products API routes

use axum::Router;
use domain_products::{PgProductOptionRepository, PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create the products router backed by PostgreSQL
pub fn router(state: &AppState) -> Router {
    let service = ProductService::new(
        PgProductRepository::new(state.db.clone()),
        PgProductOptionRepository::new(state.db.clone()),
    );
    handlers::router(service)
}
