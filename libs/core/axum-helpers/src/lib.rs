//! # Axum Helpers
//!
//! Shared building blocks for the catalog's Axum services.
//!
//! - **[`server`]**: router assembly with OpenAPI viewers, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: [`AppError`] and the JSON error envelope
//! - **[`extractors`]**: UUID path and optional JSON body extractors
//! - **[`audit`]**: audit events for mutating requests

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{OptionalJson, UuidPath, UuidPathPair};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
