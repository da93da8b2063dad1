//! Products Domain
//!
//! Products and their options (variant attributes such as colour or size).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, id consistency, existence checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← ProductRepository + ProductOptionRepository
//! └──────┬──────┘     (PostgreSQL and in-memory implementations)
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← DTOs and SeaORM entities
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryCatalog, ProductService};
//!
//! let catalog = InMemoryCatalog::new();
//! let service = ProductService::new(catalog.clone(), catalog);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    Product, ProductFilter, ProductInput, ProductList, ProductOption, ProductOptionInput,
    ProductOptionList,
};
pub use postgres::{PgProductOptionRepository, PgProductRepository};
pub use repository::{InMemoryCatalog, ProductOptionRepository, ProductRepository};
pub use service::ProductService;
