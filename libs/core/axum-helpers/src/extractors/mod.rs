//! Custom extractors for Axum handlers.
//!
//! Both reject with the shared error envelope instead of axum's plain-text
//! rejections.

pub mod optional_json;
pub mod uuid_path;

pub use optional_json::OptionalJson;
pub use uuid_path::{UuidPath, UuidPathPair};
