//! JSON body extractor that tolerates a missing body.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body that may be absent.
///
/// An empty body or a literal `null` yields `OptionalJson(None)`, leaving the
/// handler to decide how a missing payload is reported. Malformed JSON is
/// rejected with `400`.
///
/// ```ignore
/// async fn create(OptionalJson(body): OptionalJson<ProductInput>) -> Result<Json<Product>, ProductError> {
///     let input = body.ok_or(ProductError::MissingBody)?;
///     // ...
/// }
/// ```
pub struct OptionalJson<T>(pub Option<T>);

impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(None));
        }

        serde_json::from_slice::<Option<T>>(&bytes)
            .map(OptionalJson)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
    }
}
