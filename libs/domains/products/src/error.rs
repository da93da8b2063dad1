use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    ProductNotFound(Uuid),

    #[error("Option {option_id} not found for product {product_id}")]
    OptionNotFound { product_id: Uuid, option_id: Uuid },

    #[error("Request body is required")]
    MissingBody,

    #[error("{0}")]
    IdMismatch(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Product {0} already exists")]
    DuplicateId(Uuid),

    #[error("{0}")]
    SaveFailed(String),

    /// Any other store fault; reported to the client as a bad request
    #[error("{0}")]
    Unhandled(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Unhandled(err.to_string())
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            e @ (ProductError::ProductNotFound(_) | ProductError::OptionNotFound { .. }) => {
                AppError::NotFound(e.to_string())
            }
            e @ ProductError::MissingBody => AppError::BadRequest(e.to_string()),
            ProductError::IdMismatch(msg) => AppError::BadRequest(msg),
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            e @ ProductError::DuplicateId(_) => AppError::Ambiguous(e.to_string()),
            ProductError::SaveFailed(msg) => AppError::PersistenceFailed(msg),
            ProductError::Unhandled(msg) => AppError::BadRequest(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status(err: ProductError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        let id = Uuid::now_v7();
        assert_eq!(status(ProductError::ProductNotFound(id)), StatusCode::NOT_FOUND);
        assert_eq!(
            status(ProductError::OptionNotFound {
                product_id: id,
                option_id: id
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(ProductError::MissingBody), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(ProductError::IdMismatch("ids differ".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(ProductError::DuplicateId(id)), StatusCode::MULTIPLE_CHOICES);
        assert_eq!(
            status(ProductError::SaveFailed("no rows".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_faults_become_bad_requests() {
        let err: ProductError = DbErr::Custom("foreign key violation".into()).into();
        assert!(matches!(err, ProductError::Unhandled(ref msg) if msg.contains("foreign key")));
        assert_eq!(status(err), StatusCode::BAD_REQUEST);
    }
}
