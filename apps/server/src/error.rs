use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use storefront_core::catalog::CatalogError;
use storefront_core::errors::{DatabaseError, Error as CoreError};
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub code: u16,
    pub message: String,
}

pub(crate) fn error_response(status: StatusCode, message: String) -> Response {
    let body = Json(ErrorBody {
        code: status.as_u16(),
        message,
    });
    (status, body).into_response()
}

fn core_status(e: &CoreError) -> StatusCode {
    if e.is_not_found() {
        return StatusCode::NOT_FOUND;
    }
    match e {
        CoreError::Catalog(CatalogError::SpecGroupNotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Catalog(CatalogError::CategoryNotEmpty(..)) => StatusCode::CONFLICT,
        CoreError::Catalog(_) => StatusCode::BAD_REQUEST,
        CoreError::ConstraintViolation(_) => StatusCode::CONFLICT,
        CoreError::Database(DatabaseError::UniqueViolation(_))
        | CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => StatusCode::CONFLICT,
        CoreError::Validation(_)
        | CoreError::Cart(_)
        | CoreError::InvalidExchangeRate(_)
        | CoreError::UnsupportedCurrency(_) => StatusCode::BAD_REQUEST,
        CoreError::Database(_) | CoreError::Repository(_) | CoreError::Unexpected(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Core(e) => {
                let status = core_status(&e);
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", e);
                }
                (status, e.to_string())
            }
            ApiError::Auth(e) => return e.into_response(),
            ApiError::NotFound(reason) => (StatusCode::NOT_FOUND, reason),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason),
        };
        error_response(status, msg)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::errors::ValidationError;

    #[test]
    fn maps_core_errors_to_statuses() {
        let cases = [
            (
                CoreError::Database(DatabaseError::NotFound("p1".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                CatalogError::CategoryNotFound("c1".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                CatalogError::CategoryCycle("c1".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::CategoryNotEmpty("c1".into(), "has products".into()).into(),
                StatusCode::CONFLICT,
            ),
            (
                CoreError::ConstraintViolation("slug taken".into()),
                StatusCode::CONFLICT,
            ),
            (
                ValidationError::InvalidInput("bad".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::Cart("empty id".into()), StatusCode::BAD_REQUEST),
            (
                CoreError::Unexpected("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(core_status(&err), expected, "{err}");
        }
    }
}
