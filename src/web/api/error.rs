use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;
use crate::propagate::{LookupError, PropagationError};
use crate::proximity::ProximityError;
use crate::time::TimeError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(String),
    NotYetIntroduced(String),
    Propagation(PropagationError),
    Catalog(CatalogError),
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound(e.to_string())
        } else {
            ApiError::Catalog(e)
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::Catalog(e) => e.into(),
            LookupError::Propagation(e) => ApiError::Propagation(e),
        }
    }
}

impl From<TimeError> for ApiError {
    fn from(e: TimeError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<ProximityError> for ApiError {
    fn from(e: ProximityError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::NotYetIntroduced(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Propagation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Catalog(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(msg) => ErrorResponse::with_message("validation_failed", &msg),
            ApiError::NotFound(msg) => ErrorResponse::with_message("not_found", &msg),
            ApiError::NotYetIntroduced(msg) => {
                ErrorResponse::with_message("not_yet_introduced", &msg)
            }
            ApiError::Propagation(e) => {
                ErrorResponse::with_message("propagation_failed", &e.to_string())
            }
            ApiError::Catalog(e) => ErrorResponse::with_message("catalog_error", &e.to_string()),
            ApiError::Internal(msg) => ErrorResponse::with_message("internal_error", &msg),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
