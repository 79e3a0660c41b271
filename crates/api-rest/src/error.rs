//! Mapping from core errors to HTTP responses.
//!
//! Every error leaves the API as a status code plus a `{message}` body. Internal failures are
//! logged in full and reported to the caller as "Internal error".

use api_shared::MessageRes;
use arogya_core::PortalError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        let status = match &err {
            PortalError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PortalError::DuplicateIdentity => StatusCode::CONFLICT,
            PortalError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            PortalError::NotFound | PortalError::PatientNotFound | PortalError::CodeNotFound => {
                StatusCode::NOT_FOUND
            }
            PortalError::DuplicateCatalogCode(_)
            | PortalError::CatalogRead(_)
            | PortalError::CatalogParse(_)
            | PortalError::StoreUnavailable
            | PortalError::Fhir(_) => {
                tracing::error!("internal error: {:?}", err);
                return Self::internal();
            }
        };
        tracing::warn!("request rejected ({}): {}", status, err);
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("malformed request body: {}", rejection.body_text());
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageRes::new(self.message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
