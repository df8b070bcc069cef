use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::EngineError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    code: &'static str,
    detail: String,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    Unauthorized(&'static str),
    Forbidden { code: &'static str, detail: String },
    BadRequest { code: &'static str, detail: String },
    NotFound(String),
    Conflict(String),
    Internal { code: &'static str, detail: String },
}

impl ApiError {
    pub(crate) fn validation(err: impl std::fmt::Display) -> Self {
        Self::BadRequest { code: "VALIDATION_ERROR", detail: err.to_string() }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest { code: "INVALID_BODY", detail: rejection.body_text() }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest { code: "INVALID_QUERY", detail: rejection.body_text() }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let code = err.code();
        match err {
            EngineError::NotAuthenticated => ApiError::Unauthorized("Not authenticated"),
            EngineError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            // Integrity faults are already logged at the source; callers just see a missing row.
            EngineError::BrokenReference { .. } => {
                ApiError::NotFound("assessment not found".to_string())
            }
            EngineError::NotEnrolled | EngineError::Forbidden(_) => {
                ApiError::Forbidden { code, detail: err.to_string() }
            }
            EngineError::TypeMismatch { .. }
            | EngineError::InvalidFormat
            | EngineError::EmptyContent
            | EngineError::MissingFile
            | EngineError::AnswerCountMismatch { .. }
            | EngineError::InvalidQuestionIndex(_)
            | EngineError::InvalidOptionIndex { .. }
            | EngineError::DuplicateQuestionIndex(_)
            | EngineError::MissingScore
            | EngineError::ScoreOutOfBounds { .. } => {
                ApiError::BadRequest { code, detail: err.to_string() }
            }
            EngineError::Conflict => ApiError::Conflict(err.to_string()),
            EngineError::Store(source) => {
                tracing::error!(error = %source, "Assessment store failure");
                ApiError::Internal { code, detail: "Storage backend failure".to_string() }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, detail) = match self {
            ApiError::Unauthorized(message) => {
                let status = StatusCode::UNAUTHORIZED;
                let body = ErrorResponse {
                    status: status.as_u16(),
                    code: "NOT_AUTHENTICATED",
                    detail: message.to_string(),
                };
                let mut response = (status, Json(body)).into_response();
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                return response;
            }
            ApiError::Forbidden { code, detail } => (StatusCode::FORBIDDEN, code, detail),
            ApiError::BadRequest { code, detail } => (StatusCode::BAD_REQUEST, code, detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail),
            ApiError::Conflict(detail) => (StatusCode::CONFLICT, "CONFLICT", detail),
            ApiError::Internal { code, detail } => {
                (StatusCode::INTERNAL_SERVER_ERROR, code, detail)
            }
        };

        (status, Json(ErrorResponse { status: status.as_u16(), code, detail })).into_response()
    }
}
