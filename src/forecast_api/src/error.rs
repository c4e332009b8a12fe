//! HTTP error mapping.
//!
//! Every caller-facing failure is rendered as `{"error": "<message>"}` with a
//! matching status code.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menu_forecast::errors::Error as ForecastError;
use serde::Serialize;

/// An error on its way to the client.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    /// 400 with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        let message = msg.into();
        tracing::debug!("Bad request: {}", message);
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    /// 500. The detail is logged, the client gets a generic message.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!("Internal error: {}", detail);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        }
    }

    /// Status code that will be sent.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        if err.is_client_error() {
            ApiError::bad_request(err.to_string())
        } else {
            ApiError::internal(err)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(format!("Invalid input: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: &self.message,
            }),
        )
            .into_response()
    }
}
