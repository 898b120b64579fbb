use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Which store operation produced an error; only `Add` is mapped differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Add,
    Update,
    Delete,
}

/// How service errors become HTTP status codes.
///
/// `Legacy` reproduces the status codes existing clients of the previous
/// service were written against: not-found answers 500 and a failed write on
/// add answers 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    #[default]
    Standard,
    Legacy,
}

impl StatusPolicy {
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy { StatusPolicy::Legacy } else { StatusPolicy::Standard }
    }

    pub fn status_for(self, err: &ServiceError, op: Operation) -> StatusCode {
        match (err, self) {
            (ServiceError::Validation(_), _) => StatusCode::BAD_REQUEST,
            (ServiceError::NotFound(_), StatusPolicy::Standard) => StatusCode::NOT_FOUND,
            (ServiceError::NotFound(_), StatusPolicy::Legacy) => StatusCode::INTERNAL_SERVER_ERROR,
            (ServiceError::Persistence(_), StatusPolicy::Legacy) if op == Operation::Add => StatusCode::BAD_REQUEST,
            (ServiceError::Persistence(_), _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{"error": "..."}` response with an explicit status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn from_service(err: ServiceError, policy: StatusPolicy, op: Operation) -> Self {
        let status = policy.status_for(&err, op);
        let message = match err {
            ServiceError::Validation(m) | ServiceError::NotFound(m) | ServiceError::Persistence(m) => m,
        };
        Self { status, message }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), error = %self.message, "request failed");
        } else {
            warn!(status = self.status.as_u16(), error = %self.message, "request rejected");
        }
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
