use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Required input missing or empty (e.g. an empty raw query body).
    #[error("{0}")]
    Validation(String),

    /// The statement validator refused the raw query.
    #[error("{0}")]
    Forbidden(String),

    #[error("User not found")]
    UserNotFound,

    /// The store rejected the statement at execution time. The message is
    /// the engine's own text, passed through unmodified.
    #[error("{0}")]
    Execution(String),

    /// Raw query exceeded the configured execution-time bound.
    #[error("Query execution exceeded {0} seconds")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) | GatewayError::Execution(_) => StatusCode::BAD_REQUEST,
            GatewayError::Forbidden(_) => StatusCode::FORBIDDEN,
            GatewayError::UserNotFound => StatusCode::NOT_FOUND,
            GatewayError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
