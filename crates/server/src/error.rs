use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ezstream_core::error::{ApiError, ErrorEnvelope};

/// HTTP-facing error: renders an `ApiError` as its status code and JSON envelope.
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}
