// JSON envelope shared by every API response:
//   { "ok": true,  "data": ... }
//   { "ok": false, "error": { "code": "...", "message": "..." } }

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use dns_switcher_core::CoreError;

use super::client_ip::ClientIpError;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    ok: bool,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { ok: true, data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "ok": false,
            "error": { "code": self.code, "message": self.message },
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let status = match &err {
            CoreError::NoIdentityFound { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::ForeignLeaseConflict { .. } => StatusCode::CONFLICT,
            CoreError::StoreUnavailable { .. }
            | CoreError::StoreRejected { .. }
            | CoreError::OptionCreationFailed { .. }
            | CoreError::InvalidStoreResponse { .. } => StatusCode::BAD_GATEWAY,
        };
        if status == StatusCode::BAD_GATEWAY {
            warn!(error = %err, "router operation failed");
        }
        Self {
            status,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<ClientIpError> for ApiError {
    fn from(err: ClientIpError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "invalid_client_ip",
            message: err.to_string(),
        }
    }
}
