//! HTTP rendering of core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use rockblock_core::error::{ClientCode, WebhookError};

/// Response-side wrapper so `WebhookError` can be returned from handlers.
#[derive(Debug)]
pub struct ApiError(pub WebhookError);

impl From<WebhookError> for ApiError {
    fn from(e: WebhookError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.client_code() {
            ClientCode::BadRequest | ClientCode::DecodeFailed | ClientCode::MappingFailed => {
                StatusCode::BAD_REQUEST
            }
            ClientCode::Config | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
