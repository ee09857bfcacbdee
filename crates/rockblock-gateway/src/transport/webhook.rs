//! `POST /` webhook handler.
//!
//! Pipeline per request:
//! - read the whole body (optionally capped by `gateway.max_body_bytes`)
//! - decode urlencoded body -> `StructuredValue`
//! - map tree -> `Message`, collecting every field error
//! - hand the message to the configured sink, then answer 200 `null`
//!
//! Every failure becomes 400 `{"message": ...}`; nothing here panics.

use axum::{body::Body, extract::State, Json};
use bytes::Bytes;
use serde_json::Value;

use rockblock_core::error::{Result, WebhookError};
use rockblock_core::{decode_with, map_message, Message};

use crate::app_state::AppState;
use crate::transport::error::ApiError;

pub async fn receive(
    State(app): State<AppState>,
    body: Body,
) -> std::result::Result<Json<Value>, ApiError> {
    match handle(&app, body).await {
        Ok(msg) => {
            match serde_json::to_string(&msg) {
                Ok(json) => tracing::debug!(message = %json, "webhook accepted"),
                Err(e) => tracing::debug!(imei = msg.imei, error = %e, "webhook accepted"),
            }
            Ok(Json(Value::Null))
        }
        Err(e) => {
            tracing::warn!(code = e.client_code().as_str(), error = %e, "webhook rejected");
            Err(ApiError(e))
        }
    }
}

async fn handle(app: &AppState, body: Body) -> Result<Message> {
    let payload = axum::body::to_bytes(body, app.max_body_bytes())
        .await
        .map_err(|e| WebhookError::BadRequest(format!("failed to read request body: {e}")))?;
    process(app, &payload).await
}

/// Decode, map and dispatch one raw payload.
pub async fn process(app: &AppState, payload: &Bytes) -> Result<Message> {
    let tree = decode_with(payload, app.limits())?;
    tracing::debug!(tree = %tree.to_json(), "decoded payload");

    let msg = map_message(&tree)?;
    app.sink().accept(&msg).await?;
    Ok(msg)
}
