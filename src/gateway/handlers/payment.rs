//! Payment handler

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{Instrument, info_span};
use ulid::Ulid;

use super::super::state::AppState;
use super::super::types::{SendPaymentResponse, payment_error_response};

/// Relay a native-asset payment from the source account
///
/// POST /api/send
///
/// The body is taken as raw bytes so that malformed JSON is answered with the
/// same plain-text error format as any other invalid request.
#[utoipa::path(
    post,
    path = "/api/send",
    request_body(
        content = String,
        description = r#"{"destinationAccountId": "G...", "amount": "10.5"}"#,
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Transaction accepted", body = SendPaymentResponse, content_type = "application/json"),
        (status = 400, description = "Invalid request or ledger rejection", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal error", body = String, content_type = "text/plain")
    ),
    tag = "Payment"
)]
pub async fn send_payment(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let span = info_span!("payment", request_id = %Ulid::new());
    async move {
        match state.relay.relay(&body).await {
            Ok(receipt) => (
                StatusCode::OK,
                Json(SendPaymentResponse::success(receipt.hash)),
            )
                .into_response(),
            Err(e) => payment_error_response(&e),
        }
    }
    .instrument(span)
    .await
}
