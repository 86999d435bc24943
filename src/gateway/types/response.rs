//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants
//! - `payment_error_response`: plain-text answers for `POST /api/send`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::payment::RelayError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// `POST /api/send` success body
#[derive(Debug, Serialize, ToSchema)]
pub struct SendPaymentResponse {
    #[schema(example = "success")]
    pub status: String,
    /// Transaction hash (hex)
    #[schema(example = "3389e9f0f1a65f19736cacf544c2e825313e8447f569233bb8db39aa607c8889")]
    pub hash: String,
}

impl SendPaymentResponse {
    pub fn success(hash: String) -> Self {
        Self {
            status: "success".to_string(),
            hash,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const LEDGER_REJECTED: i32 = 1002;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
    pub const NOT_IMPLEMENTED: i32 = 5010;
}

/// Message shown to callers in place of internal error details
pub const GENERIC_INTERNAL_MESSAGE: &str = "no se pudo procesar la solicitud";

fn api_code(err: &RelayError) -> i32 {
    match err {
        RelayError::Decode(_) => error_codes::INVALID_PARAMETER,
        RelayError::LedgerRejection(_) => error_codes::LEDGER_REJECTED,
        RelayError::Network(_) => error_codes::SERVICE_UNAVAILABLE,
        RelayError::NotImplemented(_) => error_codes::NOT_IMPLEMENTED,
        RelayError::AccountNotFound(_)
        | RelayError::Signing(_)
        | RelayError::Encode(_)
        | RelayError::Unexpected(_) => error_codes::INTERNAL_ERROR,
    }
}

fn status_of(err: &RelayError) -> StatusCode {
    StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// JSON error for the `/api/v1` endpoints
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let msg = if self.is_client_visible() {
            self.to_string()
        } else {
            error!(code = self.code(), error = %self, "Request failed");
            GENERIC_INTERNAL_MESSAGE.to_string()
        };
        (
            status_of(&self),
            Json(ApiResponse::<()>::error(api_code(&self), msg)),
        )
            .into_response()
    }
}

/// Plain-text error answer for `POST /api/send`.
///
/// Only decode errors and ledger result codes reach the caller; everything
/// else is logged and replaced by a generic message.
pub fn payment_error_response(err: &RelayError) -> Response {
    match err {
        RelayError::Decode(e) => (
            StatusCode::BAD_REQUEST,
            format!("Solicitud inválida: {}", e),
        )
            .into_response(),
        RelayError::LedgerRejection(code) => (
            StatusCode::BAD_REQUEST,
            format!("Fallo en la transacción: {}", code),
        )
            .into_response(),
        other => {
            error!(code = other.code(), error = %other, "Payment relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error interno del servidor: {}", GENERIC_INTERNAL_MESSAGE),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ResultCode;
    use crate::payment::DecodeError;

    #[test]
    fn test_api_response_serialization() {
        let json = serde_json::to_value(ApiResponse::success(SendPaymentResponse::success(
            "abc".into(),
        )))
        .unwrap();
        assert_eq!(json["code"], error_codes::SUCCESS);
        assert_eq!(json["data"]["status"], "success");

        let err = serde_json::to_value(ApiResponse::<()>::error(5010, "nope")).unwrap();
        assert!(err.get("data").is_none());
    }

    #[test]
    fn test_payment_error_status() {
        let resp = payment_error_response(&RelayError::LedgerRejection(ResultCode::BadSequence));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = payment_error_response(&RelayError::Decode(DecodeError::MissingField("amount")));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = payment_error_response(&RelayError::Network("10.1.2.3 refused".into()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // not reachable from /api/send, still never a success
        let resp = payment_error_response(&RelayError::NotImplemented("add_task"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_relay_error_json_status() {
        let resp = RelayError::NotImplemented("task_deleted").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);

        let resp = RelayError::Unexpected("db".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
