//! Source account handler

use std::sync::Arc;

use axum::{Json, extract::State};
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::ApiResponse;
use crate::payment::RelayError;

#[derive(serde::Serialize, ToSchema)]
pub struct SourceAccountData {
    /// Public account id (`G...`) that pays for every relayed transfer
    pub account_id: String,
    /// Latest sequence number the ledger has consumed
    #[schema(example = 42)]
    pub sequence: i64,
}

/// Source account and its current sequence number
///
/// GET /api/v1/source
#[utoipa::path(
    get,
    path = "/api/v1/source",
    responses(
        (status = 200, description = "Source account state", body = SourceAccountData, content_type = "application/json"),
        (status = 500, description = "Ledger unavailable")
    ),
    tag = "Account"
)]
pub async fn get_source_account(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SourceAccountData>>, RelayError> {
    let source = state.relay.source_state().await?;
    Ok(Json(ApiResponse::success(SourceAccountData {
        account_id: source.account_id.to_string(),
        sequence: source.sequence,
    })))
}
