//! Task endpoint request bodies
//!
//! Account ids deserialize through [`AccountId`], so a malformed `G...` key is
//! rejected by the extractor before any handler runs.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::ledger::AccountId;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddTaskRequest {
    #[schema(value_type = String)]
    pub owner: AccountId,
    #[schema(example = "Integrar SDK Stellar")]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallerRequest {
    #[schema(value_type = String)]
    #[param(value_type = String)]
    pub caller: AccountId,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    #[schema(value_type = String)]
    pub caller: AccountId,
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferTaskRequest {
    #[schema(value_type = String)]
    pub caller: AccountId,
    #[schema(value_type = String)]
    pub new_owner: AccountId,
    /// Native-asset fee as a decimal string
    #[schema(example = "1.5")]
    pub fee: String,
}
