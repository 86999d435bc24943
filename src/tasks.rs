//! Task-list contract boundary
//!
//! The desktop client talks to a Soroban task-list contract through these
//! calls. The relay does not invoke contracts yet: [`UnsupportedTaskContract`]
//! answers every call with [`RelayError::NotImplemented`] naming the contract
//! function, so callers can tell "not wired up" apart from success.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::ledger::AccountId;
use crate::payment::{NativeAmount, RelayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TaskStatus {
    Completed,
    Pending,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: u32,
    pub description: String,
    /// Owner account (`G...`)
    #[schema(value_type = String)]
    pub owner: AccountId,
    pub status: TaskStatus,
    /// Creation time, unix seconds
    pub timestamp: u64,
}

/// A state-changing contract invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    AddTask {
        owner: AccountId,
        description: String,
    },
    CompleteTask {
        task_id: u32,
        caller: AccountId,
    },
    UpdateDescription {
        task_id: u32,
        caller: AccountId,
        description: String,
    },
    DeleteTask {
        task_id: u32,
        caller: AccountId,
    },
    /// Hand a task to `new_owner`, paying `fee` to the contract
    TransferOwnership {
        task_id: u32,
        caller: AccountId,
        new_owner: AccountId,
        fee: NativeAmount,
    },
}

impl ContractCall {
    /// Contract function this call maps to
    pub fn function_name(&self) -> &'static str {
        match self {
            ContractCall::AddTask { .. } => "add_task",
            ContractCall::CompleteTask { .. } => "task_completed",
            ContractCall::UpdateDescription { .. } => "update_task_description",
            ContractCall::DeleteTask { .. } => "task_deleted",
            ContractCall::TransferOwnership { .. } => "transfer_ownership",
        }
    }
}

pub const GET_TASKS_BY_OWNER: &str = "get_tasks_by_owner";

#[async_trait]
pub trait TaskContract: Send + Sync {
    /// Submit a contract invocation; returns the transaction hash
    async fn invoke(&self, call: ContractCall) -> Result<String, RelayError>;

    async fn tasks_by_owner(&self, owner: &AccountId) -> Result<Vec<Task>, RelayError>;
}

pub struct UnsupportedTaskContract {
    contract_id: String,
}

impl UnsupportedTaskContract {
    pub fn new(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }
}

#[async_trait]
impl TaskContract for UnsupportedTaskContract {
    async fn invoke(&self, call: ContractCall) -> Result<String, RelayError> {
        let function = call.function_name();
        info!(contract = %self.contract_id, function, "Contract invocation not supported");
        Err(RelayError::NotImplemented(function))
    }

    async fn tasks_by_owner(&self, owner: &AccountId) -> Result<Vec<Task>, RelayError> {
        info!(
            contract = %self.contract_id,
            owner = %owner.short(),
            function = GET_TASKS_BY_OWNER,
            "Contract query not supported"
        );
        Err(RelayError::NotImplemented(GET_TASKS_BY_OWNER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> AccountId {
        AccountId::from_public_key([3u8; 32])
    }

    #[test]
    fn test_function_names() {
        let o = owner();
        let calls = [
            (
                ContractCall::AddTask {
                    owner: o,
                    description: "Integrar SDK".into(),
                },
                "add_task",
            ),
            (ContractCall::CompleteTask { task_id: 1, caller: o }, "task_completed"),
            (
                ContractCall::UpdateDescription {
                    task_id: 1,
                    caller: o,
                    description: "x".into(),
                },
                "update_task_description",
            ),
            (ContractCall::DeleteTask { task_id: 1, caller: o }, "task_deleted"),
            (
                ContractCall::TransferOwnership {
                    task_id: 1,
                    caller: o,
                    new_owner: AccountId::from_public_key([4u8; 32]),
                    fee: NativeAmount::parse("1").unwrap(),
                },
                "transfer_ownership",
            ),
        ];
        for (call, name) in calls {
            assert_eq!(call.function_name(), name);
        }
    }

    #[tokio::test]
    async fn test_unsupported_invoke() {
        let contract = UnsupportedTaskContract::new("CTASKS");
        let err = contract
            .invoke(ContractCall::DeleteTask {
                task_id: 3,
                caller: owner(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::NotImplemented("task_deleted")));
    }

    #[tokio::test]
    async fn test_unsupported_query() {
        let contract = UnsupportedTaskContract::new("CTASKS");
        let err = contract.tasks_by_owner(&owner()).await.unwrap_err();
        assert!(matches!(err, RelayError::NotImplemented(GET_TASKS_BY_OWNER)));
        assert_eq!(err.http_status(), 501);
    }

    #[test]
    fn test_task_serializes_owner_as_strkey() {
        let task = Task {
            id: 5,
            description: "Revisar uso de u32 vs u64".into(),
            owner: owner(),
            status: TaskStatus::Completed,
            timestamp: 1_678_886_400,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["owner"], owner().to_string());
        assert_eq!(json["status"], "Completed");
    }
}
