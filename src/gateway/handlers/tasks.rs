//! Task-list contract handlers
//!
//! Each endpoint turns its request into a [`ContractCall`] and hands it to
//! the configured [`crate::tasks::TaskContract`].

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::super::state::AppState;
use super::super::types::{
    AddTaskRequest, ApiResponse, CallerRequest, TransferTaskRequest, UpdateTaskRequest,
};
use crate::ledger::AccountId;
use crate::payment::{DecodeError, NativeAmount, RelayError};
use crate::tasks::{ContractCall, Task};

type TaskResult<T> = Result<Json<ApiResponse<T>>, RelayError>;

async fn invoke(state: &AppState, call: ContractCall) -> TaskResult<String> {
    let hash = state.tasks.invoke(call).await?;
    Ok(Json(ApiResponse::success(hash)))
}

/// List tasks owned by an account
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{owner}",
    params(("owner" = String, Path, description = "Owner account id (G...)")),
    responses(
        (status = 200, description = "Tasks", body = [Task]),
        (status = 400, description = "Invalid owner"),
        (status = 501, description = "Contract queries not supported")
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_by_owner(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
) -> TaskResult<Vec<Task>> {
    let owner: AccountId = owner.parse().map_err(DecodeError::from)?;
    let tasks = state.tasks.tasks_by_owner(&owner).await?;
    Ok(Json(ApiResponse::success(tasks)))
}

#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = AddTaskRequest,
    responses(
        (status = 200, description = "Transaction hash"),
        (status = 501, description = "Contract invocation not supported")
    ),
    tag = "Tasks"
)]
pub async fn add_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddTaskRequest>,
) -> TaskResult<String> {
    invoke(
        &state,
        ContractCall::AddTask {
            owner: req.owner,
            description: req.description,
        },
    )
    .await
}

#[utoipa::path(
    post,
    path = "/api/v1/tasks/{id}/complete",
    params(("id" = u32, Path, description = "Task id")),
    request_body = CallerRequest,
    responses(
        (status = 200, description = "Transaction hash"),
        (status = 501, description = "Contract invocation not supported")
    ),
    tag = "Tasks"
)]
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<u32>,
    Json(req): Json<CallerRequest>,
) -> TaskResult<String> {
    invoke(
        &state,
        ContractCall::CompleteTask {
            task_id,
            caller: req.caller,
        },
    )
    .await
}

#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    params(("id" = u32, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Transaction hash"),
        (status = 501, description = "Contract invocation not supported")
    ),
    tag = "Tasks"
)]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<u32>,
    Json(req): Json<UpdateTaskRequest>,
) -> TaskResult<String> {
    invoke(
        &state,
        ContractCall::UpdateDescription {
            task_id,
            caller: req.caller,
            description: req.description,
        },
    )
    .await
}

#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = u32, Path, description = "Task id"), CallerRequest),
    responses(
        (status = 200, description = "Transaction hash"),
        (status = 501, description = "Contract invocation not supported")
    ),
    tag = "Tasks"
)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<u32>,
    Query(req): Query<CallerRequest>,
) -> TaskResult<String> {
    invoke(
        &state,
        ContractCall::DeleteTask {
            task_id,
            caller: req.caller,
        },
    )
    .await
}

#[utoipa::path(
    post,
    path = "/api/v1/tasks/{id}/transfer",
    params(("id" = u32, Path, description = "Task id")),
    request_body = TransferTaskRequest,
    responses(
        (status = 200, description = "Transaction hash"),
        (status = 400, description = "Invalid fee"),
        (status = 501, description = "Contract invocation not supported")
    ),
    tag = "Tasks"
)]
pub async fn transfer_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<u32>,
    Json(req): Json<TransferTaskRequest>,
) -> TaskResult<String> {
    let fee = NativeAmount::parse(&req.fee).map_err(DecodeError::from)?;
    invoke(
        &state,
        ContractCall::TransferOwnership {
            task_id,
            caller: req.caller,
            new_owner: req.new_owner,
            fee,
        },
    )
    .await
}
