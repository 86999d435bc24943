//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::{HealthResponse, SourceAccountData};
use crate::gateway::types::{
    AddTaskRequest, CallerRequest, SendPaymentResponse, TransferTaskRequest, UpdateTaskRequest,
};
use crate::tasks::{Task, TaskStatus};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task List Payment Relay API",
        version = "0.1.0",
        description = "Builds, signs and submits native-asset payments to a Stellar Horizon endpoint on behalf of the task-list client.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::send_payment,
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::get_source_account,
        crate::gateway::handlers::get_tasks_by_owner,
        crate::gateway::handlers::add_task,
        crate::gateway::handlers::complete_task,
        crate::gateway::handlers::update_task,
        crate::gateway::handlers::delete_task,
        crate::gateway::handlers::transfer_task,
    ),
    components(
        schemas(
            SendPaymentResponse,
            HealthResponse,
            SourceAccountData,
            Task,
            TaskStatus,
            AddTaskRequest,
            CallerRequest,
            UpdateTaskRequest,
            TransferTaskRequest,
        )
    ),
    tags(
        (name = "Payment", description = "Payment relay"),
        (name = "Account", description = "Source account queries"),
        (name = "Tasks", description = "Task-list contract calls"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
