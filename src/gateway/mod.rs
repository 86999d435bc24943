pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
use state::AppState;

/// Build the HTTP router
pub fn router(state: Arc<AppState>) -> Router {
    let task_routes = Router::new()
        .route("/", post(handlers::add_task))
        // one segment name per position; for GET the segment is the owner account
        .route(
            "/{id}",
            get(handlers::get_tasks_by_owner)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/{id}/complete", post(handlers::complete_task))
        .route("/{id}/transfer", post(handlers::transfer_task));

    Router::new()
        // Desktop client endpoint
        .route("/api/send", post(handlers::send_payment))
        .route("/api/v1/health", get(handlers::health_check))
        .route("/api/v1/source", get(handlers::get_source_account))
        .nest("/api/v1/tasks", task_routes)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Gateway listening on http://{}", addr);
    info!("Payment endpoint: POST http://{}/api/send", addr);
    info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app).await
}
