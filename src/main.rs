//! Task List Payment Relay
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Client  │───▶│ Gateway  │───▶│  Relay   │───▶│ Horizon  │
//! │ (JSON)   │    │ (axum)   │    │(sign+tx) │    │ (ledger) │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `tasklist_relay [--env dev] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use tasklist_relay::config::AppConfig;
use tasklist_relay::gateway::{self, state::AppState};
use tasklist_relay::payment::PaymentRelay;
use tasklist_relay::signer::EnvSecretProvider;
use tasklist_relay::tasks::UnsupportedTaskContract;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config =
        AppConfig::load(&env).with_context(|| format!("loading config for env `{}`", env))?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }

    let _log_guard = tasklist_relay::logging::init_logging(&app_config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_HASH"),
        env = %env,
        "Starting tasklist relay"
    );

    let ledger_cfg = &app_config.ledger;
    let secrets = EnvSecretProvider::new(&app_config.signer.secret_env);
    let relay = PaymentRelay::from_config(ledger_cfg, &secrets).with_context(|| {
        format!(
            "configuring relay (source secret from ${})",
            app_config.signer.secret_env
        )
    })?;

    info!(
        ledger = relay.ledger_name(),
        source = %relay.source_account().short(),
        network = %ledger_cfg.network_passphrase,
        contract = %ledger_cfg.contract_id,
        "Relay configured"
    );

    let relay = Arc::new(relay);
    let tasks = Arc::new(UnsupportedTaskContract::new(ledger_cfg.contract_id.clone()));
    let state = Arc::new(AppState::new(relay, tasks));

    gateway::run_server(&app_config.gateway, state)
        .await
        .context("gateway server")?;

    Ok(())
}
