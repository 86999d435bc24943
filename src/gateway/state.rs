use std::sync::Arc;

use crate::payment::PaymentRelay;
use crate::tasks::TaskContract;

/// Gateway shared state. Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Payment pipeline (keypair, network, ledger client)
    pub relay: Arc<PaymentRelay>,
    /// Task-list contract boundary
    pub tasks: Arc<dyn TaskContract>,
}

impl AppState {
    pub fn new(relay: Arc<PaymentRelay>, tasks: Arc<dyn TaskContract>) -> Self {
        Self { relay, tasks }
    }

    pub fn network_passphrase(&self) -> &str {
        self.relay.network().passphrase()
    }
}
