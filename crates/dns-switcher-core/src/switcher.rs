// ── Switcher facade ──
//
// One Lease Store session per call: open, run, capture the result, close,
// then return. The session is closed on every path, including failures.

use std::net::Ipv4Addr;

use tracing::debug;

use crate::config::DnsPolicy;
use crate::engine;
use crate::error::CoreError;
use crate::model::{DnsMode, Lease};
use crate::store::StoreConnector;

/// Scoped-session entry point used by the HTTP server and CLI.
pub struct Switcher<C> {
    connector: C,
    policy: DnsPolicy,
}

impl<C: StoreConnector> Switcher<C> {
    pub fn new(connector: C, policy: DnsPolicy) -> Self {
        Self { connector, policy }
    }

    pub fn policy(&self) -> &DnsPolicy {
        &self.policy
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    async fn open(&self) -> Result<C::Store, CoreError> {
        self.connector
            .open()
            .await
            .map_err(|e| CoreError::from_store("session open", e))
    }

    /// Current DNS mode of `ip`.
    pub async fn status(&self, ip: Ipv4Addr) -> Result<DnsMode, CoreError> {
        let store = self.open().await?;
        let result = engine::current_mode(&store, &self.policy, ip).await;
        self.connector.close(store).await;
        debug!(%ip, ok = result.is_ok(), "status session finished");
        result
    }

    /// Move `ip` into `CUSTOM`.
    pub async fn switch_to_custom(&self, ip: Ipv4Addr) -> Result<Lease, CoreError> {
        let store = self.open().await?;
        let result = engine::switch_to_custom(&store, &self.policy, ip).await;
        self.connector.close(store).await;
        debug!(%ip, ok = result.is_ok(), "switch session finished");
        result
    }

    /// Move `ip` back to `DEFAULT`.
    pub async fn reset_to_default(&self, ip: Ipv4Addr) -> Result<(), CoreError> {
        let store = self.open().await?;
        let result = engine::reset_to_default(&store, &self.policy, ip).await;
        self.connector.close(store).await;
        debug!(%ip, ok = result.is_ok(), "reset session finished");
        result
    }
}
