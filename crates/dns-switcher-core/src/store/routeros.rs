// ── RouterOS REST Lease Store ──
//
// Adapts `dns_switcher_api::RouterOsClient` to `LeaseStore`. Each session
// builds its own HTTP client and probes `/system/identity` so bad
// credentials surface on open rather than halfway through a transition.

use std::net::Ipv4Addr;

use tracing::debug;

use dns_switcher_api::{AddDhcpOption, AddLease, RouterOsClient};

use crate::config::RouterConfig;
use crate::convert;
use crate::model::{ArpEntry, DhcpOption, Lease, NewDhcpOption, NewLease, RecordId};
use crate::store::{LeaseStore, StoreConnector, StoreError};

impl From<dns_switcher_api::Error> for StoreError {
    fn from(err: dns_switcher_api::Error) -> Self {
        match err {
            dns_switcher_api::Error::Deserialization { message, .. } => Self::Malformed(message),
            ref e if e.is_unavailable() => Self::Unavailable(e.to_string()),
            dns_switcher_api::Error::InvalidUrl(e) => {
                Self::Unavailable(format!("invalid URL: {e}"))
            }
            other => match other.router_message() {
                Some(message) => Self::Rejected(message.to_owned()),
                None => Self::Rejected(other.to_string()),
            },
        }
    }
}

/// Opens [`RouterOsStore`] sessions from a [`RouterConfig`].
#[derive(Debug, Clone)]
pub struct RouterOsConnector {
    config: RouterConfig,
}

impl RouterOsConnector {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

impl StoreConnector for RouterOsConnector {
    type Store = RouterOsStore;

    async fn open(&self) -> Result<RouterOsStore, StoreError> {
        let client = RouterOsClient::new(
            self.config.url.clone(),
            self.config.username.clone(),
            self.config.password.clone(),
            &self.config.transport(),
        )?;
        let identity = client.identity().await?;
        debug!(router = %identity.name, url = %self.config.url, "router session opened");
        Ok(RouterOsStore { client })
    }

    async fn close(&self, store: RouterOsStore) {
        debug!(url = %store.client.base_url(), "router session closed");
        drop(store);
    }
}

/// One RouterOS REST session.
pub struct RouterOsStore {
    client: RouterOsClient,
}

impl RouterOsStore {
    pub fn new(client: RouterOsClient) -> Self {
        Self { client }
    }
}

impl LeaseStore for RouterOsStore {
    async fn lease_by_address(&self, ip: Ipv4Addr) -> Result<Option<Lease>, StoreError> {
        let mut rows = self.client.find_leases_by_address(&ip.to_string()).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        // Several DHCP servers may each hold a lease for the address; the
        // static one decides ownership.
        let index = rows.iter().position(|l| !l.dynamic).unwrap_or(0);
        Lease::try_from(rows.swap_remove(index)).map(Some)
    }

    async fn hardware_address(&self, ip: Ipv4Addr) -> Result<Option<ArpEntry>, StoreError> {
        let rows = self.client.find_arp_by_address(&ip.to_string()).await?;
        for row in rows {
            if let Some(entry) = convert::arp_entry(row)? {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    async fn create_lease(&self, lease: NewLease) -> Result<Lease, StoreError> {
        let address = lease.address.to_string();
        let created = self
            .client
            .add_lease(&AddLease {
                address: &address,
                mac_address: lease.mac_address.as_str(),
                comment: &lease.comment,
                dhcp_option: &lease.dhcp_option,
            })
            .await?;
        Lease::try_from(created)
    }

    async fn delete_lease(&self, id: &RecordId) -> Result<(), StoreError> {
        self.client.remove_lease(id.as_str()).await?;
        Ok(())
    }

    async fn option_by_name(&self, name: &str) -> Result<Option<DhcpOption>, StoreError> {
        let rows = self.client.find_options_by_name(name).await?;
        rows.into_iter().next().map(DhcpOption::try_from).transpose()
    }

    async fn create_option(&self, option: NewDhcpOption) -> Result<DhcpOption, StoreError> {
        let created = self
            .client
            .add_option(&AddDhcpOption {
                name: &option.name,
                code: option.code.to_string(),
                value: &option.value,
                comment: &option.comment,
            })
            .await?;
        DhcpOption::try_from(created)
    }
}
