// DHCP server lease endpoints
//
// `/ip/dhcp-server/lease`: lookup by address, static lease creation, removal.

use tracing::debug;

use crate::error::Error;
use crate::routeros::client::RouterOsClient;
use crate::routeros::models::{AddLease, RosLease};

const LEASE_PATH: &str = "ip/dhcp-server/lease";

impl RouterOsClient {
    /// List leases whose address equals `address`.
    ///
    /// `GET /rest/ip/dhcp-server/lease?address={address}`
    ///
    /// RouterOS normally holds at most one lease per address, but the
    /// filter is an equality query so callers get the raw list.
    pub async fn find_leases_by_address(&self, address: &str) -> Result<Vec<RosLease>, Error> {
        let url = self.filtered_url(LEASE_PATH, "address", address)?;
        debug!(address, "looking up DHCP leases");
        self.get(url).await
    }

    /// Create a static lease.
    ///
    /// `PUT /rest/ip/dhcp-server/lease`
    pub async fn add_lease(&self, lease: &AddLease<'_>) -> Result<RosLease, Error> {
        let url = self.rest_url(LEASE_PATH)?;
        debug!(
            address = lease.address,
            mac = lease.mac_address,
            "adding static DHCP lease"
        );
        self.put(url, lease).await
    }

    /// Remove a lease by its `.id`.
    ///
    /// `DELETE /rest/ip/dhcp-server/lease/{id}`
    pub async fn remove_lease(&self, id: &str) -> Result<(), Error> {
        let url = self.rest_url(&format!("{LEASE_PATH}/{id}"))?;
        debug!(id, "removing DHCP lease");
        self.delete(url).await
    }
}
