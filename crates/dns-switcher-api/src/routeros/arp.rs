// ARP table endpoint
//
// `/ip/arp` is read-only for our purposes: it maps a client IP to the
// hardware address the router last saw for it.

use tracing::debug;

use crate::error::Error;
use crate::routeros::client::RouterOsClient;
use crate::routeros::models::RosArpEntry;

impl RouterOsClient {
    /// List ARP entries for `address`.
    ///
    /// `GET /rest/ip/arp?address={address}`
    pub async fn find_arp_by_address(&self, address: &str) -> Result<Vec<RosArpEntry>, Error> {
        let url = self.filtered_url("ip/arp", "address", address)?;
        debug!(address, "looking up ARP entries");
        self.get(url).await
    }
}
