// DHCP server option endpoints
//
// `/ip/dhcp-server/option`: router-global option records referenced by
// name from leases.

use tracing::debug;

use crate::error::Error;
use crate::routeros::client::RouterOsClient;
use crate::routeros::models::{AddDhcpOption, RosDhcpOption};

const OPTION_PATH: &str = "ip/dhcp-server/option";

impl RouterOsClient {
    /// List DHCP options named `name`.
    ///
    /// `GET /rest/ip/dhcp-server/option?name={name}`
    pub async fn find_options_by_name(&self, name: &str) -> Result<Vec<RosDhcpOption>, Error> {
        let url = self.filtered_url(OPTION_PATH, "name", name)?;
        debug!(name, "looking up DHCP options");
        self.get(url).await
    }

    /// Create a DHCP option.
    ///
    /// `PUT /rest/ip/dhcp-server/option`
    pub async fn add_option(&self, option: &AddDhcpOption<'_>) -> Result<RosDhcpOption, Error> {
        let url = self.rest_url(OPTION_PATH)?;
        debug!(
            name = option.name,
            code = %option.code,
            value = option.value,
            "adding DHCP option"
        );
        self.put(url, option).await
    }
}
