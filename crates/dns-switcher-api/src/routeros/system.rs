// System endpoints
//
// Only `/system/identity` is needed: a cheap authenticated probe used when
// a session is opened.

use tracing::debug;

use crate::error::Error;
use crate::routeros::client::RouterOsClient;
use crate::routeros::models::RosIdentity;

impl RouterOsClient {
    /// Fetch the router's identity.
    ///
    /// `GET /rest/system/identity`
    pub async fn identity(&self) -> Result<RosIdentity, Error> {
        let url = self.rest_url("system/identity")?;
        debug!("fetching router identity");
        self.get(url).await
    }
}
