// Legacy API known-client endpoints
//
// `rest/user` returns every client the controller has a record of,
// connected or not, including any fixed-IP reservation.

use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::KnownClient;

impl LegacyClient {
    /// List all clients known to the site.
    ///
    /// `GET /api/s/{site}/rest/user`
    pub async fn list_known_clients(&self) -> Result<Vec<KnownClient>, Error> {
        let url = self.site_url("rest/user")?;
        debug!(site = self.site(), "listing known clients");
        self.get(url).await
    }
}
