// Gateway configuration endpoint
//
// Identity, firmware version, and product description of the controller.

use tracing::debug;

use crate::client::{Endpoint, GatewayClient};
use crate::error::Error;
use crate::models::GatewayConfiguration;

impl GatewayClient {
    /// Fetch the gateway's root configuration document.
    ///
    /// `GET /rest/config`
    ///
    /// A document without an application version is rejected: every
    /// firmware reports one, so its absence means the response is not
    /// from a working gateway.
    pub async fn fetch_configuration(&self) -> Result<GatewayConfiguration, Error> {
        debug!("fetching gateway configuration");
        let body = self.read(Endpoint::Configuration).await?;
        let config: GatewayConfiguration = Self::parse(&body)?;

        if config.app_version.trim().is_empty() {
            return Err(Error::Validation {
                message: "configuration has no app_version".into(),
            });
        }

        Ok(config)
    }
}
