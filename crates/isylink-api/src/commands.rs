// Node command endpoints
//
// Writes go through `/rest/nodes/{address}/cmd/{command}` and answer with
// a `<RestResponse>` document.

use tracing::{debug, info};

use crate::client::GatewayClient;
use crate::error::Error;
use crate::models::RestResponse;
use crate::transport::GatewayAddress;

/// Insteon "device on" command.
const CMD_ON: &str = "DON";
/// Insteon "device off" command.
const CMD_OFF: &str = "DOF";

impl GatewayClient {
    /// Switch a binary actuator on or off.
    ///
    /// `GET /rest/nodes/{node}/cmd/DON` or `.../DOF`
    ///
    /// The gateway acknowledges before the device has changed state; the
    /// caller has to poll to observe the result. On a simulated gateway
    /// the write is logged and accepted without effect.
    pub async fn write_on_off(&self, node: &str, on: bool) -> Result<(), Error> {
        let cmd = if on { CMD_ON } else { CMD_OFF };

        let base = match self.address() {
            GatewayAddress::Http(base) => base,
            GatewayAddress::File(path) => {
                info!(node, cmd, path = %path.display(), "simulated gateway, write ignored");
                return Ok(());
            }
        };

        let url = self.rest_url(base, &["nodes", node, "cmd", cmd])?;
        debug!(node, cmd, "writing node command");

        let resp = self.send_get(url).await?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::CommandRejected {
                node: node.into(),
                status: Some(status.as_u16()),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let response: RestResponse = Self::parse(&body)?;
        if !response.succeeded {
            return Err(Error::CommandRejected {
                node: node.into(),
                status: response.status.as_deref().and_then(|s| s.trim().parse().ok()),
                message: format!(
                    "{cmd} not accepted (status {})",
                    response.status.as_deref().unwrap_or("unknown")
                ),
            });
        }

        Ok(())
    }
}
