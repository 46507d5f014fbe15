// Node list and status endpoints

use tracing::debug;

use crate::client::{Endpoint, GatewayClient};
use crate::error::Error;
use crate::models::{GatewayNode, GatewayStatus, NodesDocument, StatusDocument};

impl GatewayClient {
    /// List every node in document order.
    ///
    /// `GET /rest/nodes`
    ///
    /// An online gateway always reports at least one node, so an empty
    /// list is an `Error::Validation`.
    pub async fn fetch_nodes(&self) -> Result<Vec<GatewayNode>, Error> {
        debug!("fetching gateway nodes");
        let body = self.read(Endpoint::Nodes).await?;
        let doc: NodesDocument = Self::parse(&body)?;

        if doc.nodes.is_empty() {
            return Err(Error::Validation {
                message: "gateway reported no nodes".into(),
            });
        }

        Ok(doc.nodes)
    }

    /// Fetch live values for all nodes in a single request.
    ///
    /// `GET /rest/status`
    pub async fn fetch_status(&self) -> Result<GatewayStatus, Error> {
        debug!("fetching gateway status");
        let body = self.read(Endpoint::Status).await?;
        let doc: StatusDocument = Self::parse(&body)?;
        Ok(GatewayStatus::from(doc))
    }
}
