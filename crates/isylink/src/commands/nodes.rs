//! Gateway node listing.

use isylink_core::{Adapter, Capability, CoreError, GatewayNode, GatewayStatus};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct NodeView {
    address: String,
    name: String,
    node_type: String,
    capability: String,
    enabled: bool,
    parent: Option<String>,
    subnode: bool,
    status: Option<String>,
}

impl NodeView {
    fn new(node: &GatewayNode, status: &GatewayStatus) -> Self {
        let st = status.status_property(&node.address);
        Self {
            address: node.address.clone(),
            name: node.name.clone(),
            node_type: node.node_type.clone(),
            capability: Capability::classify(node, st).to_string(),
            enabled: node.enabled.unwrap_or(true),
            parent: node.parent.as_ref().map(|p| p.address.clone()),
            subnode: node.is_subnode(),
            status: st.map(|p| {
                if p.formatted.trim().is_empty() {
                    p.value.clone()
                } else {
                    p.formatted.clone()
                }
            }),
        }
    }
}

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    node_type: String,
    #[tabled(rename = "Capability")]
    capability: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Subnode")]
    subnode: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&NodeView> for NodeRow {
    fn from(n: &NodeView) -> Self {
        Self {
            address: n.address.clone(),
            name: n.name.clone(),
            node_type: n.node_type.clone(),
            capability: n.capability.clone(),
            enabled: if n.enabled { "yes" } else { "no" }.into(),
            subnode: if n.subnode { "yes" } else { "" }.into(),
            status: n.status.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(adapter: &Adapter, global: &GlobalOpts) -> Result<(), CliError> {
    let client = adapter.client();
    let (nodes, status) = tokio::join!(client.fetch_nodes(), client.fetch_status());
    let nodes = nodes.map_err(CoreError::from)?;
    let status = status.map_err(CoreError::from)?;

    let views: Vec<NodeView> = nodes.iter().map(|n| NodeView::new(n, &status)).collect();
    let out = output::render_list(&global.output, &views, |n| NodeRow::from(n), |n| {
        format!("{}\t{}\t{}", n.address, n.capability, n.name)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
