// ── State reconciliation ──
//
// Diffs freshly fetched gateway state against what the publisher last
// saw and yields only the changes, in gateway node order.

use indexmap::IndexMap;
use isylink_api::{GatewayNode, GatewayStatus};
use tracing::trace;

use crate::model::{Capability, DEFAULT_INSTANCE, OutputUpdate};
use crate::publisher::PublishedState;

/// Compute the output updates needed to bring the publisher in line with
/// the gateway.
///
/// Nodes without a status entry, nodes the adapter cannot classify, and
/// blank status values are skipped without error. A value is emitted
/// when it differs from the published one or nothing was published yet.
pub fn reconcile<P>(
    nodes: &IndexMap<String, GatewayNode>,
    status: &GatewayStatus,
    published: &P,
) -> Vec<OutputUpdate>
where
    P: PublishedState + ?Sized,
{
    nodes
        .iter()
        .filter_map(|(node_id, node)| {
            let property = status.status_property(node_id)?;
            let capability = Capability::classify(node, Some(property));
            let Some(output_type) = capability.output_type() else {
                trace!(node = %node_id, %capability, "skipping unclassified node");
                return None;
            };
            let value = capability.output_value(property)?;

            let previous = published.published_value(node_id, &output_type, DEFAULT_INSTANCE);
            if previous.as_deref() == Some(value.as_str()) {
                return None;
            }

            Some(OutputUpdate {
                node_id: node_id.clone(),
                output_type,
                instance: DEFAULT_INSTANCE.to_owned(),
                value,
            })
        })
        .collect()
}
