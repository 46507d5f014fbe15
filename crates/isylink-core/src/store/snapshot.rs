use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use isylink_api::{GatewayConfiguration, GatewayNode, GatewayStatus};

/// Everything the last successful poll fetched.
///
/// Never mutated after construction. A poll builds a new one and swaps
/// it into the [`SnapshotStore`], so readers see either the old state or
/// the new state.
#[derive(Debug, Clone, Default)]
pub struct GatewaySnapshot {
    pub configuration: Option<Arc<GatewayConfiguration>>,
    /// Gateway nodes keyed by node id, in gateway order.
    pub nodes: Arc<IndexMap<String, GatewayNode>>,
    pub status: Arc<GatewayStatus>,
    /// `None` until the first successful poll.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl GatewaySnapshot {
    pub fn new(
        configuration: Option<Arc<GatewayConfiguration>>,
        nodes: Vec<GatewayNode>,
        status: GatewayStatus,
    ) -> Self {
        let nodes = nodes
            .into_iter()
            .map(|node| (node.address.clone(), node))
            .collect();
        Self {
            configuration,
            nodes: Arc::new(nodes),
            status: Arc::new(status),
            fetched_at: Some(Utc::now()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fetched_at.is_none()
    }

    pub fn node(&self, node_id: &str) -> Option<&GatewayNode> {
        self.nodes.get(node_id)
    }
}

/// Holder of the current [`GatewaySnapshot`].
pub struct SnapshotStore {
    current: ArcSwap<GatewaySnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(GatewaySnapshot::default()),
        }
    }

    pub fn load(&self) -> Arc<GatewaySnapshot> {
        self.current.load_full()
    }

    /// Swap in a new snapshot, returning the one it replaced.
    pub fn replace(&self, snapshot: GatewaySnapshot) -> Arc<GatewaySnapshot> {
        self.current.swap(Arc::new(snapshot))
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
