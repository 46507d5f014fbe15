// ── Publisher boundary ──
//
// The adapter does not own node registries or delivery. It talks to a
// publishing layer through `Publisher`; the reconciler only needs the
// read side (`PublishedState`).

mod memory;

use std::sync::Arc;

pub use memory::MemoryPublisher;

use crate::model::{InputDiscoveryMessage, Node, OutputType, OutputUpdate, OutputValue};

/// Node registry and output-value store of the publishing layer.
pub trait Publisher: Send + Sync {
    /// Node owning a node, input or output address.
    fn node_by_address(&self, address: &str) -> Option<Arc<Node>>;

    fn node_by_id(&self, node_id: &str) -> Option<Arc<Node>>;

    fn input_by_address(&self, address: &str) -> Option<InputDiscoveryMessage>;

    /// Last value published for a (node, output type, instance) triple.
    fn output_value(
        &self,
        node_id: &str,
        output_type: &OutputType,
        instance: &str,
    ) -> Option<OutputValue>;

    fn output_value_by_address(&self, address: &str) -> Option<OutputValue>;

    /// Register or replace a node. Returns `false` when an identical node
    /// was already registered.
    fn register_node(&self, node: Node) -> bool;

    /// Apply an update, returning the value as published.
    fn publish_output_value(&self, update: &OutputUpdate) -> OutputValue;
}

/// Read access to previously published values.
pub trait PublishedState {
    fn published_value(
        &self,
        node_id: &str,
        output_type: &OutputType,
        instance: &str,
    ) -> Option<String>;
}

impl<T: Publisher + ?Sized> PublishedState for T {
    fn published_value(
        &self,
        node_id: &str,
        output_type: &OutputType,
        instance: &str,
    ) -> Option<String> {
        self.output_value(node_id, output_type, instance)
            .map(|v| v.value)
    }
}
