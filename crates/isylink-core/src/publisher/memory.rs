// ── In-process publisher ──
//
// Concurrent registry of nodes and output values with push notification
// of every published value. Stands in for a message-bus publisher in the
// CLI and in tests.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use super::Publisher;
use crate::model::{
    InputDiscoveryMessage, Node, NodeAddressing, OutputType, OutputUpdate, OutputValue,
};

const UPDATE_CHANNEL_SIZE: usize = 256;

/// Publisher keeping everything in memory.
pub struct MemoryPublisher {
    addressing: NodeAddressing,
    /// Primary storage: node id -> node.
    nodes: DashMap<String, Arc<Node>>,
    /// Secondary index: node address -> node id.
    node_ids: DashMap<String, String>,
    /// Input address -> input descriptor.
    inputs: DashMap<String, InputDiscoveryMessage>,
    /// Output address -> last published value.
    values: DashMap<String, OutputValue>,
    updates: broadcast::Sender<OutputValue>,
}

impl MemoryPublisher {
    pub fn new(addressing: NodeAddressing) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_SIZE);
        Self {
            addressing,
            nodes: DashMap::new(),
            node_ids: DashMap::new(),
            inputs: DashMap::new(),
            values: DashMap::new(),
            updates,
        }
    }

    pub fn addressing(&self) -> &NodeAddressing {
        &self.addressing
    }

    /// Receive every value published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<OutputValue> {
        self.updates.subscribe()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Publisher for MemoryPublisher {
    fn node_by_address(&self, address: &str) -> Option<Arc<Node>> {
        let node_address = self.addressing.node_address_of(address).unwrap_or(address);
        let node_id = self.node_ids.get(node_address)?.clone();
        self.node_by_id(&node_id)
    }

    fn node_by_id(&self, node_id: &str) -> Option<Arc<Node>> {
        self.nodes.get(node_id).map(|n| Arc::clone(n.value()))
    }

    fn input_by_address(&self, address: &str) -> Option<InputDiscoveryMessage> {
        self.inputs.get(address).map(|i| i.value().clone())
    }

    fn output_value(
        &self,
        node_id: &str,
        output_type: &OutputType,
        instance: &str,
    ) -> Option<OutputValue> {
        let address = self
            .addressing
            .output_address(node_id, output_type, instance);
        self.output_value_by_address(&address)
    }

    fn output_value_by_address(&self, address: &str) -> Option<OutputValue> {
        self.values.get(address).map(|v| v.value().clone())
    }

    fn register_node(&self, node: Node) -> bool {
        if let Some(existing) = self.nodes.get(&node.node_id) {
            if **existing == node {
                return false;
            }
        }

        if let Some((_, old)) = self.nodes.remove(&node.node_id) {
            self.node_ids.remove(&old.address);
            for input in &old.inputs {
                self.inputs.remove(&input.address);
            }
        }

        for input in &node.inputs {
            self.inputs.insert(input.address.clone(), input.clone());
        }
        self.node_ids
            .insert(node.address.clone(), node.node_id.clone());
        debug!(node = %node.node_id, address = %node.address, "node registered");
        self.nodes.insert(node.node_id.clone(), Arc::new(node));
        true
    }

    fn publish_output_value(&self, update: &OutputUpdate) -> OutputValue {
        let value = OutputValue {
            address: self.addressing.output_address(
                &update.node_id,
                &update.output_type,
                &update.instance,
            ),
            value: update.value.clone(),
            timestamp: Utc::now(),
        };
        self.values.insert(value.address.clone(), value.clone());
        // No receivers is fine.
        let _ = self.updates.send(value.clone());
        value
    }
}
