use std::collections::BTreeMap;

use serde::Serialize;

use super::capability::{InputType, OutputType};

/// Free-form node attributes (`version`, `model`, ...).
pub type NodeAttrs = BTreeMap<String, String>;

/// An addressable input as announced to the publishing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputDiscoveryMessage {
    /// Full input address, `{node address}/{type}/{instance}/$input`.
    pub address: String,
    pub node_id: String,
    pub input_type: InputType,
    pub instance: String,
}

/// A reported output as announced to the publishing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDiscoveryMessage {
    /// Full output address, `{node address}/{type}/{instance}/$output`.
    pub address: String,
    pub node_id: String,
    pub output_type: OutputType,
    pub instance: String,
}

/// A node as registered with the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Gateway node identifier (`15 2D A 1`), or the gateway id for the
    /// gateway itself.
    pub node_id: String,
    /// Publisher address, `{domain}/{publisher}/{node_id}`.
    pub address: String,
    pub name: String,
    /// Gateway type classifier, kept for display.
    pub node_type: String,
    pub enabled: bool,
    pub attrs: NodeAttrs,
    pub inputs: Vec<InputDiscoveryMessage>,
    pub outputs: Vec<OutputDiscoveryMessage>,
}

impl Node {
    pub fn input(&self, input_type: &InputType, instance: &str) -> Option<&InputDiscoveryMessage> {
        self.inputs
            .iter()
            .find(|i| &i.input_type == input_type && i.instance == instance)
    }

    pub fn output(
        &self,
        output_type: &OutputType,
        instance: &str,
    ) -> Option<&OutputDiscoveryMessage> {
        self.outputs
            .iter()
            .find(|o| &o.output_type == output_type && o.instance == instance)
    }
}
