// ── Node discovery ──
//
// Turns gateway nodes into publisher nodes with their inputs and
// outputs. Only classified nodes are announced.

use isylink_api::{GatewayConfiguration, GatewayNode, Property};

use crate::model::{
    Capability, DEFAULT_INSTANCE, InputDiscoveryMessage, Node, NodeAddressing, NodeAttrs,
    OutputDiscoveryMessage,
};

pub const ATTR_VERSION: &str = "version";
pub const ATTR_MODEL: &str = "model";
pub const ATTR_MAKE: &str = "make";
pub const ATTR_IDENTITY: &str = "identity";

/// Publisher node for a gateway node, or `None` if it is unclassified.
pub fn device_node(
    addressing: &NodeAddressing,
    node: &GatewayNode,
    status: Option<&Property>,
) -> Option<Node> {
    let capability = Capability::classify(node, status);
    let input_type = capability.input_type()?;
    let output_type = capability.output_type()?;
    let node_id = node.address.as_str();

    Some(Node {
        node_id: node_id.to_owned(),
        address: addressing.node_address(node_id),
        name: node.name.clone(),
        node_type: node.node_type.clone(),
        enabled: node.enabled.unwrap_or(true),
        attrs: NodeAttrs::new(),
        inputs: vec![InputDiscoveryMessage {
            address: addressing.input_address(node_id, &input_type, DEFAULT_INSTANCE),
            node_id: node_id.to_owned(),
            input_type,
            instance: DEFAULT_INSTANCE.to_owned(),
        }],
        outputs: vec![OutputDiscoveryMessage {
            address: addressing.output_address(node_id, &output_type, DEFAULT_INSTANCE),
            node_id: node_id.to_owned(),
            output_type,
            instance: DEFAULT_INSTANCE.to_owned(),
        }],
    })
}

/// Publisher node describing the gateway itself.
pub fn gateway_node(
    addressing: &NodeAddressing,
    gateway_id: &str,
    configuration: &GatewayConfiguration,
) -> Node {
    let mut attrs = NodeAttrs::new();
    attrs.insert(ATTR_VERSION.into(), configuration.app_version.clone());
    if let Some(model) = configuration.model() {
        attrs.insert(ATTR_MODEL.into(), model.to_owned());
    }
    if let Some(specs) = configuration.device_specs.as_ref().filter(|s| !s.make.is_empty()) {
        attrs.insert(ATTR_MAKE.into(), specs.make.clone());
    }
    if let Some(identity) = configuration.identity() {
        attrs.insert(ATTR_IDENTITY.into(), identity.to_owned());
    }

    let name = configuration
        .root
        .as_ref()
        .map(|r| r.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| configuration.app.clone());

    Node {
        node_id: gateway_id.to_owned(),
        address: addressing.node_address(gateway_id),
        name,
        node_type: configuration.platform.clone(),
        enabled: true,
        attrs,
        inputs: Vec::new(),
        outputs: Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use isylink_api::{DeviceSpecs, GatewayProduct, GatewayRoot};

    use super::*;
    use crate::model::{InputType, OutputType};

    fn addressing() -> NodeAddressing {
        NodeAddressing::new("local", "isy99")
    }

    #[test]
    fn switch_gets_one_input_and_output() {
        let gw = GatewayNode {
            address: "15 2D A 1".into(),
            name: "Deck Lights".into(),
            node_type: "2.42.67.0".into(),
            enabled: Some(true),
            ..Default::default()
        };
        let node = device_node(&addressing(), &gw, None).unwrap();

        assert_eq!(node.address, "local/isy99/15 2D A 1");
        assert_eq!(
            node.input(&InputType::Switch, "0").unwrap().address,
            "local/isy99/15 2D A 1/switch/0/$input"
        );
        assert_eq!(
            node.output(&OutputType::Switch, "0").unwrap().address,
            "local/isy99/15 2D A 1/switch/0/$output"
        );
    }

    #[test]
    fn sensors_are_not_announced() {
        let gw = GatewayNode {
            address: "1B 6E B2 1".into(),
            node_type: "16.1.65.0".into(),
            ..Default::default()
        };
        assert!(device_node(&addressing(), &gw, None).is_none());
    }

    #[test]
    fn gateway_node_carries_configuration() {
        let config = GatewayConfiguration {
            app: "Insteon_UD99".into(),
            app_version: "3.3.10".into(),
            platform: "ISY-C-99".into(),
            root: Some(GatewayRoot {
                id: "00:21:b9:00:e4:8a".into(),
                name: "Home".into(),
            }),
            product: Some(GatewayProduct {
                id: "1020".into(),
                description: "ISY 99i 1024".into(),
            }),
            device_specs: Some(DeviceSpecs {
                make: "Universal Devices Inc.".into(),
                model: "Insteon Web Controller".into(),
            }),
            ..Default::default()
        };
        let node = gateway_node(&addressing(), "gateway", &config);

        assert_eq!(node.address, "local/isy99/gateway");
        assert_eq!(node.name, "Home");
        assert_eq!(node.attrs["version"], "3.3.10");
        assert_eq!(node.attrs["model"], "ISY 99i 1024");
        assert_eq!(node.attrs["make"], "Universal Devices Inc.");
        assert_eq!(node.attrs["identity"], "00:21:b9:00:e4:8a");
        assert!(node.inputs.is_empty());
    }
}
