// Gateway XML document models
//
// Only the fields the adapter consumes are declared; everything else in
// the gateway's documents is skipped by the deserializer.

use indexmap::IndexMap;
use serde::Deserialize;

/// Property id carrying a node's primary status level.
pub const STATUS_PROPERTY: &str = "ST";

// ── /rest/config ─────────────────────────────────────────────────────

/// Gateway identity and firmware, from `GET /rest/config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GatewayConfiguration {
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub app_version: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub build_timestamp: String,
    #[serde(default)]
    pub root: Option<GatewayRoot>,
    #[serde(default)]
    pub product: Option<GatewayProduct>,
    #[serde(default, rename = "deviceSpecs")]
    pub device_specs: Option<DeviceSpecs>,
}

impl GatewayConfiguration {
    /// Gateway identity (usually its MAC address), if reported.
    pub fn identity(&self) -> Option<&str> {
        self.root.as_ref().map(|r| r.id.as_str()).filter(|id| !id.is_empty())
    }

    /// Best available model description.
    pub fn model(&self) -> Option<&str> {
        self.product
            .as_ref()
            .map(|p| p.description.as_str())
            .filter(|d| !d.is_empty())
            .or_else(|| {
                self.device_specs
                    .as_ref()
                    .map(|s| s.model.as_str())
                    .filter(|m| !m.is_empty())
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GatewayRoot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GatewayProduct {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "desc")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceSpecs {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
}

// ── /rest/nodes ──────────────────────────────────────────────────────

/// Root of `GET /rest/nodes`. Folders and groups are interleaved with
/// nodes in the document and are skipped.
#[derive(Debug, Deserialize)]
pub(crate) struct NodesDocument {
    #[serde(default, rename = "node")]
    pub nodes: Vec<GatewayNode>,
}

/// One device or sub-device managed by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GatewayNode {
    #[serde(default, rename = "@flag")]
    pub flag: Option<u32>,
    /// Node identifier, e.g. `15 2D A 1`.
    pub address: String,
    #[serde(default)]
    pub name: String,
    /// Dotted `category.subcategory.version.reserved` classifier.
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Primary node of a composite device.
    #[serde(default)]
    pub pnode: Option<String>,
    #[serde(default)]
    pub parent: Option<NodeParent>,
    #[serde(default)]
    pub property: Option<Property>,
}

impl GatewayNode {
    /// Leading segment of the node type (`2` in `2.42.67.0`).
    pub fn category(&self) -> Option<u32> {
        self.node_type.split('.').next()?.trim().parse().ok()
    }

    /// `true` when this node is a sub-device of another node.
    pub fn is_subnode(&self) -> bool {
        self.pnode
            .as_deref()
            .is_some_and(|primary| !primary.is_empty() && primary != self.address)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeParent {
    #[serde(default, rename = "@type")]
    pub parent_type: Option<String>,
    #[serde(default, rename = "$text")]
    pub address: String,
}

/// A single reported value, e.g. `<property id="ST" value="255" uom="%/on/off"/>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Property {
    #[serde(default, rename = "@id")]
    pub id: String,
    #[serde(default, rename = "@value")]
    pub value: String,
    #[serde(default, rename = "@formatted")]
    pub formatted: String,
    #[serde(default, rename = "@uom")]
    pub uom: String,
}

// ── /rest/status ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct StatusDocument {
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeStatusEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeStatusEntry {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default, rename = "property")]
    pub properties: Vec<Property>,
}

/// Live values for every node, keyed by node identifier in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayStatus {
    nodes: IndexMap<String, Vec<Property>>,
}

impl GatewayStatus {
    /// All properties reported for a node.
    pub fn node(&self, id: &str) -> Option<&[Property]> {
        self.nodes.get(id).map(Vec::as_slice)
    }

    /// A single property of a node.
    pub fn property(&self, id: &str, property_id: &str) -> Option<&Property> {
        self.node(id)?.iter().find(|p| p.id == property_id)
    }

    /// The node's `ST` property.
    pub fn status_property(&self, id: &str) -> Option<&Property> {
        self.property(id, STATUS_PROPERTY)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Property])> {
        self.nodes.iter().map(|(id, props)| (id.as_str(), props.as_slice()))
    }
}

impl FromIterator<(String, Vec<Property>)> for GatewayStatus {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Property>)>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl From<StatusDocument> for GatewayStatus {
    fn from(doc: StatusDocument) -> Self {
        doc.nodes
            .into_iter()
            .map(|entry| (entry.id, entry.properties))
            .collect()
    }
}

// ── Command responses ────────────────────────────────────────────────

/// `<RestResponse succeeded="true"><status>200</status></RestResponse>`
#[derive(Debug, Deserialize)]
pub(crate) struct RestResponse {
    #[serde(default, rename = "@succeeded")]
    pub succeeded: bool,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn node_category_from_type() {
        let node = GatewayNode {
            address: "15 2D A 1".into(),
            node_type: "2.42.67.0".into(),
            ..Default::default()
        };
        assert_eq!(node.category(), Some(2));
        assert!(!node.is_subnode());
    }

    #[test]
    fn blank_type_has_no_category() {
        let node = GatewayNode::default();
        assert_eq!(node.category(), None);
    }

    #[test]
    fn subnode_points_at_other_primary() {
        let node = GatewayNode {
            address: "1A 2B 3C 2".into(),
            pnode: Some("1A 2B 3C 1".into()),
            ..Default::default()
        };
        assert!(node.is_subnode());
    }

    #[test]
    fn status_lookup_by_property() {
        let status: GatewayStatus = [(
            "15 2D A 1".to_owned(),
            vec![Property {
                id: "ST".into(),
                value: "255".into(),
                formatted: "On".into(),
                uom: "%/on/off".into(),
            }],
        )]
        .into_iter()
        .collect();

        assert_eq!(status.status_property("15 2D A 1").unwrap().value, "255");
        assert!(status.property("15 2D A 1", "OL").is_none());
        assert!(status.node("missing").is_none());
    }

    #[test]
    fn model_prefers_product_description() {
        let cfg = GatewayConfiguration {
            product: Some(GatewayProduct {
                id: "1100".into(),
                description: "ISY 994i 256".into(),
            }),
            device_specs: Some(DeviceSpecs {
                make: "Universal Devices Inc.".into(),
                model: "ISY 994i".into(),
            }),
            ..Default::default()
        };
        assert_eq!(cfg.model(), Some("ISY 994i 256"));
        assert_eq!(cfg.identity(), None);
    }
}
