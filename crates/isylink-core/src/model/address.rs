// ── Publisher addressing ──
//
// Nodes live at `{domain}/{publisher}/{node}`; their inputs and outputs
// hang below that as `{type}/{instance}/$input` or `$output`.

use super::capability::{InputType, OutputType};

const INPUT_SUFFIX: &str = "$input";
const OUTPUT_SUFFIX: &str = "$output";

/// Builds and parses publisher addresses for one publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddressing {
    pub domain: String,
    pub publisher_id: String,
}

impl NodeAddressing {
    pub fn new(domain: impl Into<String>, publisher_id: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            publisher_id: publisher_id.into(),
        }
    }

    pub fn node_address(&self, node_id: &str) -> String {
        format!("{}/{}/{node_id}", self.domain, self.publisher_id)
    }

    pub fn input_address(&self, node_id: &str, input_type: &InputType, instance: &str) -> String {
        format!(
            "{}/{input_type}/{instance}/{INPUT_SUFFIX}",
            self.node_address(node_id)
        )
    }

    pub fn output_address(
        &self,
        node_id: &str,
        output_type: &OutputType,
        instance: &str,
    ) -> String {
        format!(
            "{}/{output_type}/{instance}/{OUTPUT_SUFFIX}",
            self.node_address(node_id)
        )
    }

    /// Node address prefix of any node, input or output address.
    ///
    /// Returns `None` when the address belongs to another publisher or has
    /// no node segment.
    pub fn node_address_of<'a>(&self, address: &'a str) -> Option<&'a str> {
        let mut parts = address.splitn(4, '/');
        let domain = parts.next()?;
        let publisher = parts.next()?;
        let node = parts.next()?;
        if domain != self.domain || publisher != self.publisher_id || node.is_empty() {
            return None;
        }
        let len = domain.len() + publisher.len() + node.len() + 2;
        address.get(..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addressing() -> NodeAddressing {
        NodeAddressing::new("local", "isy99")
    }

    #[test]
    fn builds_addresses() {
        let a = addressing();
        assert_eq!(a.node_address("15 2D A 1"), "local/isy99/15 2D A 1");
        assert_eq!(
            a.input_address("15 2D A 1", &InputType::Switch, "0"),
            "local/isy99/15 2D A 1/switch/0/$input"
        );
        assert_eq!(
            a.output_address("15 2D A 1", &OutputType::Switch, "0"),
            "local/isy99/15 2D A 1/switch/0/$output"
        );
    }

    #[test]
    fn node_address_of_input() {
        let a = addressing();
        assert_eq!(
            a.node_address_of("local/isy99/15 2D A 1/switch/0/$input"),
            Some("local/isy99/15 2D A 1")
        );
        assert_eq!(
            a.node_address_of("local/isy99/15 2D A 1"),
            Some("local/isy99/15 2D A 1")
        );
    }

    #[test]
    fn foreign_addresses_do_not_resolve() {
        let a = addressing();
        assert_eq!(a.node_address_of("other/isy99/15 2D A 1"), None);
        assert_eq!(a.node_address_of("local/isy99"), None);
        assert_eq!(a.node_address_of("local/isy99//switch"), None);
    }
}
