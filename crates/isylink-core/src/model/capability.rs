// ── Device capabilities ──
//
// What a gateway node can do, expressed as typed variants instead of
// string comparisons. Only on/off switching is understood today;
// everything else falls into the `Unsupported` / `Other` arms.

use std::fmt;

use isylink_api::{GatewayNode, Property};
use serde::{Serialize, Serializer};

/// Instance used when a node exposes one input/output of a type.
pub const DEFAULT_INSTANCE: &str = "0";

/// Insteon device categories that switch a load: `1` dimmable, `2` relay.
const SWITCH_CATEGORIES: [u32; 2] = [1, 2];

/// Status units reported by on/off capable nodes.
const ON_OFF_UNITS: [&str; 2] = ["%/on/off", "on/off"];

// ── Input / output types ─────────────────────────────────────────────

/// Type of an addressable input on the publisher side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputType {
    Switch,
    Other(String),
}

impl InputType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Switch => "switch",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for InputType {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("switch") {
            Self::Switch
        } else {
            Self::Other(s.to_owned())
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InputType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Type of a reported output on the publisher side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputType {
    Switch,
    Other(String),
}

impl OutputType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Switch => "switch",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for OutputType {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("switch") {
            Self::Switch
        } else {
            Self::Other(s.to_owned())
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OutputType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ── On/off state ─────────────────────────────────────────────────────

/// Binary switch state. Displays as the published value (`true`/`false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
pub enum OnOff {
    #[strum(serialize = "true")]
    On,
    #[strum(serialize = "false")]
    Off,
}

impl OnOff {
    /// Parse a set-input payload.
    ///
    /// `0`, `off` and `false` (any casing) switch off; every other value,
    /// including unrecognized text, switches on.
    pub fn from_command(value: &str) -> Self {
        let value = value.trim();
        if value == "0" || value.eq_ignore_ascii_case("off") || value.eq_ignore_ascii_case("false")
        {
            Self::Off
        } else {
            Self::On
        }
    }

    /// Interpret a gateway status level. Blank levels mean the gateway does
    /// not know the state yet.
    pub fn from_level(level: &str) -> Option<Self> {
        let level = level.trim();
        if level.is_empty() {
            return None;
        }
        let numeric: f64 = level.parse().ok()?;
        Some(if numeric.abs() < f64::EPSILON {
            Self::Off
        } else {
            Self::On
        })
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }

    /// Value string as published for a switch output.
    pub fn as_value(self) -> &'static str {
        self.into()
    }
}

// ── Capability ───────────────────────────────────────────────────────

/// What the adapter can do with a gateway node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// Binary actuator: one switch input, one switch output.
    Switch,
    /// Node type the adapter does not understand; carries the gateway type.
    Unsupported(String),
}

impl Capability {
    /// Classify a node from its type, falling back to the unit of its
    /// status property when the type has no category.
    pub fn classify(node: &GatewayNode, status: Option<&Property>) -> Self {
        match node.category() {
            Some(category) if SWITCH_CATEGORIES.contains(&category) => Self::Switch,
            Some(_) => Self::Unsupported(node.node_type.clone()),
            None => {
                let uom = status
                    .or(node.property.as_ref())
                    .map(|p| p.uom.trim())
                    .unwrap_or_default();
                if ON_OFF_UNITS.iter().any(|u| u.eq_ignore_ascii_case(uom)) {
                    Self::Switch
                } else {
                    Self::Unsupported(node.node_type.clone())
                }
            }
        }
    }

    pub fn output_type(&self) -> Option<OutputType> {
        match self {
            Self::Switch => Some(OutputType::Switch),
            Self::Unsupported(_) => None,
        }
    }

    pub fn input_type(&self) -> Option<InputType> {
        match self {
            Self::Switch => Some(InputType::Switch),
            Self::Unsupported(_) => None,
        }
    }

    /// Translate a gateway status property into the published value.
    pub fn output_value(&self, status: &Property) -> Option<String> {
        match self {
            Self::Switch => OnOff::from_level(&status.value).map(|s| s.as_value().to_owned()),
            Self::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch => f.write_str("switch"),
            Self::Unsupported(node_type) if node_type.is_empty() => f.write_str("unsupported"),
            Self::Unsupported(node_type) => write!(f, "unsupported ({node_type})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(node_type: &str) -> GatewayNode {
        GatewayNode {
            address: "15 2D A 1".into(),
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    fn st(value: &str, uom: &str) -> Property {
        Property {
            id: "ST".into(),
            value: value.into(),
            formatted: String::new(),
            uom: uom.into(),
        }
    }

    #[test]
    fn command_payloads_that_switch_off() {
        for value in ["0", "off", "OFF", "Off", "false", "False", "FALSE", " off "] {
            assert_eq!(OnOff::from_command(value), OnOff::Off, "payload {value:?}");
        }
    }

    #[test]
    fn every_other_payload_switches_on() {
        for value in ["1", "on", "true", "anything-else", "", "00", "no"] {
            assert_eq!(OnOff::from_command(value), OnOff::On, "payload {value:?}");
        }
    }

    #[test]
    fn levels_map_to_switch_state() {
        assert_eq!(OnOff::from_level("255"), Some(OnOff::On));
        assert_eq!(OnOff::from_level("100"), Some(OnOff::On));
        assert_eq!(OnOff::from_level("0"), Some(OnOff::Off));
        assert_eq!(OnOff::from_level(" "), None);
        assert_eq!(OnOff::from_level("On"), None);
    }

    #[test]
    fn published_values() {
        assert_eq!(OnOff::On.as_value(), "true");
        assert_eq!(OnOff::Off.to_string(), "false");
    }

    #[test]
    fn lighting_categories_are_switches() {
        assert_eq!(Capability::classify(&node("2.42.67.0"), None), Capability::Switch);
        assert_eq!(Capability::classify(&node("1.32.65.0"), None), Capability::Switch);
    }

    #[test]
    fn sensors_are_unsupported_even_with_on_off_units() {
        let cap = Capability::classify(&node("16.1.65.0"), Some(&st("0", "%/on/off")));
        assert_eq!(cap, Capability::Unsupported("16.1.65.0".into()));
        assert_eq!(cap.output_type(), None);
        assert_eq!(cap.input_type(), None);
    }

    #[test]
    fn untyped_node_falls_back_to_unit() {
        assert_eq!(
            Capability::classify(&node(""), Some(&st("255", "%/on/off"))),
            Capability::Switch
        );
        assert_eq!(
            Capability::classify(&node(""), Some(&st("72", "degrees"))),
            Capability::Unsupported(String::new())
        );
    }

    #[test]
    fn switch_output_value_from_status() {
        let cap = Capability::Switch;
        assert_eq!(cap.output_value(&st("255", "%/on/off")).as_deref(), Some("true"));
        assert_eq!(cap.output_value(&st("0", "%/on/off")).as_deref(), Some("false"));
        assert_eq!(cap.output_value(&st(" ", "%/on/off")), None);
    }

    #[test]
    fn type_names_parse_case_insensitively() {
        assert_eq!(InputType::from("Switch"), InputType::Switch);
        assert_eq!(InputType::from("dimmer"), InputType::Other("dimmer".into()));
        assert_eq!(OutputType::Switch.to_string(), "switch");
    }
}
