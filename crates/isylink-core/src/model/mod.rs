// ── Domain model ──
//
// Publisher-side types: nodes, their inputs and outputs, and the values
// exchanged with the publishing layer. Gateway-side types live in
// `isylink_api` and are translated here by capability.

mod address;
mod capability;
mod message;
mod node;

pub use address::NodeAddressing;
pub use capability::{Capability, DEFAULT_INSTANCE, InputType, OnOff, OutputType};
pub use message::{OutputUpdate, OutputValue, SetInputMessage};
pub use node::{InputDiscoveryMessage, Node, NodeAttrs, OutputDiscoveryMessage};
