// isylink-core: Read-reconcile-publish loop between an ISY gateway and a publisher.

pub mod adapter;
pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod model;
pub mod publisher;
pub mod reconcile;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use adapter::Adapter;
pub use command::CommandOutcome;
pub use config::AdapterConfig;
pub use error::CoreError;
pub use publisher::{MemoryPublisher, PublishedState, Publisher};
pub use reconcile::reconcile;
pub use store::{GatewaySnapshot, SnapshotStore};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Capability, DEFAULT_INSTANCE, InputDiscoveryMessage, InputType, Node, NodeAddressing,
    NodeAttrs, OnOff, OutputDiscoveryMessage, OutputType, OutputUpdate, OutputValue,
    SetInputMessage,
};

// Gateway-side types consumers need to build a config or read a snapshot.
pub use isylink_api::{
    Credentials, GatewayAddress, GatewayClient, GatewayConfiguration, GatewayNode, GatewayStatus,
    Property,
};
