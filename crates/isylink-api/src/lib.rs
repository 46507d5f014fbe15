// isylink-api: Async Rust client for the ISY gateway REST/XML interface

pub mod client;
pub mod commands;
pub mod error;
pub mod models;
pub mod nodes;
pub mod system;
pub mod transport;

pub use client::{Credentials, Endpoint, GatewayClient};
pub use error::Error;
pub use models::{
    DeviceSpecs, GatewayConfiguration, GatewayNode, GatewayProduct, GatewayRoot, GatewayStatus,
    NodeParent, Property, STATUS_PROPERTY,
};
pub use transport::{GatewayAddress, TransportConfig};
