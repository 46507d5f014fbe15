// ── Runtime adapter configuration ──
//
// Describes which gateway to poll and how the adapter addresses its
// nodes on the publisher side. Carries credentials and timing, but never
// touches disk; `isylink-config` builds one from files and environment.

use std::time::Duration;

use isylink_api::{Credentials, GatewayAddress, TransportConfig};

use crate::model::NodeAddressing;

pub const DEFAULT_DOMAIN: &str = "local";
pub const DEFAULT_PUBLISHER_ID: &str = "isy99";
pub const DEFAULT_GATEWAY_ID: &str = "gateway";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_PROPAGATION_DELAY: Duration = Duration::from_millis(300);

/// Configuration for one adapter instance.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Live gateway URL or `file://` recording.
    pub gateway: GatewayAddress,
    /// Basic-auth login; `None` for recordings or open gateways.
    pub credentials: Option<Credentials>,
    /// Upper bound on each gateway request.
    pub timeout: Duration,
    /// Period of background polling. Zero disables it.
    pub poll_interval: Duration,
    /// Wait between a write and its confirmation poll.
    pub propagation_delay: Duration,
    pub addressing: NodeAddressing,
    /// Node id under which the gateway itself is registered.
    pub gateway_id: String,
}

impl AdapterConfig {
    /// Configuration with default timing and addressing.
    pub fn new(gateway: GatewayAddress) -> Self {
        Self {
            gateway,
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            propagation_delay: DEFAULT_PROPAGATION_DELAY,
            addressing: NodeAddressing::new(DEFAULT_DOMAIN, DEFAULT_PUBLISHER_ID),
            gateway_id: DEFAULT_GATEWAY_ID.into(),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            ..TransportConfig::default()
        }
    }
}
