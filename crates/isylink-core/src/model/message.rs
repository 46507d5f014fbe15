use chrono::{DateTime, Utc};
use serde::Serialize;

use super::capability::OutputType;

/// Payload of a set-input command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetInputMessage {
    /// Input address the command targets.
    pub address: String,
    pub value: String,
}

/// Last value published for an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputValue {
    /// Output address, `{node address}/{type}/{instance}/$output`.
    pub address: String,
    pub value: String,
    pub timestamp: DateTime<Utc>,
}

/// A change the reconciler asks the publisher to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputUpdate {
    pub node_id: String,
    pub output_type: OutputType,
    pub instance: String,
    pub value: String,
}
