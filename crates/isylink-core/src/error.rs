// ── Core error types ──
//
// Adapter-facing errors. Gateway transport and XML details from
// `isylink_api` are folded into the kinds the driver and command
// translator reason about: could not reach, could not read, refused.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Reaching the gateway ─────────────────────────────────────────
    #[error("Cannot reach gateway: {message}")]
    Transport { message: String, transient: bool },

    #[error("Gateway request timed out")]
    Timeout,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Reading the gateway ──────────────────────────────────────────
    #[error("Malformed gateway response: {message}")]
    Parse { message: String },

    #[error("Incomplete gateway response: {message}")]
    Validation { message: String },

    // ── Commands ─────────────────────────────────────────────────────
    #[error("No registered node for address '{address}'")]
    NodeNotFound { address: String },

    #[error("Gateway rejected command for node '{node}': {message}")]
    CommandRejected { node: String, message: String },

    // ── Adapter ──────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Adapter is shutting down")]
    Shutdown,
}

impl CoreError {
    /// Returns `true` when a later attempt may succeed unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport { transient: true, .. })
    }
}

// ── Conversion from gateway client errors ────────────────────────────

impl From<isylink_api::Error> for CoreError {
    fn from(err: isylink_api::Error) -> Self {
        let transient = err.is_transient();
        match err {
            isylink_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            isylink_api::Error::Parse { message, .. } => CoreError::Parse { message },
            isylink_api::Error::Validation { message } => CoreError::Validation { message },
            isylink_api::Error::CommandRejected { node, message, .. } => {
                CoreError::CommandRejected { node, message }
            }
            isylink_api::Error::InvalidAddress { .. }
            | isylink_api::Error::InvalidUrl(_)
            | isylink_api::Error::Tls(_) => CoreError::Config {
                message: err.to_string(),
            },
            isylink_api::Error::Transport(ref e) if e.is_timeout() => CoreError::Timeout,
            isylink_api::Error::Transport(_)
            | isylink_api::Error::Io { .. }
            | isylink_api::Error::Http { .. } => CoreError::Transport {
                message: err.to_string(),
                transient,
            },
        }
    }
}
