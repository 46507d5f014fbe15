use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `isylink-api` crate.
///
/// Covers every failure mode of the gateway client: reaching the gateway
/// (HTTP or file), decoding its XML, and the gateway refusing a write.
/// `isylink-core` maps these into the adapter's error kinds.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Reading a simulated gateway document from disk failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gateway answered a read with a non-success HTTP status.
    #[error("Gateway returned HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Gateway rejected the configured login.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Gateway address could not be turned into a usable endpoint.
    #[error("Invalid gateway address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// XML deserialization failed, with the raw body for debugging.
    #[error("Malformed gateway XML: {message}")]
    Parse { message: String, body: String },

    /// Document parsed, but is missing data the adapter needs.
    #[error("Incomplete gateway response: {message}")]
    Validation { message: String },

    // ── Commands ────────────────────────────────────────────────────
    /// The gateway responded to a write but refused it.
    #[error("Gateway rejected command for node '{node}': {message}")]
    CommandRejected {
        node: String,
        status: Option<u16>,
        message: String,
    },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the failure happened before any gateway data was
    /// received (network or file I/O).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Io { .. } | Self::Http { .. })
    }

    /// Returns `true` if this error came from the gateway refusing a write.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::CommandRejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Http {
            status: 503,
            url: "http://isy/rest/nodes".into(),
        };
        assert!(err.is_transient());
        assert!(err.is_transport());
    }

    #[test]
    fn rejected_write_is_not_transient() {
        let err = Error::CommandRejected {
            node: "15 2D A 1".into(),
            status: Some(404),
            message: "node not found".into(),
        };
        assert!(!err.is_transient());
        assert!(err.is_rejected());
        assert!(!err.is_transport());
    }
}
