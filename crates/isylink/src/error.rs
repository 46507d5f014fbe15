//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use isylink_config::ConfigError;
use isylink_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the gateway")]
    #[diagnostic(
        code(isylink::connection_failed),
        help(
            "Check gateway_address and that the gateway is powered and reachable.\n\
             Recorded documents can be replayed with --gateway file://<dir>"
        )
    )]
    ConnectionFailed { message: String },

    #[error("Gateway request timed out")]
    #[diagnostic(
        code(isylink::timeout),
        help("Increase timeout_secs in the config or check gateway responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(isylink::auth_failed),
        help("Verify login_name and the password (password_env, ISYLINK_PASSWORD, keyring, or password).")
    )]
    AuthFailed { message: String },

    #[error("No password found for login '{login}'")]
    #[diagnostic(
        code(isylink::no_credentials),
        help("Set ISYLINK_PASSWORD, name a variable in password_env, or store it in the keyring under service 'isylink'.")
    )]
    NoCredentials { login: String },

    // ── Gateway ──────────────────────────────────────────────────────
    #[error("No switch registered for node '{address}'")]
    #[diagnostic(
        code(isylink::not_found),
        help("Run: isylink nodes to see which nodes are switches")
    )]
    NodeNotFound { address: String },

    #[error("Gateway rejected the command for node '{node}': {message}")]
    #[diagnostic(code(isylink::command_rejected))]
    CommandRejected { node: String, message: String },

    #[error("Gateway sent an unusable response: {message}")]
    #[diagnostic(
        code(isylink::bad_response),
        help("Run with -vv to log each request.")
    )]
    BadResponse { message: String },

    #[error("Adapter is shutting down")]
    #[diagnostic(code(isylink::shutdown))]
    Shutdown,

    // ── Configuration ────────────────────────────────────────────────
    #[error("No gateway address configured")]
    #[diagnostic(
        code(isylink::no_gateway),
        help(
            "Pass --gateway, set ISYLINK_GATEWAY_ADDRESS, or add gateway_address to\n\
             {path}"
        )
    )]
    NoGateway { path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(isylink::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(isylink::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(isylink::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NodeNotFound { .. } => exit_code::NOT_FOUND,
            Self::NoGateway { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport { message, .. } => CliError::ConnectionFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Parse { message } | CoreError::Validation { message } => {
                CliError::BadResponse { message }
            }
            CoreError::NodeNotFound { address } => CliError::NodeNotFound { address },
            CoreError::CommandRejected { node, message } => {
                CliError::CommandRejected { node, message }
            }
            CoreError::Config { message } => CliError::Validation {
                field: "gateway_address".into(),
                reason: message,
            },
            CoreError::Shutdown => CliError::Shutdown,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoGateway => CliError::NoGateway {
                path: isylink_config::config_path().display().to_string(),
            },
            ConfigError::NoCredentials { login } => CliError::NoCredentials { login },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_kind() {
        let cases = [
            (CoreError::Timeout, exit_code::TIMEOUT),
            (
                CoreError::Transport {
                    message: "refused".into(),
                    transient: true,
                },
                exit_code::CONNECTION,
            ),
            (
                CoreError::AuthenticationFailed {
                    message: "401".into(),
                },
                exit_code::AUTH,
            ),
            (
                CoreError::NodeNotFound {
                    address: "local/isy99/X".into(),
                },
                exit_code::NOT_FOUND,
            ),
            (
                CoreError::Parse {
                    message: "eof".into(),
                },
                exit_code::GENERAL,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn missing_gateway_is_usage_error() {
        assert_eq!(CliError::from(ConfigError::NoGateway).exit_code(), exit_code::USAGE);
    }
}
