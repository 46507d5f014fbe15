//! Configuration for the isylink adapter.
//!
//! One TOML file plus `ISYLINK_*` environment variables, credential
//! resolution (env + keyring + plaintext), and translation to
//! `isylink_core::AdapterConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use isylink_core::{AdapterConfig, Credentials, GatewayAddress, NodeAddressing};

const ENV_PREFIX: &str = "ISYLINK_";
const PASSWORD_ENV: &str = "ISYLINK_PASSWORD";
const KEYRING_SERVICE: &str = "isylink";

/// Longest accepted poll interval: one day.
const MAX_POLL_INTERVAL_SECS: u64 = 24 * 60 * 60;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no gateway address configured (set gateway_address or ISYLINK_GATEWAY_ADDRESS)")]
    NoGateway,

    #[error("no password found for login '{login}'")]
    NoCredentials { login: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Adapter settings as written in `config.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// First segment of every publisher address.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Second segment of every publisher address.
    #[serde(default = "default_publisher_id")]
    pub publisher_id: String,

    /// Node id the gateway itself is registered under.
    #[serde(default = "default_gateway_id")]
    pub gateway_id: String,

    /// `http(s)://host` of the gateway, or `file://path` to recorded documents.
    pub gateway_address: Option<String>,

    /// Basic-auth login.
    pub login_name: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable holding the password.
    pub password_env: Option<String>,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_propagation_delay")]
    pub propagation_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            publisher_id: default_publisher_id(),
            gateway_id: default_gateway_id(),
            gateway_address: None,
            login_name: None,
            password: None,
            password_env: None,
            poll_interval_secs: default_poll_interval(),
            timeout_secs: default_timeout(),
            propagation_delay_ms: default_propagation_delay(),
        }
    }
}

fn default_domain() -> String {
    isylink_core::config::DEFAULT_DOMAIN.into()
}
fn default_publisher_id() -> String {
    isylink_core::config::DEFAULT_PUBLISHER_ID.into()
}
fn default_gateway_id() -> String {
    isylink_core::config::DEFAULT_GATEWAY_ID.into()
}
fn default_poll_interval() -> u64 {
    60
}
fn default_timeout() -> u64 {
    30
}
fn default_propagation_delay() -> u64 {
    300
}

impl Config {
    /// TOML rendering with the plaintext password masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let mut shown = self.clone();
        if shown.password.is_some() {
            shown.password = Some("********".into());
        }
        Ok(toml::to_string_pretty(&shown)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "isylink", "isylink").map_or_else(
        || PathBuf::from(".isylink").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from `path` (or the default location) and the
/// environment. A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["password", "config"]));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the gateway password for `login`.
///
/// Order: the variable named by `password_env`, `ISYLINK_PASSWORD`, the
/// system keyring, then the plaintext `password`.
pub fn resolve_password(config: &Config, login: &str) -> Result<SecretString, ConfigError> {
    resolve_password_with(config, login, |login| {
        keyring::Entry::new(KEYRING_SERVICE, login)
            .and_then(|entry| entry.get_password())
            .ok()
    })
}

fn resolve_password_with<F>(
    config: &Config,
    login: &str,
    keyring_lookup: F,
) -> Result<SecretString, ConfigError>
where
    F: FnOnce(&str) -> Option<String>,
{
    // 1. Named env var
    if let Some(ref env_name) = config.password_env {
        if let Ok(pw) = std::env::var(env_name) {
            return Ok(SecretString::from(pw));
        }
    }

    // 2. Fixed env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 3. Keyring
    if let Some(pw) = keyring_lookup(login) {
        return Ok(SecretString::from(pw));
    }

    // 4. Plaintext in config
    if let Some(ref pw) = config.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        login: login.into(),
    })
}

// ── Translation ─────────────────────────────────────────────────────

fn check_segment(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.contains('/') {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("'{value}' must be non-empty and contain no '/'"),
        });
    }
    Ok(())
}

/// Build an `AdapterConfig`. Credentials are resolved only when a login
/// name is configured; recorded gateways need none.
pub fn to_adapter_config(config: &Config) -> Result<AdapterConfig, ConfigError> {
    check_segment("domain", &config.domain)?;
    check_segment("publisher_id", &config.publisher_id)?;
    check_segment("gateway_id", &config.gateway_id)?;
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation {
            field: "timeout_secs".into(),
            reason: "must be at least 1".into(),
        });
    }
    if config.poll_interval_secs > MAX_POLL_INTERVAL_SECS {
        return Err(ConfigError::Validation {
            field: "poll_interval_secs".into(),
            reason: format!("must be at most {MAX_POLL_INTERVAL_SECS} (0 disables polling)"),
        });
    }

    let address = config
        .gateway_address
        .as_deref()
        .ok_or(ConfigError::NoGateway)?;
    let gateway = GatewayAddress::parse(address).map_err(|e| ConfigError::Validation {
        field: "gateway_address".into(),
        reason: e.to_string(),
    })?;

    let credentials = match config.login_name.as_deref().filter(|l| !l.is_empty()) {
        Some(login) => Some(Credentials {
            login: login.to_owned(),
            password: resolve_password(config, login)?,
        }),
        None => None,
    };

    Ok(AdapterConfig {
        gateway,
        credentials,
        timeout: Duration::from_secs(config.timeout_secs),
        poll_interval: Duration::from_secs(config.poll_interval_secs),
        propagation_delay: Duration::from_millis(config.propagation_delay_ms),
        addressing: NodeAddressing::new(config.domain.clone(), config.publisher_id.clone()),
        gateway_id: config.gateway_id.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|jail| {
            let config = load_config(Some(&jail.directory().join("missing.toml"))).unwrap();
            assert_eq!(config.domain, "local");
            assert_eq!(config.publisher_id, "isy99");
            assert_eq!(config.poll_interval_secs, 60);
            assert_eq!(config.propagation_delay_ms, 300);
            assert!(config.gateway_address.is_none());
            Ok(())
        });
    }

    #[test]
    fn file_then_environment() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    gateway_address = "http://192.168.1.50"
                    login_name = "admin"
                    poll_interval_secs = 15
                "#,
            )?;
            jail.set_env("ISYLINK_POLL_INTERVAL_SECS", "5");
            jail.set_env("ISYLINK_PUBLISHER_ID", "garage");

            let config = load_config(Some(Path::new("config.toml"))).unwrap();
            assert_eq!(config.gateway_address.as_deref(), Some("http://192.168.1.50"));
            assert_eq!(config.login_name.as_deref(), Some("admin"));
            assert_eq!(config.poll_interval_secs, 5);
            assert_eq!(config.publisher_id, "garage");
            Ok(())
        });
    }

    #[test]
    fn password_env_var_is_not_loaded_as_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("ISYLINK_PASSWORD", "from-env");
            let config = load_config(Some(Path::new("none.toml"))).unwrap();
            assert!(config.password.is_none());
            Ok(())
        });
    }

    #[test]
    fn named_env_var_wins() {
        Jail::expect_with(|jail| {
            jail.set_env("GATEWAY_PW", "named");
            jail.set_env("ISYLINK_PASSWORD", "fixed");
            let config = Config {
                password_env: Some("GATEWAY_PW".into()),
                password: Some("plain".into()),
                ..Config::default()
            };
            let pw = resolve_password_with(&config, "admin", |_| Some("keyring".into())).unwrap();
            assert_eq!(pw.expose_secret(), "named");
            Ok(())
        });
    }

    #[test]
    fn keyring_before_plaintext() {
        Jail::expect_with(|_| {
            let config = Config {
                password: Some("plain".into()),
                ..Config::default()
            };
            let pw = resolve_password_with(&config, "admin", |login| {
                assert_eq!(login, "admin");
                Some("keyring".into())
            })
            .unwrap();
            assert_eq!(pw.expose_secret(), "keyring");

            let pw = resolve_password_with(&config, "admin", |_| None).unwrap();
            assert_eq!(pw.expose_secret(), "plain");

            let err = resolve_password_with(&Config::default(), "admin", |_| None).unwrap_err();
            assert!(matches!(err, ConfigError::NoCredentials { .. }));
            Ok(())
        });
    }

    #[test]
    fn adapter_config_from_recorded_gateway() {
        let config = Config {
            gateway_address: Some("file://../test/gateway".into()),
            propagation_delay_ms: 50,
            ..Config::default()
        };
        let adapter = to_adapter_config(&config).unwrap();
        assert!(adapter.gateway.is_simulated());
        assert!(adapter.credentials.is_none());
        assert_eq!(adapter.propagation_delay, Duration::from_millis(50));
        assert_eq!(adapter.addressing.node_address("15 2D A 1"), "local/isy99/15 2D A 1");
    }

    #[test]
    fn missing_or_bad_gateway_is_rejected() {
        assert!(matches!(
            to_adapter_config(&Config::default()),
            Err(ConfigError::NoGateway)
        ));

        let config = Config {
            gateway_address: Some("ftp://isy".into()),
            ..Config::default()
        };
        assert!(matches!(
            to_adapter_config(&config),
            Err(ConfigError::Validation { ref field, .. }) if field == "gateway_address"
        ));

        let config = Config {
            gateway_address: Some("http://isy".into()),
            domain: "a/b".into(),
            ..Config::default()
        };
        assert!(to_adapter_config(&config).is_err());
    }

    #[test]
    fn poll_interval_is_bounded() {
        let config = Config {
            gateway_address: Some("http://isy".into()),
            poll_interval_secs: u64::MAX,
            ..Config::default()
        };
        assert!(matches!(
            to_adapter_config(&config),
            Err(ConfigError::Validation { ref field, .. }) if field == "poll_interval_secs"
        ));

        let config = Config {
            poll_interval_secs: MAX_POLL_INTERVAL_SECS,
            ..config
        };
        assert_eq!(
            to_adapter_config(&config).unwrap().poll_interval,
            Duration::from_secs(MAX_POLL_INTERVAL_SECS)
        );

        let config = Config {
            poll_interval_secs: 0,
            ..config
        };
        assert!(to_adapter_config(&config).unwrap().poll_interval.is_zero());
    }

    #[test]
    fn redacted_toml_hides_password() {
        let config = Config {
            password: Some("hunter2".into()),
            ..Config::default()
        };
        let shown = config.to_redacted_toml().unwrap();
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("********"));
    }
}
