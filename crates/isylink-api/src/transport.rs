// Shared transport configuration for building reqwest::Client instances
// and resolving where gateway documents come from.
//
// A gateway address is either a live HTTP endpoint or a `file://` path
// holding recorded XML documents. Both feed the same parsing path.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::Error;

const FILE_SCHEME: &str = "file://";

/// Where the gateway's documents are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayAddress {
    /// Live gateway, e.g. `http://192.168.1.50`.
    Http(Url),
    /// Recorded gateway documents: a directory holding `config.xml`,
    /// `nodes.xml` and `status.xml`, or a single file served for every read.
    File(PathBuf),
}

impl GatewayAddress {
    /// Parse a configured address. `file://` paths may be relative.
    pub fn parse(address: &str) -> Result<Self, Error> {
        let trimmed = address.trim();
        if let Some(path) = trimmed.strip_prefix(FILE_SCHEME) {
            if path.is_empty() {
                return Err(Error::InvalidAddress {
                    address: address.into(),
                    reason: "file address has no path".into(),
                });
            }
            return Ok(Self::File(PathBuf::from(path)));
        }

        let url = Url::parse(trimmed)?;
        match url.scheme() {
            "http" | "https" if url.host().is_some() => Ok(Self::Http(url)),
            "http" | "https" => Err(Error::InvalidAddress {
                address: address.into(),
                reason: "missing host".into(),
            }),
            other => Err(Error::InvalidAddress {
                address: address.into(),
                reason: format!("unsupported scheme '{other}' (expected http, https or file)"),
            }),
        }
    }

    /// `true` when reads are served from recorded documents.
    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl fmt::Display for GatewayAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{FILE_SCHEME}{}", path.display()),
        }
    }
}

impl std::str::FromStr for GatewayAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Upper bound on any single request to the gateway.
    pub timeout: Duration,
    /// Accept self-signed certificates (ISY firmware ships with one).
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: true,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("isylink/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_http_address() {
        let addr = GatewayAddress::parse("http://192.168.1.50").unwrap();
        assert!(matches!(addr, GatewayAddress::Http(ref u) if u.host_str() == Some("192.168.1.50")));
        assert!(!addr.is_simulated());
    }

    #[test]
    fn parses_relative_file_address() {
        let addr = GatewayAddress::parse("file://../test/gateway-config.xml").unwrap();
        assert_eq!(
            addr,
            GatewayAddress::File(PathBuf::from("../test/gateway-config.xml"))
        );
        assert_eq!(addr.to_string(), "file://../test/gateway-config.xml");
    }

    #[test]
    fn rejects_other_schemes() {
        let err = GatewayAddress::parse("ftp://isy.local").unwrap_err();
        assert!(matches!(err, Error::InvalidAddress { .. }));
    }

    #[test]
    fn rejects_empty_file_path() {
        assert!(GatewayAddress::parse("file://").is_err());
    }
}
