// Gateway HTTP client
//
// Wraps `reqwest::Client` with ISY-specific URL construction, basic auth,
// and XML decoding. Endpoint modules (system, nodes, commands) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{GatewayAddress, TransportConfig};

/// Login for the gateway's HTTP basic auth.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: SecretString,
}

/// Read-only gateway documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Configuration,
    Nodes,
    Status,
}

impl Endpoint {
    /// Path segments below `/rest`.
    fn segments(self) -> &'static [&'static str] {
        match self {
            Self::Configuration => &["config"],
            Self::Nodes => &["nodes"],
            Self::Status => &["status"],
        }
    }

    /// Document name inside a simulated gateway directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Configuration => "config.xml",
            Self::Nodes => "nodes.xml",
            Self::Status => "status.xml",
        }
    }
}

/// Raw client for the gateway's REST interface.
///
/// All fetch methods return typed documents; the XML never leaves this
/// crate. When the address is a `file://` path, reads come from disk and
/// writes are accepted without effect.
pub struct GatewayClient {
    http: reqwest::Client,
    address: GatewayAddress,
    credentials: Option<Credentials>,
}

impl GatewayClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(
        address: GatewayAddress,
        credentials: Option<Credentials>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            address,
            credentials,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        address: GatewayAddress,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            http,
            address,
            credentials,
        }
    }

    /// Redirect the client to another address (e.g. recorded documents).
    pub fn with_address(mut self, address: GatewayAddress) -> Self {
        self.address = address;
        self
    }

    /// The gateway address this client reads from.
    pub fn address(&self) -> &GatewayAddress {
        &self.address
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/rest/{segments...}`, percent-encoding each segment.
    ///
    /// Node addresses contain spaces (`15 2D A 1`), so segments are pushed
    /// individually rather than formatted into a string.
    pub(crate) fn rest_url(&self, base: &Url, segments: &[&str]) -> Result<Url, Error> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidAddress {
                address: base.to_string(),
                reason: "address cannot be a base URL".into(),
            })?
            .pop_if_empty()
            .push("rest")
            .extend(segments);
        Ok(url)
    }

    fn document_path(root: &Path, endpoint: Endpoint) -> PathBuf {
        if root.is_dir() {
            root.join(endpoint.file_name())
        } else {
            root.to_path_buf()
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Fetch a read-only document as text from whichever transport is active.
    pub(crate) async fn read(&self, endpoint: Endpoint) -> Result<String, Error> {
        match &self.address {
            GatewayAddress::Http(base) => {
                let url = self.rest_url(base, endpoint.segments())?;
                let resp = self.send_get(url.clone()).await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(Error::Http {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                resp.text().await.map_err(Error::Transport)
            }
            GatewayAddress::File(root) => {
                let path = Self::document_path(root, endpoint);
                debug!(path = %path.display(), "reading simulated gateway document");
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| Error::Io { path, source })
            }
        }
    }

    /// Send an authenticated GET. 401/403 become `Error::Authentication`.
    pub(crate) async fn send_get(&self, url: Url) -> Result<reqwest::Response, Error> {
        debug!("GET {}", url);

        let mut request = self.http.get(url);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.login, Some(creds.password.expose_secret()));
        }

        let resp = request.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: format!("gateway refused login (HTTP {})", status.as_u16()),
            });
        }

        Ok(resp)
    }

    /// Decode an XML body into `T`, keeping the body on failure.
    pub(crate) fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
        quick_xml::de::from_str(body).map_err(|e| Error::Parse {
            message: e.to_string(),
            body: body.to_owned(),
        })
    }
}
