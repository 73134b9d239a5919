//! Service endpoint the embedded UI is served from.
//!
//! The same endpoint is used to bind the asset server and to navigate the
//! native window, so the two can never disagree.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ServerConfig;
use crate::error::{DomainError, DomainResult};

/// Identifies where the UI is served: `scheme://host:port/path`.
///
/// Built once from static configuration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    scheme: String,
    host: String,
    port: u16,
    path: String,
}

impl ServiceEndpoint {
    /// Creates a new endpoint, validating every component.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEndpoint` if the scheme is not `http`,
    /// the port is zero, the path does not start with `/`, or the host is
    /// not an IP literal (or `localhost`).
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        path: impl Into<String>,
    ) -> DomainResult<Self> {
        let endpoint = Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
            path: path.into(),
        };

        if endpoint.scheme != "http" {
            return Err(DomainError::InvalidEndpoint(format!(
                "unsupported scheme '{}'",
                endpoint.scheme
            )));
        }
        if endpoint.port == 0 {
            return Err(DomainError::InvalidEndpoint(
                "port must be non-zero".to_string(),
            ));
        }
        if !endpoint.path.starts_with('/') {
            return Err(DomainError::InvalidEndpoint(format!(
                "path '{}' must start with '/'",
                endpoint.path
            )));
        }
        endpoint.ip()?;

        Ok(endpoint)
    }

    /// Builds the endpoint from the `[server]` configuration section.
    ///
    /// # Errors
    ///
    /// Same as [`ServiceEndpoint::new`].
    pub fn from_config(server: &ServerConfig) -> DomainResult<Self> {
        Self::new(&*server.scheme, &*server.host, server.port, &*server.path)
    }

    /// Returns the URL scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the host as configured.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the TCP port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the URL path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Host as it appears in a URL authority (IPv6 literals bracketed).
    fn url_host(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        }
    }

    fn ip(&self) -> DomainResult<IpAddr> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(IpAddr::V4(Ipv4Addr::LOCALHOST));
        }
        self.host
            .parse::<IpAddr>()
            .map_err(|_| DomainError::InvalidEndpoint(format!("host '{}' is not an IP", self.host)))
    }

    /// Returns the socket address the asset server must bind.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        // Validated in `new`.
        let ip = self.ip().unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        SocketAddr::new(ip, self.port)
    }

    /// Returns the URL the native window navigates to.
    ///
    /// # Errors
    ///
    /// Returns an error if the components do not form a valid URL.
    pub fn url(&self) -> DomainResult<Url> {
        let base = format!("{}://{}:{}", self.scheme, self.url_host(), self.port);
        let mut url = Url::parse(&base).map_err(|e| DomainError::InvalidEndpoint(e.to_string()))?;
        url.set_path(&self.path);
        Ok(url)
    }

    /// Returns true if `addr` is exactly the address this endpoint binds.
    #[must_use]
    pub fn matches(&self, addr: SocketAddr) -> bool {
        self.socket_addr() == addr
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}{}", self.scheme, self.url_host(), self.port, self.path)
    }
}
