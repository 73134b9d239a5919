//! Host configuration model.
//!
//! Every field has a serde default so a partial (or missing) config file
//! still yields a complete configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::endpoint::ServiceEndpoint;
use crate::error::{DomainError, DomainResult};

/// Which set of background services the host brings up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Serve the built UI bundle from disk (default).
    #[default]
    Production,
    /// Proxy to a live frontend build tool supervised by the host.
    Development,
}

impl Profile {
    /// Returns true if the frontend dev process must be supervised.
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Product metadata shown in the window title and exposed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Product name, also the window title.
    #[serde(default = "default_product_name")]
    pub name: String,
    /// Author of the application.
    #[serde(default = "default_author")]
    pub author: String,
    /// Publishing company.
    #[serde(default = "default_company")]
    pub company: String,
    /// Application version string.
    #[serde(default = "default_version")]
    pub version: String,
    /// Postal contact address.
    #[serde(default = "default_address")]
    pub address: String,
    /// Contact e-mail.
    #[serde(default = "default_email")]
    pub email: String,
}

fn default_product_name() -> String {
    "FCut".to_string()
}

fn default_author() -> String {
    "Wenyang Tai".to_string()
}

fn default_company() -> String {
    "WENANKO".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_address() -> String {
    "6F.-1, No. 442, Changchun Rd., Songshan Dist., Taipei City 105, Taiwan (R.O.C.)".to_string()
}

fn default_email() -> String {
    "superyngo@gmail.com".to_string()
}

impl Default for ProductInfo {
    fn default() -> Self {
        Self {
            name: default_product_name(),
            author: default_author(),
            company: default_company(),
            version: default_version(),
            address: default_address(),
            email: default_email(),
        }
    }
}

/// Asset/API server binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// URL scheme; only `http` is served.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path the window navigates to.
    #[serde(default = "default_path")]
    pub path: String,
    /// How long startup waits for the server to report it is bound.
    #[serde(default = "default_ready_timeout_ms")]
    pub ready_timeout_ms: u64,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5173
}

fn default_path() -> String {
    "/".to_string()
}

const fn default_ready_timeout_ms() -> u64 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            path: default_path(),
            ready_timeout_ms: default_ready_timeout_ms(),
        }
    }
}

/// Locations of the UI sources and build output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Built bundle served in production.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
    /// UI source tree, working directory of the dev process.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("src/ui/dist")
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("src/ui")
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dist_dir: default_dist_dir(),
            source_dir: default_source_dir(),
        }
    }
}

/// Frontend dev process settings (development profile only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevConfig {
    /// Build tool executable.
    #[serde(default = "default_program")]
    pub program: String,
    /// Fixed arguments, including the host-bind flag.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Origin the dev process serves on; the asset server proxies to it.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Supervisor poll interval.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Bounded wait after a graceful termination request.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
}

fn default_program() -> String {
    if cfg!(windows) {
        "npx.cmd".to_string()
    } else {
        "npx".to_string()
    }
}

fn default_args() -> Vec<String> {
    ["vite", "--host", "127.0.0.1", "--port", "5174", "--strictPort"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_origin() -> String {
    "http://127.0.0.1:5174".to_string()
}

const fn default_poll_interval_ms() -> u64 {
    500
}

const fn default_grace_period_ms() -> u64 {
    1000
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            origin: default_origin(),
            poll_interval_ms: default_poll_interval_ms(),
            grace_period_ms: default_grace_period_ms(),
        }
    }
}

/// Host log settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log files older than this many days are deleted at startup.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Log file name prefix; defaults to the product name.
    #[serde(default)]
    pub file_prefix: Option<String>,
}

fn default_level() -> String {
    "info".to_string()
}

const fn default_retention_days() -> u32 {
    10
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            retention_days: default_retention_days(),
            file_prefix: None,
        }
    }
}

/// Environment handed to spawned processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Text-encoding variable forced for child processes.
    #[serde(default = "default_encoding_var")]
    pub encoding_var: String,
    /// Value the encoding variable is forced to.
    #[serde(default = "default_encoding_value")]
    pub encoding_value: String,
}

fn default_encoding_var() -> String {
    "PYTHONUTF8".to_string()
}

fn default_encoding_value() -> String {
    "1".to_string()
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            encoding_var: default_encoding_var(),
            encoding_value: default_encoding_value(),
        }
    }
}

/// Native window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial inner width in logical pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Initial inner height in logical pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Whether webview devtools are enabled.
    #[serde(default = "default_devtools")]
    pub devtools: bool,
}

const fn default_width() -> u32 {
    1280
}

const fn default_height() -> u32 {
    800
}

const fn default_devtools() -> bool {
    true
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            devtools: default_devtools(),
        }
    }
}

/// Complete, immutable host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Product metadata.
    #[serde(default)]
    pub product: ProductInfo,
    /// Active profile.
    #[serde(default)]
    pub profile: Profile,
    /// Server binding.
    #[serde(default)]
    pub server: ServerConfig,
    /// UI locations.
    #[serde(default)]
    pub ui: UiConfig,
    /// Dev process settings.
    #[serde(default)]
    pub dev: DevConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Child process environment.
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Window settings.
    #[serde(default)]
    pub window: WindowConfig,
}

impl HostConfig {
    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> DomainResult<()> {
        ServiceEndpoint::from_config(&self.server)?;

        if self.product.name.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "product.name must not be empty".to_string(),
            ));
        }
        if self.logging.retention_days == 0 {
            return Err(DomainError::InvalidConfig(
                "logging.retention_days must be at least 1".to_string(),
            ));
        }
        if self.dev.poll_interval_ms == 0 {
            return Err(DomainError::InvalidConfig(
                "dev.poll_interval_ms must be non-zero".to_string(),
            ));
        }
        if self.profile.is_development() {
            if self.dev.program.trim().is_empty() {
                return Err(DomainError::InvalidConfig(
                    "dev.program must not be empty".to_string(),
                ));
            }
            self.dev_origin()?;
        }

        Ok(())
    }

    /// Parses the dev origin the proxy forwards to.
    ///
    /// # Errors
    ///
    /// Returns an error if `dev.origin` is not an absolute http URL.
    pub fn dev_origin(&self) -> DomainResult<Url> {
        let url = Url::parse(&self.dev.origin)
            .map_err(|e| DomainError::InvalidConfig(format!("dev.origin: {e}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DomainError::InvalidConfig(format!(
                "dev.origin must be http(s), got '{}'",
                url.scheme()
            )));
        }
        Ok(url)
    }

    /// Log file prefix, falling back to the product name.
    #[must_use]
    pub fn log_file_prefix(&self) -> &str {
        self.logging
            .file_prefix
            .as_deref()
            .unwrap_or(&self.product.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = HostConfig::default();
        assert_eq!(config.product.name, "FCut");
        assert_eq!(config.profile, Profile::Production);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5173);
        assert_eq!(config.dev.poll_interval_ms, 500);
        assert_eq!(config.dev.grace_period_ms, 1000);
        assert_eq!(config.logging.retention_days, 10);
        assert_eq!(config.log_file_prefix(), "FCut");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: HostConfig =
            serde_json::from_str(r#"{"profile":"development","server":{"port":6000}}"#)
                .expect("parse");
        assert_eq!(config.profile, Profile::Development);
        assert_eq!(config.server.port, 6000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.dev.origin, "http://127.0.0.1:5174");
    }

    #[test]
    fn zero_retention_is_rejected() {
        let mut config = HostConfig::default();
        config.logging.retention_days = 0;
        assert!(matches!(config.validate(), Err(DomainError::InvalidConfig(_))));
    }

    #[test]
    fn bad_dev_origin_only_matters_in_development() {
        let mut config = HostConfig::default();
        config.dev.origin = "not a url".to_string();
        assert!(config.validate().is_ok());

        config.profile = Profile::Development;
        assert!(config.validate().is_err());
    }
}
