//! Call bridge wire protocol.
//!
//! Defines the versioned request/response messages exchanged between the
//! embedded UI and the host, and the fixed method catalogue.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current protocol version. Requests carrying another version are rejected.
pub const PROTOCOL_VERSION: u32 = 1;

/// The fixed catalogue of host operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeMethod {
    /// Liveness probe.
    Ping,
    /// Multi-select file picker with media filters.
    OpenFileDialog,
    /// Single directory picker.
    OpenFolderDialog,
    /// Platform default downloads directory.
    GetDefaultDownloadsPath,
    /// Forward a UI log line at the given level.
    Log(LogLevel),
    /// Full constant catalogue.
    GetConstants,
}

impl BridgeMethod {
    /// Every method, in catalogue order.
    pub const ALL: [Self; 9] = [
        Self::Ping,
        Self::OpenFileDialog,
        Self::OpenFolderDialog,
        Self::GetDefaultDownloadsPath,
        Self::Log(LogLevel::Info),
        Self::Log(LogLevel::Warning),
        Self::Log(LogLevel::Error),
        Self::Log(LogLevel::Debug),
        Self::GetConstants,
    ];

    /// Wire name of the method.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::OpenFileDialog => "open_file_dialog",
            Self::OpenFolderDialog => "open_folder_dialog",
            Self::GetDefaultDownloadsPath => "get_default_downloads_path",
            Self::Log(LogLevel::Info) => "logger_info",
            Self::Log(LogLevel::Warning) => "logger_warning",
            Self::Log(LogLevel::Error) => "logger_error",
            Self::Log(LogLevel::Debug) => "logger_debug",
            Self::GetConstants => "get_constants",
        }
    }

    /// Wire names of every method, as installed on the UI side.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.name()).collect()
    }
}

impl FromStr for BridgeMethod {
    type Err = BridgeFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "logger_warn" {
            return Ok(Self::Log(LogLevel::Warning));
        }
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| BridgeFault::new(BridgeErrorCode::UnknownMethod, format!("no method '{s}'")))
    }
}

impl fmt::Display for BridgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity of a forwarded UI log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug detail.
    Debug,
    /// Informational.
    Info,
    /// Something unexpected but recoverable.
    Warning,
    /// Failure.
    Error,
}

/// A single call from the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    /// Protocol version the caller speaks.
    pub version: u32,
    /// Caller-chosen id echoed in the response.
    pub id: u64,
    /// Method wire name.
    pub method: String,
    /// Positional arguments.
    #[serde(default)]
    pub params: Vec<Value>,
}

impl BridgeRequest {
    /// Creates a request for the current protocol version.
    #[must_use]
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            id,
            method: method.into(),
            params,
        }
    }
}

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeErrorCode {
    /// Request version differs from [`PROTOCOL_VERSION`].
    UnsupportedVersion,
    /// Method is not in the catalogue.
    UnknownMethod,
    /// Message could not be parsed or params are unusable.
    InvalidRequest,
    /// The host operation itself failed.
    HostFailure,
}

/// Explicit failure returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code:?}: {message}")]
pub struct BridgeFault {
    /// Failure category.
    pub code: BridgeErrorCode,
    /// Human-readable detail.
    pub message: String,
}

impl BridgeFault {
    /// Creates a new fault.
    #[must_use]
    pub fn new(code: BridgeErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Result half of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BridgeOutcome {
    /// Call succeeded; `result` may be `null` (e.g. a cancelled dialog).
    Ok {
        /// Serialized result.
        result: Value,
    },
    /// Call failed.
    Error {
        /// Failure detail.
        error: BridgeFault,
    },
}

/// Reply to a [`BridgeRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    /// Protocol version of the host.
    pub version: u32,
    /// Id of the request this answers.
    pub id: u64,
    /// Success or failure.
    #[serde(flatten)]
    pub outcome: BridgeOutcome,
}

impl BridgeResponse {
    /// Successful response.
    #[must_use]
    pub fn ok(id: u64, result: Value) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            id,
            outcome: BridgeOutcome::Ok { result },
        }
    }

    /// Failed response.
    #[must_use]
    pub fn error(id: u64, error: BridgeFault) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            id,
            outcome: BridgeOutcome::Error { error },
        }
    }

    /// Returns the result if the call succeeded.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        match &self.outcome {
            BridgeOutcome::Ok { result } => Some(result),
            BridgeOutcome::Error { .. } => None,
        }
    }

    /// Returns the fault if the call failed.
    #[must_use]
    pub const fn fault(&self) -> Option<&BridgeFault> {
        match &self.outcome {
            BridgeOutcome::Ok { .. } => None,
            BridgeOutcome::Error { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn method_names_parse_back() {
        for method in BridgeMethod::ALL {
            assert_eq!(method.name().parse::<BridgeMethod>(), Ok(method));
        }
    }

    #[test]
    fn logger_warn_alias() {
        assert_eq!(
            "logger_warn".parse::<BridgeMethod>(),
            Ok(BridgeMethod::Log(LogLevel::Warning))
        );
    }

    #[test]
    fn unknown_method_is_a_fault() {
        let fault = "format_disk".parse::<BridgeMethod>().expect_err("unknown");
        assert_eq!(fault.code, BridgeErrorCode::UnknownMethod);
    }

    #[test]
    fn request_params_default_to_empty() {
        let request: BridgeRequest =
            serde_json::from_str(r#"{"version":1,"id":7,"method":"ping"}"#).expect("parse");
        assert_eq!(request, BridgeRequest::new(7, "ping", vec![]));
    }

    #[test]
    fn response_wire_shape() {
        let ok = serde_json::to_value(BridgeResponse::ok(3, Value::Null)).expect("serialize");
        assert_eq!(ok, json!({"version": 1, "id": 3, "status": "ok", "result": null}));

        let err = serde_json::to_value(BridgeResponse::error(
            4,
            BridgeFault::new(BridgeErrorCode::HostFailure, "boom"),
        ))
        .expect("serialize");
        assert_eq!(
            err,
            json!({
                "version": 1,
                "id": 4,
                "status": "error",
                "error": {"code": "host_failure", "message": "boom"}
            })
        );
    }
}
