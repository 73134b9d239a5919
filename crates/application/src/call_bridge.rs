//! Call Bridge
//!
//! The only surface through which UI script code reaches the host. Every
//! operation is safe to call without further authorization; calls are
//! independent and may run concurrently.

use std::path::PathBuf;
use std::sync::Arc;

use fcut_domain::{
    BridgeErrorCode, BridgeFault, BridgeMethod, BridgeRequest, BridgeResponse, ConstantCatalogue,
    LogLevel, PROTOCOL_VERSION,
};
use serde_json::Value;

use crate::{AppContext, FileDialogs, FileFilter, HostError, HostResult};

/// Fixed reply to `ping`.
pub const PING_REPLY: &str = "pong";

/// Filters offered by `open_file_dialog`: media types, then everything.
#[must_use]
pub fn media_filters() -> Vec<FileFilter> {
    vec![
        FileFilter::new(
            "Media Files",
            &["mp4", "mpeg", "mpg", "avi", "mkv", "mp3", "aac"],
        ),
        FileFilter::new("All files", &["*"]),
    ]
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

/// Host side of the UI bridge.
pub struct CallBridge {
    context: Arc<AppContext>,
    dialogs: Arc<dyn FileDialogs>,
}

impl CallBridge {
    /// Creates a bridge over the shared context and dialog adapter.
    #[must_use]
    pub fn new(context: Arc<AppContext>, dialogs: Arc<dyn FileDialogs>) -> Self {
        Self { context, dialogs }
    }

    /// Liveness probe.
    #[must_use]
    pub const fn ping(&self) -> &'static str {
        PING_REPLY
    }

    /// Opens the multi-select file dialog.
    ///
    /// Returns `None` when the user cancels.
    ///
    /// # Errors
    ///
    /// Returns an error if the dialog cannot be shown.
    pub fn open_file_dialog(&self) -> HostResult<Option<Vec<String>>> {
        let selection = self.dialogs.pick_files(&media_filters())?;
        Ok(selection.map(|paths| paths.into_iter().map(path_string).collect()))
    }

    /// Opens the directory dialog.
    ///
    /// Returns `None` on cancel; never returns an empty path.
    ///
    /// # Errors
    ///
    /// Returns an error if the dialog cannot be shown.
    pub fn open_folder_dialog(&self) -> HostResult<Option<String>> {
        let selection = self.dialogs.pick_folder()?;
        Ok(selection
            .map(path_string)
            .filter(|path| !path.is_empty()))
    }

    /// Platform default downloads directory.
    #[must_use]
    pub fn get_default_downloads_path(&self) -> String {
        path_string(self.context.paths().downloads())
    }

    /// Forwards a UI log line to the host sink. Never fails.
    pub fn log(&self, level: LogLevel, message: &str) {
        if let Err(e) = self.context.log_sink().write(level, message) {
            tracing::debug!("dropped UI log line: {e}");
        }
    }

    /// Full constant catalogue, re-derived on every call.
    #[must_use]
    pub fn get_constants(&self) -> ConstantCatalogue {
        self.context.constants()
    }

    /// Runs one catalogue method with positional params.
    ///
    /// # Errors
    ///
    /// Returns a `BridgeFault` if the host operation fails.
    pub fn invoke(&self, method: BridgeMethod, params: &[Value]) -> Result<Value, BridgeFault> {
        match method {
            BridgeMethod::Ping => Ok(Value::from(self.ping())),
            BridgeMethod::OpenFileDialog => self
                .open_file_dialog()
                .map_err(host_fault)
                .and_then(to_value),
            BridgeMethod::OpenFolderDialog => self
                .open_folder_dialog()
                .map_err(host_fault)
                .and_then(to_value),
            BridgeMethod::GetDefaultDownloadsPath => Ok(Value::from(self.get_default_downloads_path())),
            BridgeMethod::Log(level) => {
                self.log(level, &log_message(params));
                Ok(Value::Null)
            }
            BridgeMethod::GetConstants => to_value(self.get_constants()),
        }
    }

    /// Handles a parsed request.
    #[must_use]
    pub fn dispatch(&self, request: &BridgeRequest) -> BridgeResponse {
        if request.version != PROTOCOL_VERSION {
            return BridgeResponse::error(
                request.id,
                BridgeFault::new(
                    BridgeErrorCode::UnsupportedVersion,
                    format!(
                        "protocol version {} is not supported (host speaks {PROTOCOL_VERSION})",
                        request.version
                    ),
                ),
            );
        }

        let method = match request.method.parse::<BridgeMethod>() {
            Ok(method) => method,
            Err(fault) => return BridgeResponse::error(request.id, fault),
        };

        tracing::trace!(id = request.id, %method, "bridge call");
        match self.invoke(method, &request.params) {
            Ok(result) => BridgeResponse::ok(request.id, result),
            Err(fault) => {
                tracing::warn!(id = request.id, %method, "bridge call failed: {}", fault.message);
                BridgeResponse::error(request.id, fault)
            }
        }
    }

    /// Handles a raw JSON message from the UI.
    ///
    /// Malformed messages are answered with `invalid_request`, echoing the
    /// id when one can be recovered.
    #[must_use]
    pub fn handle_message(&self, raw: &str) -> BridgeResponse {
        match serde_json::from_str::<BridgeRequest>(raw) {
            Ok(request) => self.dispatch(&request),
            Err(e) => {
                let id = serde_json::from_str::<Value>(raw)
                    .ok()
                    .and_then(|v| v.get("id").and_then(Value::as_u64))
                    .unwrap_or(0);
                BridgeResponse::error(
                    id,
                    BridgeFault::new(BridgeErrorCode::InvalidRequest, e.to_string()),
                )
            }
        }
    }
}

fn host_fault(error: HostError) -> BridgeFault {
    BridgeFault::new(BridgeErrorCode::HostFailure, error.to_string())
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, BridgeFault> {
    serde_json::to_value(value)
        .map_err(|e| BridgeFault::new(BridgeErrorCode::HostFailure, e.to_string()))
}

/// First param as log text; non-strings are rendered as JSON.
fn log_message(params: &[Value]) -> String {
    match params.first() {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogSink, ProcessEnvironment, SinkError};
    use fcut_domain::{AppPaths, HostConfig};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<(LogLevel, String)>>,
    }

    impl LogSink for RecordingSink {
        fn write(&self, level: LogLevel, message: &str) -> Result<(), SinkError> {
            self.lines
                .lock()
                .expect("lock")
                .push((level, message.to_string()));
            Ok(())
        }
    }

    struct BrokenSink;

    impl LogSink for BrokenSink {
        fn write(&self, _level: LogLevel, _message: &str) -> Result<(), SinkError> {
            Err(SinkError("disk full".to_string()))
        }
    }

    /// Dialog fake returning canned selections.
    struct ScriptedDialogs {
        files: HostResult<Option<Vec<PathBuf>>>,
        folder: HostResult<Option<PathBuf>>,
        seen_filters: Mutex<Vec<FileFilter>>,
    }

    impl ScriptedDialogs {
        fn cancelled() -> Self {
            Self {
                files: Ok(None),
                folder: Ok(None),
                seen_filters: Mutex::new(Vec::new()),
            }
        }
    }

    impl FileDialogs for ScriptedDialogs {
        fn pick_files(&self, filters: &[FileFilter]) -> HostResult<Option<Vec<PathBuf>>> {
            *self.seen_filters.lock().expect("lock") = filters.to_vec();
            self.files.clone()
        }

        fn pick_folder(&self) -> HostResult<Option<PathBuf>> {
            self.folder.clone()
        }
    }

    fn context(sink: Arc<dyn LogSink>) -> Arc<AppContext> {
        let paths = AppPaths::from_roots(
            Path::new("/home/ana"),
            Path::new("/data"),
            Path::new("/opt/fcut"),
            "FCut",
        );
        Arc::new(
            AppContext::new(
                HostConfig::default(),
                paths,
                ProcessEnvironment::default(),
                sink,
            )
            .expect("context"),
        )
    }

    fn bridge_with(dialogs: ScriptedDialogs) -> CallBridge {
        CallBridge::new(context(Arc::new(RecordingSink::default())), Arc::new(dialogs))
    }

    #[test]
    fn ping_returns_constant() {
        let bridge = bridge_with(ScriptedDialogs::cancelled());
        let response = bridge.dispatch(&BridgeRequest::new(1, "ping", vec![]));
        assert_eq!(response.result(), Some(&json!(PING_REPLY)));
    }

    #[test]
    fn cancelled_dialogs_return_null_not_error() {
        let bridge = bridge_with(ScriptedDialogs::cancelled());

        assert_eq!(bridge.open_file_dialog().expect("ok"), None);
        assert_eq!(bridge.open_folder_dialog().expect("ok"), None);

        let response = bridge.dispatch(&BridgeRequest::new(2, "open_folder_dialog", vec![]));
        assert_eq!(response.result(), Some(&Value::Null));
    }

    #[test]
    fn file_dialog_keeps_selection_order_and_filters() {
        let mut dialogs = ScriptedDialogs::cancelled();
        dialogs.files = Ok(Some(vec![
            PathBuf::from("/clips/b.mp4"),
            PathBuf::from("/clips/a.mkv"),
        ]));
        let dialogs = Arc::new(dialogs);
        let bridge = CallBridge::new(
            context(Arc::new(RecordingSink::default())),
            Arc::clone(&dialogs) as Arc<dyn FileDialogs>,
        );

        let response = bridge.dispatch(&BridgeRequest::new(3, "open_file_dialog", vec![]));
        assert_eq!(response.result(), Some(&json!(["/clips/b.mp4", "/clips/a.mkv"])));

        let filters = dialogs.seen_filters.lock().expect("lock").clone();
        assert_eq!(filters, media_filters());
        assert_eq!(filters[1].extensions, vec!["*".to_string()]);
    }

    #[test]
    fn empty_folder_path_is_absent() {
        let mut dialogs = ScriptedDialogs::cancelled();
        dialogs.folder = Ok(Some(PathBuf::new()));
        let bridge = bridge_with(dialogs);
        assert_eq!(bridge.open_folder_dialog().expect("ok"), None);
    }

    #[test]
    fn dialog_failure_is_explicit_fault() {
        let mut dialogs = ScriptedDialogs::cancelled();
        dialogs.folder = Err(HostError::Dialog("no display".to_string()));
        let bridge = bridge_with(dialogs);

        let response = bridge.dispatch(&BridgeRequest::new(4, "open_folder_dialog", vec![]));
        let fault = response.fault().expect("fault");
        assert_eq!(fault.code, BridgeErrorCode::HostFailure);
    }

    #[test]
    fn downloads_path_comes_from_home() {
        let bridge = bridge_with(ScriptedDialogs::cancelled());
        assert_eq!(bridge.get_default_downloads_path(), "/home/ana/Downloads");
    }

    #[test]
    fn log_calls_reach_sink_at_matching_level() {
        let sink = Arc::new(RecordingSink::default());
        let bridge = CallBridge::new(
            context(Arc::clone(&sink) as Arc<dyn LogSink>),
            Arc::new(ScriptedDialogs::cancelled()),
        );

        for (method, text) in [
            ("logger_info", "hello"),
            ("logger_warning", "careful"),
            ("logger_warn", "legacy"),
            ("logger_error", "broken"),
            ("logger_debug", "detail"),
        ] {
            let response = bridge.dispatch(&BridgeRequest::new(5, method, vec![json!(text)]));
            assert_eq!(response.result(), Some(&Value::Null));
        }
        bridge.dispatch(&BridgeRequest::new(6, "logger_info", vec![json!({"n": 1})]));

        let lines = sink.lines.lock().expect("lock").clone();
        assert_eq!(
            lines,
            vec![
                (LogLevel::Info, "hello".to_string()),
                (LogLevel::Warning, "careful".to_string()),
                (LogLevel::Warning, "legacy".to_string()),
                (LogLevel::Error, "broken".to_string()),
                (LogLevel::Debug, "detail".to_string()),
                (LogLevel::Info, r#"{"n":1}"#.to_string()),
            ]
        );
    }

    #[test]
    fn log_calls_never_fail_even_without_sink() {
        let bridge = CallBridge::new(context(Arc::new(BrokenSink)), Arc::new(ScriptedDialogs::cancelled()));
        for method in ["logger_info", "logger_warning", "logger_error", "logger_debug"] {
            let response = bridge.dispatch(&BridgeRequest::new(7, method, vec![]));
            assert!(response.fault().is_none());
        }
    }

    #[test]
    fn constants_are_idempotent_and_string_valued() {
        let bridge = bridge_with(ScriptedDialogs::cancelled());
        let first = bridge.dispatch(&BridgeRequest::new(8, "get_constants", vec![]));
        let second = bridge.dispatch(&BridgeRequest::new(8, "get_constants", vec![]));
        assert_eq!(first, second);

        let result = first.result().expect("result");
        assert_eq!(result["CONFIG"]["UI_PORT"], json!("5173"));
        assert_eq!(result["ACTIONS"]["Cut"], json!("cut"));
    }

    #[test]
    fn unknown_method_and_bad_version_are_rejected() {
        let bridge = bridge_with(ScriptedDialogs::cancelled());

        let unknown = bridge.dispatch(&BridgeRequest::new(9, "rm_rf", vec![]));
        assert_eq!(unknown.fault().map(|f| f.code), Some(BridgeErrorCode::UnknownMethod));

        let mut old = BridgeRequest::new(10, "ping", vec![]);
        old.version = 0;
        let response = bridge.dispatch(&old);
        assert_eq!(response.fault().map(|f| f.code), Some(BridgeErrorCode::UnsupportedVersion));
        assert_eq!(response.id, 10);
    }

    #[test]
    fn malformed_message_echoes_recoverable_id() {
        let bridge = bridge_with(ScriptedDialogs::cancelled());

        let response = bridge.handle_message(r#"{"id": 11, "method": 5}"#);
        assert_eq!(response.id, 11);
        assert_eq!(response.fault().map(|f| f.code), Some(BridgeErrorCode::InvalidRequest));

        let garbage = bridge.handle_message("not json");
        assert_eq!(garbage.id, 0);
    }

    #[test]
    fn raw_round_trip() {
        let bridge = bridge_with(ScriptedDialogs::cancelled());
        let response = bridge.handle_message(r#"{"version":1,"id":12,"method":"ping","params":[]}"#);
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json, json!({"version": 1, "id": 12, "status": "ok", "result": "pong"}));
    }
}
