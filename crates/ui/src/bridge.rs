//! UI bridge plumbing
//!
//! Messages posted by the page are handled off the event loop thread, one
//! worker per call, so a blocking dialog never freezes the window. The
//! response travels back as a script that resolves the pending promise.

use std::sync::Arc;
use std::thread;

use fcut_application::CallBridge;
use fcut_domain::{BridgeErrorCode, BridgeFault, BridgeResponse};

/// Script that hands `response` to the page.
#[must_use]
pub fn reply_script(response: &BridgeResponse) -> String {
    let json = serde_json::to_string(response).unwrap_or_else(|e| {
        tracing::error!(id = response.id, "cannot serialize bridge response: {e}");
        let fallback = BridgeResponse::error(
            response.id,
            BridgeFault::new(BridgeErrorCode::HostFailure, "unserializable response"),
        );
        serde_json::to_string(&fallback).unwrap_or_default()
    });
    format!("window.fcut && window.fcut.__resolve({json});")
}

/// Handles one raw message on a worker thread and passes the reply script
/// to `deliver`.
pub fn spawn_call<F>(bridge: Arc<CallBridge>, raw: String, deliver: F)
where
    F: FnOnce(String) + Send + 'static,
{
    let spawned = thread::Builder::new()
        .name("bridge-call".to_string())
        .spawn(move || {
            let response = bridge.handle_message(&raw);
            deliver(reply_script(&response));
        });

    if let Err(e) = spawned {
        // The page promise stays pending; nothing else can answer it.
        tracing::error!("cannot spawn bridge worker: {e}");
    }
}
