//! FCut UI - Native window layer
//!
//! Hosts the web UI in a native window and connects it to the call bridge.
//! The real window (wry + tao) is the default `webview` feature; builds
//! without it get a headless host that keeps the process alive until
//! Ctrl-C.

#[cfg(feature = "webview")]
mod app_window;
pub mod bridge;
mod headless;
pub mod script;

#[cfg(feature = "webview")]
pub use app_window::WebviewHost;
pub use bridge::{reply_script, spawn_call};
pub use headless::HeadlessHost;
pub use script::{READY_EVENT, init_script};

use fcut_application::WindowHost;

/// Whether this build opens a native window.
#[must_use]
pub const fn has_native_window() -> bool {
    cfg!(feature = "webview")
}

/// The window host this build provides.
#[must_use]
pub fn default_host() -> Box<dyn WindowHost> {
    #[cfg(feature = "webview")]
    {
        Box::new(WebviewHost::new())
    }
    #[cfg(not(feature = "webview"))]
    {
        Box::new(HeadlessHost::until_ctrl_c())
    }
}
