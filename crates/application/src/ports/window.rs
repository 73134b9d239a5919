//! Native window port

use std::sync::Arc;

use crate::{AppContext, CallBridge, HostResult};

/// What the native window shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTarget {
    /// Window title (the product name).
    pub title: String,
    /// URL the webview navigates to; always the service endpoint URL.
    pub url: String,
    /// Whether devtools are available.
    pub devtools: bool,
    /// Initial inner width.
    pub width: u32,
    /// Initial inner height.
    pub height: u32,
}

impl WindowTarget {
    /// Derives the target from the application context.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint does not form a valid URL.
    pub fn from_context(context: &AppContext) -> HostResult<Self> {
        let window = &context.config().window;
        Ok(Self {
            title: context.config().product.name.clone(),
            url: context.endpoint().url()?.to_string(),
            devtools: window.devtools,
            width: window.width,
            height: window.height,
        })
    }
}

/// Owner of the native event loop.
///
/// `run` must be called on the main thread and blocks until the window
/// is closed.
pub trait WindowHost {
    /// Creates the window, attaches the bridge and runs the event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be created or the event loop
    /// fails.
    fn run(self: Box<Self>, target: &WindowTarget, bridge: Arc<CallBridge>) -> HostResult<()>;
}
