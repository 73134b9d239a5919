//! Window host used when no native webview is compiled in.
//!
//! Serves nothing itself: it reports the UI address so a regular browser
//! can be pointed at it and blocks until the close source fires, which
//! stands in for the user closing the window.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use fcut_application::{CallBridge, HostError, HostResult, WindowHost, WindowTarget};
use fcut_domain::BridgeMethod;

enum CloseSource {
    CtrlC,
    Channel(Receiver<()>),
}

/// Headless stand-in for the native window.
pub struct HeadlessHost {
    close: CloseSource,
}

impl HeadlessHost {
    /// Closes on Ctrl-C.
    #[must_use]
    pub const fn until_ctrl_c() -> Self {
        Self {
            close: CloseSource::CtrlC,
        }
    }

    /// Closes when `close` receives a message or its sender is dropped.
    #[must_use]
    pub const fn until(close: Receiver<()>) -> Self {
        Self {
            close: CloseSource::Channel(close),
        }
    }
}

impl WindowHost for HeadlessHost {
    fn run(self: Box<Self>, target: &WindowTarget, _bridge: Arc<CallBridge>) -> HostResult<()> {
        tracing::info!(
            title = %target.title,
            url = %target.url,
            methods = ?BridgeMethod::names(),
            "running without a native window; open the URL in a browser"
        );

        let close = match self.close {
            CloseSource::Channel(close) => close,
            CloseSource::CtrlC => {
                let (tx, rx) = mpsc::channel();
                ctrlc::set_handler(move || {
                    let _ = tx.send(());
                })
                .map_err(|e| HostError::Window(format!("cannot install Ctrl-C handler: {e}")))?;
                rx
            }
        };

        // Either a message or a dropped sender means "closed".
        let _ = close.recv();
        tracing::info!("headless host closing");
        Ok(())
    }
}
