//! Native window with an embedded webview (wry + tao).

use std::sync::Arc;

use fcut_application::{CallBridge, HostError, HostResult, WindowHost, WindowTarget};
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::platform::run_return::EventLoopExtRunReturn;
use tao::window::{Window, WindowBuilder};
use wry::{WebView, WebViewBuilder};

use crate::bridge::spawn_call;
use crate::script::init_script;

/// Events delivered to the UI thread from bridge workers.
#[derive(Debug)]
enum UserEvent {
    /// Script resolving one bridge call.
    Reply(String),
}

/// Window host backed by the platform webview.
#[derive(Debug, Default)]
pub struct WebviewHost;

impl WebviewHost {
    /// Creates the host. Nothing is shown until [`WindowHost::run`].
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl WindowHost for WebviewHost {
    fn run(self: Box<Self>, target: &WindowTarget, bridge: Arc<CallBridge>) -> HostResult<()> {
        let mut event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
        let proxy = event_loop.create_proxy();

        let window = WindowBuilder::new()
            .with_title(&target.title)
            .with_inner_size(LogicalSize::new(target.width, target.height))
            .build(&event_loop)
            .map_err(|e| HostError::Window(format!("cannot create window: {e}")))?;

        let builder = WebViewBuilder::new()
            .with_url(&target.url)
            .with_devtools(target.devtools)
            .with_initialization_script(init_script())
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                let proxy = proxy.clone();
                spawn_call(Arc::clone(&bridge), request.into_body(), move |script| {
                    if proxy.send_event(UserEvent::Reply(script)).is_err() {
                        tracing::debug!("window closed before a bridge reply was delivered");
                    }
                });
            });
        let webview = attach(builder, &window)?;
        tracing::info!(url = %target.url, "window shown");

        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Wait;
            match event {
                Event::UserEvent(UserEvent::Reply(script)) => {
                    if let Err(e) = webview.evaluate_script(&script) {
                        tracing::warn!("cannot deliver bridge reply: {e}");
                    }
                }
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    tracing::info!("window close requested");
                    *control_flow = ControlFlow::Exit;
                }
                _ => {}
            }
        });

        Ok(())
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
)))]
fn attach(builder: WebViewBuilder<'_>, window: &Window) -> HostResult<WebView> {
    builder
        .build(window)
        .map_err(|e| HostError::Window(format!("cannot create webview: {e}")))
}

// GTK platforms need the webview packed into the window's container.
#[cfg(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
))]
fn attach(builder: WebViewBuilder<'_>, window: &Window) -> HostResult<WebView> {
    use tao::platform::unix::WindowExtUnix;
    use wry::WebViewBuilderExtUnix;

    let container = window
        .default_vbox()
        .ok_or_else(|| HostError::Window("window has no GTK container".to_string()))?;
    builder
        .build_gtk(container)
        .map_err(|e| HostError::Window(format!("cannot create webview: {e}")))
}
