//! Asset/API server.
//!
//! Serves the UI origin on the configured endpoint from a dedicated thread
//! that owns a current-thread tokio runtime. Two backends exist: the built
//! bundle on disk (production) and a reverse proxy to the frontend dev
//! process (development).

mod proxy;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use fcut_application::{AppContext, AssetServer, HostError, HostResult, ReadySender, ShutdownSignal};
use fcut_domain::ServiceEndpoint;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use url::Url;

pub use proxy::ProxyState;

/// How often the server checks the shutdown signal.
const SHUTDOWN_POLL: Duration = Duration::from_millis(25);

/// What the server answers requests with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerBackend {
    /// Files under `dist_dir`; unknown paths fall back to `index.html`.
    Static {
        /// Built UI bundle.
        dist_dir: PathBuf,
    },
    /// Forward everything to the dev origin.
    Proxy {
        /// Origin of the frontend dev process.
        origin: Url,
    },
}

impl ServerBackend {
    /// Picks the backend for the configured profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the dev origin is invalid.
    pub fn for_context(context: &AppContext) -> HostResult<Self> {
        let config = context.config();
        if config.profile.is_development() {
            Ok(Self::Proxy {
                origin: config.dev_origin()?,
            })
        } else {
            Ok(Self::Static {
                dist_dir: context.paths().resolve(&config.ui.dist_dir),
            })
        }
    }

    /// Builds the request router for this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy client cannot be created.
    pub fn router(&self) -> HostResult<Router> {
        let router = match self {
            Self::Static { dist_dir } => {
                let index = ServeFile::new(dist_dir.join("index.html"));
                let files = ServeDir::new(dist_dir)
                    .append_index_html_on_directories(true)
                    .fallback(index);
                Router::new().fallback_service(files)
            }
            Self::Proxy { origin } => proxy::router(ProxyState::new(origin.clone())?),
        };
        Ok(router.layer(TraceLayer::new_for_http()))
    }
}

/// [`AssetServer`] built on axum.
#[derive(Debug, Clone)]
pub struct AxumAssetServer {
    backend: ServerBackend,
}

impl AxumAssetServer {
    /// Creates a server for `backend`.
    #[must_use]
    pub const fn new(backend: ServerBackend) -> Self {
        Self { backend }
    }

    /// Active backend.
    #[must_use]
    pub const fn backend(&self) -> &ServerBackend {
        &self.backend
    }

    async fn run(
        self,
        endpoint: ServiceEndpoint,
        shutdown: ShutdownSignal,
        ready: &ReadySender,
    ) -> HostResult<()> {
        let router = self.backend.router()?;

        let addr = endpoint.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| HostError::Bind {
                addr,
                reason: e.to_string(),
            })?;
        let bound: SocketAddr = listener
            .local_addr()
            .map_err(|e| HostError::ServerStartup(e.to_string()))?;

        tracing::info!(%bound, backend = ?self.backend, "asset server listening");
        // The coordinator may already have given up waiting.
        let _ = ready.send(Ok(bound));

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_requested(shutdown))
            .await
            .map_err(|e| HostError::Internal(format!("server error: {e}")))?;

        tracing::info!("asset server stopped");
        Ok(())
    }
}

impl AssetServer for AxumAssetServer {
    fn serve(
        self: Box<Self>,
        endpoint: ServiceEndpoint,
        shutdown: ShutdownSignal,
        ready: ReadySender,
    ) -> HostResult<()> {
        let result = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| HostError::ServerStartup(format!("cannot build runtime: {e}")))
            .and_then(|runtime| runtime.block_on((*self).run(endpoint, shutdown, &ready)));

        // Failures before readiness must reach the waiting coordinator.
        if let Err(e) = &result {
            let _ = ready.try_send(Err(e.clone()));
        }
        result
    }
}

async fn shutdown_requested(signal: ShutdownSignal) {
    while !signal.is_set() {
        tokio::time::sleep(SHUTDOWN_POLL).await;
    }
}
