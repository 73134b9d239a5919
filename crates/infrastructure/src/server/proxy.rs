//! Reverse proxy to the frontend dev process.

use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use fcut_application::{HostError, HostResult};
use reqwest::Client;
use url::Url;

/// Shared proxy state.
#[derive(Debug, Clone)]
pub struct ProxyState {
    client: Client,
    origin: Url,
}

impl ProxyState {
    /// Creates a proxy forwarding to `origin`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(origin: Url) -> HostResult<Self> {
        let client = Client::builder()
            .no_proxy()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| HostError::ServerStartup(format!("cannot build proxy client: {e}")))?;
        Ok(Self { client, origin })
    }

    /// Upstream URL for a request: the dev origin with the request's path
    /// and query. The authority always comes from the origin, even for a
    /// path such as `//other-host/x`.
    fn target(&self, uri: &Uri) -> Url {
        let mut target = self.origin.clone();
        target.set_path(uri.path());
        target.set_query(uri.query());
        target
    }
}

pub(super) fn router(state: ProxyState) -> Router {
    Router::new().fallback(forward).with_state(state)
}

/// Drops headers that describe a single connection.
fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in [
        header::CONNECTION,
        header::HOST,
        header::PROXY_AUTHORIZATION,
        header::TE,
        header::TRAILER,
        header::TRANSFER_ENCODING,
        header::UPGRADE,
    ] {
        headers.remove(name);
    }
    headers.remove("keep-alive");
    headers.remove("proxy-connection");
}

async fn forward(State(state): State<ProxyState>, request: Request) -> Response {
    let target = state.target(request.uri());

    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("cannot read body: {e}")).into_response();
        }
    };
    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);

    let upstream = state
        .client
        .request(parts.method, target.clone())
        .headers(headers)
        .body(body)
        .send()
        .await;

    match upstream {
        Ok(upstream) => {
            let status = upstream.status();
            let mut headers = upstream.headers().clone();
            strip_hop_by_hop(&mut headers);

            let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
            *response.status_mut() = status;
            *response.headers_mut() = headers;
            response
        }
        Err(e) => {
            tracing::warn!(%target, "dev origin unreachable: {e}");
            (
                StatusCode::BAD_GATEWAY,
                format!("dev origin {} is unreachable", state.origin),
            )
                .into_response()
        }
    }
}
