//! Asset/API server port

use std::net::SocketAddr;
use std::sync::mpsc::SyncSender;

use fcut_domain::ServiceEndpoint;

use crate::{HostResult, ShutdownSignal};

/// Channel on which a server reports the bound address (or bind failure)
/// exactly once.
pub type ReadySender = SyncSender<HostResult<SocketAddr>>;

/// A long-lived HTTP service serving the UI origin.
///
/// Implementations bind exactly `endpoint`, report through `ready`, then
/// serve until `shutdown` is set. The call blocks the current thread.
pub trait AssetServer: Send {
    /// Binds and serves until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if binding fails or the server stops abnormally.
    /// A bind failure is also sent on `ready`.
    fn serve(
        self: Box<Self>,
        endpoint: ServiceEndpoint,
        shutdown: ShutdownSignal,
        ready: ReadySender,
    ) -> HostResult<()>;
}
