//! Port for signalling that cached views of a path are stale.

use serde::Serialize;
use tokio::sync::broadcast;

/// Notification that `path` moved to `generation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevalidationEvent {
    /// Revalidated path.
    pub path: String,
    /// Generation after the flush.
    pub generation: u64,
}

/// Path-keyed invalidation signal.
///
/// Each call to [`revalidate`](Self::revalidate) advances the path's
/// generation and publishes a [`RevalidationEvent`]; readers compare
/// generations to detect stale renderings.
#[cfg_attr(test, mockall::automock)]
pub trait ViewRevalidator: Send + Sync {
    /// Mark every cached rendering of `path` as stale.
    fn revalidate(&self, path: &str);

    /// Current generation of `path`; zero until first revalidated.
    fn generation(&self, path: &str) -> u64;

    /// Receive every revalidation published after this call.
    fn subscribe(&self) -> broadcast::Receiver<RevalidationEvent>;
}
