use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Reference-counted loading overlay.
///
/// Every in-flight request holds a [`LoadingGuard`]; the overlay is visible
/// while at least one guard is alive. Overlapping requests therefore cannot
/// hide the overlay early, and a failed request cannot leave it stuck,
/// because the guard is released on drop whatever the outcome.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    pending: Arc<AtomicUsize>,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the overlay for the lifetime of the returned guard.
    pub fn begin(&self) -> LoadingGuard {
        let pending = self.pending.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(pending, "loading overlay acquired");
        LoadingGuard {
            pending: Arc::clone(&self.pending),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.pending() > 0
    }

    /// Number of requests currently holding the overlay.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

/// Keeps the loading overlay visible until dropped.
#[must_use = "the overlay is hidden as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LoadingGuard {
    pending: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let pending = self.pending.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        tracing::debug!(pending, "loading overlay released");
    }
}
