use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::models::notification::{BannerPhase, Notification, NotificationKind};
use crate::models::settings::DashboardConfig;

/// Single-slot notification banner.
///
/// - Showing a banner replaces whatever banner is on screen (no stacking).
/// - After `display` the banner enters its exit animation; after `exit` it is
///   removed. The host drives time by calling [`tick`](Self::tick).
/// - [`dismiss`](Self::dismiss) is idempotent: dismissing an unknown or
///   already-removed banner is a no-op.
///
/// Cloning shares the slot, so the service client and the dashboard facade
/// post into the same banner.
#[derive(Debug, Clone)]
pub struct NotificationPresenter {
    slot: Arc<Mutex<Option<ActiveBanner>>>,
    display: Duration,
    exit: Duration,
}

#[derive(Debug)]
struct ActiveBanner {
    notification: Notification,
    shown_at: Instant,
    exit_started: Option<Instant>,
}

impl NotificationPresenter {
    pub fn new(display: Duration, exit: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            display,
            exit,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.notification_duration(), config.exit_animation())
    }

    /// Show a banner, removing any existing one first. Returns its id.
    pub fn show(&self, kind: NotificationKind, message: impl Into<String>) -> Uuid {
        let notification = Notification::new(kind, message);
        let id = notification.id;
        match kind {
            NotificationKind::Error => tracing::error!(%id, message = %notification.message, "notification"),
            NotificationKind::Warning => tracing::warn!(%id, message = %notification.message, "notification"),
            _ => tracing::info!(%id, message = %notification.message, "notification"),
        }
        *self.slot.lock() = Some(ActiveBanner {
            notification,
            shown_at: Instant::now(),
            exit_started: None,
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.show(NotificationKind::Success, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.show(NotificationKind::Info, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.show(NotificationKind::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.show(NotificationKind::Error, message)
    }

    /// The banner currently on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.slot.lock().as_ref().map(|b| b.notification.clone())
    }

    /// Remove the banner with `id` if it is still on screen.
    /// Returns `true` if a banner was removed.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut slot = self.slot.lock();
        if slot.as_ref().is_some_and(|b| b.notification.id == id) {
            *slot = None;
            tracing::debug!(%id, "notification dismissed");
            true
        } else {
            false
        }
    }

    /// Advance the auto-dismiss timeline to `now`.
    /// Returns `true` if the banner changed phase or was removed.
    pub fn tick(&self, now: Instant) -> bool {
        let mut slot = self.slot.lock();
        let Some(banner) = slot.as_mut() else {
            return false;
        };

        match banner.exit_started {
            None if now.saturating_duration_since(banner.shown_at) >= self.display => {
                banner.exit_started = Some(now);
                banner.notification.phase = BannerPhase::Exiting;
                true
            }
            Some(started) if now.saturating_duration_since(started) >= self.exit => {
                tracing::debug!(id = %banner.notification.id, "notification expired");
                *slot = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for NotificationPresenter {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}
