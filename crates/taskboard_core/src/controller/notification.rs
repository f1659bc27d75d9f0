//! Transient notifications and the persistent error banner.
//!
//! # Invariants
//! - At most one notification is visible; showing a new one replaces it.
//! - Dismissing a notification that was already replaced or dismissed is a
//!   no-op, so a late auto-dismiss timer can never remove its successor.

use log::debug;
use std::time::{Duration, Instant};

/// Styling/severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Identifier handed to the host so its timer can dismiss the right toast.
pub type NotificationId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Single-slot notification holder with auto-dismiss deadlines.
#[derive(Debug)]
pub struct NotificationCenter {
    ttl: Duration,
    current: Option<Notification>,
    next_id: NotificationId,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: None,
            next_id: 1,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Shows `message`, replacing whatever is visible.
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        self.show_at(kind, message, Instant::now())
    }

    /// Same as [`NotificationCenter::show`] with an explicit clock.
    pub fn show_at(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;
        if let Some(previous) = self.current.take() {
            debug!(
                "event=notification_replace module=controller replaced_id={} id={}",
                previous.id, id
            );
        }
        self.current = Some(Notification {
            id,
            kind,
            message: message.into(),
            expires_at: now + self.ttl,
        });
        id
    }

    /// Current notification, expired or not.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Current notification if it is still within its TTL at `now`.
    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| !notification.is_expired_at(now))
    }

    /// Dismisses `id` if it is still the visible notification.
    ///
    /// Returns whether anything was removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match &self.current {
            Some(notification) if notification.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the current notification once its deadline has passed.
    pub fn dismiss_expired_at(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(notification) if notification.is_expired_at(now) => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss_expired(&mut self) -> bool {
        self.dismiss_expired_at(Instant::now())
    }
}

/// Dismissible inline banner for initialization and storage failures.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    message: Option<String>,
}

impl ErrorBanner {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn hide(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorBanner, NotificationCenter, NotificationKind};
    use std::time::{Duration, Instant};

    #[test]
    fn new_notification_replaces_current() {
        let mut center = NotificationCenter::new(Duration::from_secs(3));
        let now = Instant::now();
        let first = center.show_at(NotificationKind::Success, "one", now);
        let second = center.show_at(NotificationKind::Error, "two", now);

        let current = center.current().expect("notification visible");
        assert_eq!(current.id, second);
        assert_eq!(current.message, "two");

        assert!(!center.dismiss(first), "stale dismiss must be a no-op");
        assert_eq!(center.current().map(|n| n.id), Some(second));
        assert!(center.dismiss(second));
        assert!(center.current().is_none());
        assert!(!center.dismiss(second));
    }

    #[test]
    fn expires_after_ttl() {
        let mut center = NotificationCenter::new(Duration::from_secs(3));
        let now = Instant::now();
        center.show_at(NotificationKind::Info, "hello", now);

        assert!(center
            .visible_at(now + Duration::from_millis(2_999))
            .is_some());
        assert!(center.visible_at(now + Duration::from_secs(3)).is_none());
        assert!(!center.dismiss_expired_at(now + Duration::from_secs(1)));
        assert!(center.dismiss_expired_at(now + Duration::from_secs(3)));
        assert!(center.current().is_none());
    }

    #[test]
    fn banner_show_and_hide() {
        let mut banner = ErrorBanner::default();
        assert!(!banner.is_visible());
        banner.show("Failed to save tasks");
        assert_eq!(banner.message(), Some("Failed to save tasks"));
        banner.hide();
        assert!(banner.message().is_none());
    }
}
