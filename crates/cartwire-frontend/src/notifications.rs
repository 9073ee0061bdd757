//! Transient banners shown over the page.
//!
//! Every banner lives for exactly [`DISPLAY_DURATION`]. Banners are
//! independent: they stack without deduplication and cannot be dismissed
//! early.

use std::time::Duration;

use cartwire_bridge::notification::NotificationType;
use tokio::time::Instant;

/// How long a banner stays on the page.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);

const BANNER_CLASSES: &str = "fixed top-4 right-4 p-4 rounded-lg shadow-lg";

/// Identity of a banner for as long as it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BannerId(u64);

#[derive(Debug, Clone)]
pub struct Banner {
    pub id: BannerId,
    pub message: String,
    pub severity: NotificationType,
    pub expires_at: Instant,
}

impl Banner {
    /// Presentation classes for this banner.
    pub fn class_name(&self) -> String {
        let background = match self.severity {
            NotificationType::Success => "bg-green-500",
            NotificationType::Error => "bg-red-500",
        };
        format!("{BANNER_CLASSES} {background} text-white")
    }
}

/// The overlay holding every banner currently on screen.
#[derive(Debug, Default)]
pub struct NotificationLayer {
    next_id: u64,
    banners: Vec<Banner>,
}

impl NotificationLayer {
    /// Displays a banner from `now` until `now + DISPLAY_DURATION`.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: NotificationType,
        now: Instant,
    ) -> BannerId {
        let id = BannerId(self.next_id);
        self.next_id += 1;
        self.banners.push(Banner {
            id,
            message: message.into(),
            severity,
            expires_at: now + DISPLAY_DURATION,
        });
        id
    }

    /// Removes every banner whose display window has ended by `now`.
    /// Returns how many were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.banners.len();
        self.banners.retain(|banner| banner.expires_at > now);
        before - self.banners.len()
    }

    /// When the next banner is due to disappear.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.banners.iter().map(|banner| banner.expires_at).min()
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}
