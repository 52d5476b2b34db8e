//! Timed error banner.
//!
//! A new set of messages is `Visible` for one second, `Fading` for the next,
//! then `Cleared`. The banner holds no timers; callers poll [`ErrorBanner::phase`]
//! and the injected clock decides where on the timeline it sits.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;

const VISIBLE_FOR_MS: i64 = 1_000;
const CLEARED_AFTER_MS: i64 = 2_000;

/// Where the banner is on its reveal timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    /// Messages are fully shown.
    Visible,
    /// Messages are still shown while fading out.
    Fading,
    /// Nothing to show.
    Cleared,
}

/// Transient error messages with a two-stage reveal.
pub struct ErrorBanner {
    clock: Arc<dyn Clock>,
    messages: Vec<String>,
    shown_at: Option<DateTime<Utc>>,
}

impl ErrorBanner {
    /// Empty banner driven by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            messages: Vec::new(),
            shown_at: None,
        }
    }

    /// Show `messages`, restarting the timeline. An empty list clears.
    pub fn show(&mut self, messages: Vec<String>) {
        if messages.is_empty() {
            self.clear();
            return;
        }
        self.messages = messages;
        self.shown_at = Some(self.clock.utc());
    }

    /// Drop any messages immediately.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.shown_at = None;
    }

    /// Current phase according to the clock.
    #[must_use]
    pub fn phase(&self) -> BannerPhase {
        let Some(shown_at) = self.shown_at else {
            return BannerPhase::Cleared;
        };
        let elapsed = (self.clock.utc() - shown_at).num_milliseconds();
        if elapsed < VISIBLE_FOR_MS {
            BannerPhase::Visible
        } else if elapsed < CLEARED_AFTER_MS {
            BannerPhase::Fading
        } else {
            BannerPhase::Cleared
        }
    }

    /// Messages to render; empty once the banner has cleared.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        match self.phase() {
            BannerPhase::Cleared => &[],
            BannerPhase::Visible | BannerPhase::Fading => self.messages.as_slice(),
        }
    }
}

impl std::fmt::Debug for ErrorBanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorBanner")
            .field("messages", &self.messages)
            .field("shown_at", &self.shown_at)
            .finish_non_exhaustive()
    }
}
