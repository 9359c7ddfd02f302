/// Active-tab time tracking
///
/// Attributes wall-clock time to the hostname of the active tab. Elapsed
/// intervals are flushed into the accumulator map on the periodic sample and
/// on in-tab navigation; activation and focus changes only restart the
/// measurement interval.

use crate::error::TrackerError;
use crate::events::{TrackerEvent, WindowFocus};
use crate::hostname::hostname_of;
use crate::storage::{SiteStore, accumulate_site_time};
use crate::tab_data::{ActiveTabQuery, TabInfo};

/// Host capability: look up the active tab of a window
#[allow(async_fn_in_trait)]
pub trait Browser {
    async fn active_tab(&self, query: ActiveTabQuery) -> Result<Option<TabInfo>, TrackerError>;
}

/// Milliseconds since the epoch
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// In-memory tracking state, reinitialised on every cold start
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub current_tab_id: Option<i32>,
    pub start_time_ms: f64,
}

impl SessionState {
    pub fn new(now_ms: f64) -> Self {
        SessionState {
            current_tab_id: None,
            start_time_ms: now_ms,
        }
    }

    /// Seconds since the interval started
    fn elapsed_secs(&self, now_ms: f64) -> f64 {
        (now_ms - self.start_time_ms) / 1000.0
    }

    fn restart(&mut self, tab_id: Option<i32>, now_ms: f64) {
        self.current_tab_id = tab_id;
        self.start_time_ms = now_ms;
    }
}

pub struct Tracker<B, S, C> {
    browser: B,
    store: S,
    clock: C,
    session: SessionState,
}

impl<B: Browser, S: SiteStore, C: Clock> Tracker<B, S, C> {
    pub fn new(browser: B, store: S, clock: C) -> Self {
        let session = SessionState::new(clock.now_ms());
        Tracker {
            browser,
            store,
            clock,
            session,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn handle(&mut self, event: TrackerEvent) -> Result<(), TrackerError> {
        match event {
            TrackerEvent::PeriodicTick => self.on_periodic_tick().await,
            TrackerEvent::TabActivated { tab_id } => {
                self.on_tab_activated(tab_id);
                Ok(())
            }
            TrackerEvent::TabUpdated { tab_id, new_url } => {
                self.on_tab_updated(tab_id, &new_url).await
            }
            TrackerEvent::WindowFocusChanged(focus) => self.on_window_focus_changed(focus).await,
        }
    }

    /// Sample the active tab of the focused window.
    ///
    /// Time is only credited when the same tab was current at the previous
    /// sample. Tabs without a usable URL are skipped without touching state.
    pub async fn on_periodic_tick(&mut self) -> Result<(), TrackerError> {
        let Some(tab) = self.browser.active_tab(ActiveTabQuery::CurrentWindow).await? else {
            return Ok(());
        };
        let Some(hostname) = tab.url.as_deref().and_then(hostname_of) else {
            return Ok(());
        };

        let now = self.clock.now_ms();
        let flushed = if self.session.current_tab_id == Some(tab.id) {
            let time_spent = self.session.elapsed_secs(now);
            accumulate_site_time(&self.store, &hostname, time_spent).await.map(|_| ())
        } else {
            Ok(())
        };

        // Restart even if the write failed; a lost interval is not retried
        self.session.restart(Some(tab.id), now);
        flushed
    }

    /// Switching tabs restarts the interval. The time since the last flush
    /// is dropped rather than credited to the tab being left.
    pub fn on_tab_activated(&mut self, tab_id: i32) {
        let now = self.clock.now_ms();
        self.session.restart(Some(tab_id), now);
    }

    /// Navigation inside the active tab flushes the elapsed interval to the
    /// hostname being navigated to, not the one being left.
    pub async fn on_tab_updated(&mut self, tab_id: i32, new_url: &str) -> Result<(), TrackerError> {
        let Some(hostname) = hostname_of(new_url) else {
            return Ok(());
        };

        let now = self.clock.now_ms();
        let time_spent = self.session.elapsed_secs(now);
        let flushed = accumulate_site_time(&self.store, &hostname, time_spent).await;

        self.session.restart(Some(tab_id), now);
        flushed.map(|_| ())
    }

    /// Losing focus stops attribution; gaining it picks up the window's
    /// active tab. The interval restarts either way.
    pub async fn on_window_focus_changed(&mut self, focus: WindowFocus) -> Result<(), TrackerError> {
        let now = self.clock.now_ms();
        self.session.start_time_ms = now;

        match focus {
            WindowFocus::NoWindow => {
                self.session.current_tab_id = None;
            }
            WindowFocus::Window(window_id) => {
                if let Some(tab) = self.browser.active_tab(ActiveTabQuery::Window(window_id)).await? {
                    self.session.current_tab_id = Some(tab.id);
                }
            }
        }
        Ok(())
    }
}
