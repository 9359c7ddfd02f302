//! In-memory stand-ins for the browser host, shared by the test modules.

#![cfg(test)]

use crate::error::TrackerError;
use crate::site_time::SiteTime;
use crate::storage::SiteStore;
use crate::tab_data::{ActiveTabQuery, TabInfo};
use crate::tracker::{Browser, Clock};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// chrome.storage.local backed by a shared map
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Rc<RefCell<Option<SiteTime>>>,
    failing: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn with<'a>(entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let store = MemoryStore::default();
        *store.data.borrow_mut() = Some(entries.into_iter().collect());
        store
    }

    /// Every load and save fails
    pub fn failing() -> Self {
        let store = MemoryStore::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn snapshot(&self) -> SiteTime {
        self.data.borrow().clone().unwrap_or_default()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl SiteStore for MemoryStore {
    async fn load(&self) -> Result<SiteTime, TrackerError> {
        if self.failing.get() {
            return Err(TrackerError::Storage("quota exceeded".to_string()));
        }
        Ok(self.snapshot())
    }

    async fn save(&self, site_time: &SiteTime) -> Result<(), TrackerError> {
        if self.failing.get() {
            return Err(TrackerError::Storage("quota exceeded".to_string()));
        }
        *self.data.borrow_mut() = Some(site_time.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// chrome.tabs.query answering from a fixed table
#[derive(Clone, Default)]
pub struct FakeBrowser {
    active: Rc<RefCell<HashMap<ActiveTabQuery, TabInfo>>>,
}

impl FakeBrowser {
    /// `None` sets the active tab of the currently focused window
    pub fn set_active(&self, window_id: Option<i32>, tab: Option<TabInfo>) {
        let query = window_id.map_or(ActiveTabQuery::CurrentWindow, ActiveTabQuery::Window);
        let mut active = self.active.borrow_mut();
        match tab {
            Some(tab) => {
                active.insert(query, tab);
            }
            None => {
                active.remove(&query);
            }
        }
    }
}

impl Browser for FakeBrowser {
    async fn active_tab(&self, query: ActiveTabQuery) -> Result<Option<TabInfo>, TrackerError> {
        Ok(self.active.borrow().get(&query).cloned())
    }
}

/// Clock that only moves when told to
#[derive(Clone)]
pub struct ManualClock {
    now_ms: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn at(now_ms: f64) -> Self {
        ManualClock {
            now_ms: Rc::new(Cell::new(now_ms)),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}
