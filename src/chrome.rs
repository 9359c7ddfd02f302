/// chrome.* host bindings for the tracker and popup

use crate::error::TrackerError;
use crate::site_time::SiteTime;
use crate::storage::SiteStore;
use crate::tab_data::{ActiveTabQuery, TabInfo};
use crate::tracker::{Browser, Clock};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryActiveTab(window_id: Option<i32>) -> Result<JsValue, JsValue>;

    pub(crate) fn createAlarm(name: &str, period_in_minutes: f64);

    pub(crate) fn attachTrackerHandler(on_event: &js_sys::Function);
}

/// Accumulator map in chrome.storage.local
#[derive(Debug, Clone)]
pub struct ChromeStorage {
    key: String,
}

impl ChromeStorage {
    pub fn new(key: impl Into<String>) -> Self {
        ChromeStorage { key: key.into() }
    }
}

impl SiteStore for ChromeStorage {
    async fn load(&self) -> Result<SiteTime, TrackerError> {
        let value = getStorage(&self.key)
            .await
            .map_err(|e| TrackerError::Storage(format!("{:?}", e)))?;

        if value.is_null() || value.is_undefined() {
            return Ok(SiteTime::new());
        }

        serde_wasm_bindgen::from_value(value).map_err(|e| TrackerError::Decode {
            what: "site time",
            reason: e.to_string(),
        })
    }

    async fn save(&self, site_time: &SiteTime) -> Result<(), TrackerError> {
        // Plain object rather than a JS Map, so storage holds {host: seconds}
        let value = site_time
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| TrackerError::Storage(format!("Failed to serialize: {}", e)))?;

        setStorage(&self.key, value)
            .await
            .map_err(|e| TrackerError::Storage(format!("{:?}", e)))
    }
}

/// chrome.tabs.query for the active tab
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTabs;

impl Browser for ChromeTabs {
    async fn active_tab(&self, query: ActiveTabQuery) -> Result<Option<TabInfo>, TrackerError> {
        let window_id = match query {
            ActiveTabQuery::CurrentWindow => None,
            ActiveTabQuery::Window(id) => Some(id),
        };

        let value = queryActiveTab(window_id)
            .await
            .map_err(|e| TrackerError::Browser(format!("{:?}", e)))?;

        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value)
            .map(Some)
            .map_err(|e| TrackerError::Decode {
                what: "tab",
                reason: e.to_string(),
            })
    }
}

/// Date.now()
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
