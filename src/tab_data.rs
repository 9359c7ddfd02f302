/// Data structures for browser tabs and event payloads
use serde::{Deserialize, Serialize};

/// Snapshot of a browser tab, as handed over by chrome.tabs
///
/// `url` is absent for tabs the extension may not inspect or that have not
/// committed a navigation yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl TabInfo {
    pub fn new(id: i32, url: Option<String>) -> TabInfo {
        TabInfo {
            id,
            url,
            active: true,
        }
    }
}

/// Payload of chrome.tabs.onActivated
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveInfo {
    pub tab_id: i32,
}

/// Changed fields reported by chrome.tabs.onUpdated
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeInfo {
    #[serde(default)]
    pub url: Option<String>,
}

/// Payload of chrome.alarms.onAlarm
#[derive(Debug, Clone, Deserialize)]
pub struct AlarmInfo {
    pub name: String,
}

/// Which window to ask for its active tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveTabQuery {
    CurrentWindow,
    Window(i32),
}
