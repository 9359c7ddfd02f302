/// Typed tracker events, decoded from the browser's listener callbacks
use crate::tab_data::{ActiveInfo, AlarmInfo, ChangeInfo, TabInfo};
use serde::Deserialize;

/// chrome.windows.WINDOW_ID_NONE
pub const WINDOW_ID_NONE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFocus {
    NoWindow,
    Window(i32),
}

impl From<i32> for WindowFocus {
    fn from(window_id: i32) -> Self {
        if window_id == WINDOW_ID_NONE {
            WindowFocus::NoWindow
        } else {
            WindowFocus::Window(window_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    PeriodicTick,
    TabActivated { tab_id: i32 },
    TabUpdated { tab_id: i32, new_url: String },
    WindowFocusChanged(WindowFocus),
}

impl TrackerEvent {
    /// Only the sampling alarm drives the tracker
    pub fn from_alarm(alarm: &AlarmInfo, alarm_name: &str) -> Option<Self> {
        (alarm.name == alarm_name).then_some(TrackerEvent::PeriodicTick)
    }

    pub fn from_activated(info: &ActiveInfo) -> Self {
        TrackerEvent::TabActivated { tab_id: info.tab_id }
    }

    /// In-tab navigation of the active tab; other updates (title, loading
    /// status, background tabs) are not interesting.
    pub fn from_updated(tab_id: i32, change: &ChangeInfo, tab: &TabInfo) -> Option<Self> {
        if !tab.active {
            return None;
        }
        change.url.as_ref().map(|url| TrackerEvent::TabUpdated {
            tab_id,
            new_url: url.clone(),
        })
    }

    pub fn from_focus_changed(window_id: i32) -> Self {
        TrackerEvent::WindowFocusChanged(window_id.into())
    }
}

/// Raw listener callback, as buffered by the service worker script
///
/// The worker registers its chrome.* listeners before the wasm module is
/// loaded and queues these until the tracker is attached, so the event that
/// woke the worker is replayed rather than lost.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ListenerPayload {
    Alarm {
        alarm: AlarmInfo,
    },
    Activated {
        info: ActiveInfo,
    },
    #[serde(rename_all = "camelCase")]
    Updated {
        tab_id: i32,
        #[serde(default)]
        change_info: ChangeInfo,
        tab: TabInfo,
    },
    #[serde(rename_all = "camelCase")]
    FocusChanged {
        window_id: i32,
    },
}

impl ListenerPayload {
    pub fn into_event(self, alarm_name: &str) -> Option<TrackerEvent> {
        match self {
            ListenerPayload::Alarm { alarm } => TrackerEvent::from_alarm(&alarm, alarm_name),
            ListenerPayload::Activated { info } => Some(TrackerEvent::from_activated(&info)),
            ListenerPayload::Updated { tab_id, change_info, tab } => {
                TrackerEvent::from_updated(tab_id, &change_info, &tab)
            }
            ListenerPayload::FocusChanged { window_id } => {
                Some(TrackerEvent::from_focus_changed(window_id))
            }
        }
    }
}
