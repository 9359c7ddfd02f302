/// Background service worker: wires chrome events into the tracker

use crate::chrome::{ChromeStorage, ChromeTabs, SystemClock, attachTrackerHandler, createAlarm};
use crate::config::TrackerConfig;
use crate::dispatcher::Dispatcher;
use crate::events::ListenerPayload;
use crate::tracker::Tracker;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Attach the tracker to the worker's listener queue and create the alarm.
///
/// Listeners themselves are registered synchronously by background.js;
/// anything they buffered while the module loaded is handled first, in
/// arrival order. Session state starts as "no tab, now" and lives as long
/// as the worker.
pub fn start(config: TrackerConfig) {
    let tracker = Tracker::new(ChromeTabs, ChromeStorage::new(config.storage_key.clone()), SystemClock);
    let dispatcher = Dispatcher::new(tracker);

    let on_event = {
        let alarm_name = config.alarm_name.clone();
        Closure::wrap(Box::new(move |payload: JsValue| {
            let payload = match serde_wasm_bindgen::from_value::<ListenerPayload>(payload) {
                Ok(payload) => payload,
                Err(e) => {
                    log::warn!("Ignoring malformed listener payload: {}", e);
                    return;
                }
            };
            let Some(event) = payload.into_event(&alarm_name) else {
                return;
            };
            if let Some(drain) = dispatcher.dispatch(event) {
                spawn_local(drain);
            }
        }) as Box<dyn Fn(JsValue)>)
    };

    attachTrackerHandler(on_event.as_ref().unchecked_ref());
    createAlarm(&config.alarm_name, config.period_minutes);

    // The handler stays attached for the lifetime of the worker
    on_event.forget();

    log::info!(
        "Tracking active tab every {:.0}s into '{}'",
        config.period_secs(),
        config.storage_key
    );
}
