/// Serial event dispatch for the tracker
///
/// Browser listeners fire independently, but every handler awaits storage.
/// Events are queued and handled one at a time so that no two
/// read-modify-write cycles on the accumulator map overlap.

use crate::events::TrackerEvent;
use crate::storage::SiteStore;
use crate::tracker::{Browser, Clock, SessionState, Tracker};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

struct DispatchState<B, S, C> {
    queue: VecDeque<TrackerEvent>,
    // None while a drain loop owns the tracker
    idle_tracker: Option<Tracker<B, S, C>>,
}

pub struct Dispatcher<B, S, C> {
    state: Rc<RefCell<DispatchState<B, S, C>>>,
}

impl<B, S, C> Clone for Dispatcher<B, S, C> {
    fn clone(&self) -> Self {
        Dispatcher {
            state: Rc::clone(&self.state),
        }
    }
}

impl<B: Browser, S: SiteStore, C: Clock> Dispatcher<B, S, C> {
    pub fn new(tracker: Tracker<B, S, C>) -> Self {
        Dispatcher {
            state: Rc::new(RefCell::new(DispatchState {
                queue: VecDeque::new(),
                idle_tracker: Some(tracker),
            })),
        }
    }

    /// Queue an event.
    ///
    /// Returns a drain future when nothing is currently draining the queue.
    /// The caller must drive it to completion (`spawn_local` in the browser);
    /// it handles this event and everything queued behind it, then hands the
    /// tracker back.
    #[must_use = "the returned drain must be spawned or awaited"]
    pub fn dispatch(&self, event: TrackerEvent) -> Option<impl Future<Output = ()> + use<B, S, C>> {
        let mut state = self.state.borrow_mut();
        state.queue.push_back(event);

        state
            .idle_tracker
            .take()
            .map(|tracker| drain(Rc::clone(&self.state), tracker))
    }

    /// Session state, if no drain is in flight
    pub fn session(&self) -> Option<SessionState> {
        self.state
            .borrow()
            .idle_tracker
            .as_ref()
            .map(|tracker| tracker.session().clone())
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }
}

async fn drain<B: Browser, S: SiteStore, C: Clock>(
    state: Rc<RefCell<DispatchState<B, S, C>>>,
    mut tracker: Tracker<B, S, C>,
) {
    loop {
        let next = state.borrow_mut().queue.pop_front();
        let Some(event) = next else {
            state.borrow_mut().idle_tracker = Some(tracker);
            return;
        };

        log::trace!("Handling {:?}", event);
        if let Err(e) = tracker.handle(event.clone()).await {
            log::warn!("Failed to handle {:?}: {}", event, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WindowFocus;
    use crate::tab_data::TabInfo;
    use crate::test_utils::{FakeBrowser, ManualClock, MemoryStore};

    fn setup() -> (Dispatcher<FakeBrowser, MemoryStore, ManualClock>, FakeBrowser, MemoryStore, ManualClock) {
        let browser = FakeBrowser::default();
        let store = MemoryStore::default();
        let clock = ManualClock::at(0.0);
        let tracker = Tracker::new(browser.clone(), store.clone(), clock.clone());
        (Dispatcher::new(tracker), browser, store, clock)
    }

    #[tokio::test]
    async fn test_first_dispatch_starts_drain() {
        let (dispatcher, _, _, _) = setup();

        let drain = dispatcher.dispatch(TrackerEvent::TabActivated { tab_id: 3 });
        assert!(drain.is_some());
        assert_eq!(dispatcher.session(), None);

        drain.unwrap().await;

        assert_eq!(dispatcher.pending(), 0);
        assert_eq!(dispatcher.session().unwrap().current_tab_id, Some(3));
    }

    #[tokio::test]
    async fn test_events_queue_behind_running_drain() {
        let (dispatcher, browser, store, _) = setup();
        browser.set_active(None, Some(TabInfo::new(1, Some("https://a.com/".into()))));

        let drain = dispatcher.dispatch(TrackerEvent::PeriodicTick).unwrap();
        assert!(dispatcher.dispatch(TrackerEvent::PeriodicTick).is_none());
        assert!(
            dispatcher
                .dispatch(TrackerEvent::TabUpdated {
                    tab_id: 1,
                    new_url: "https://b.com/".to_string(),
                })
                .is_none()
        );
        assert_eq!(dispatcher.pending(), 3);

        drain.await;

        // Both flushes landed: no lost update between the two writes
        assert_eq!(store.writes(), 2);
        assert_eq!(store.snapshot().get("a.com"), Some(0.0));
        assert_eq!(store.snapshot().get("b.com"), Some(0.0));
        assert_eq!(dispatcher.pending(), 0);
    }

    #[tokio::test]
    async fn test_events_handled_in_arrival_order() {
        let (dispatcher, _, _, _) = setup();

        let drain = dispatcher.dispatch(TrackerEvent::TabActivated { tab_id: 1 }).unwrap();
        let _ = dispatcher.dispatch(TrackerEvent::WindowFocusChanged(WindowFocus::NoWindow));
        let _ = dispatcher.dispatch(TrackerEvent::TabActivated { tab_id: 2 });
        drain.await;

        assert_eq!(dispatcher.session().unwrap().current_tab_id, Some(2));
    }

    #[tokio::test]
    async fn test_handler_error_does_not_stall_queue() {
        let browser = FakeBrowser::default();
        let clock = ManualClock::at(0.0);
        let tracker = Tracker::new(browser.clone(), MemoryStore::failing(), clock.clone());
        let dispatcher = Dispatcher::new(tracker);

        let drain = dispatcher
            .dispatch(TrackerEvent::TabUpdated {
                tab_id: 1,
                new_url: "https://a.com/".to_string(),
            })
            .unwrap();
        let _ = dispatcher.dispatch(TrackerEvent::TabActivated { tab_id: 7 });
        drain.await;

        assert_eq!(dispatcher.session().unwrap().current_tab_id, Some(7));
        assert!(dispatcher.dispatch(TrackerEvent::PeriodicTick).is_some());
    }
}
