//! The broadcast hub: subscriber registry and serialized event fan-out.
//!
//! Producers (REST handlers, subscriber read loops) never write to
//! sockets themselves. They enqueue a [`HubEvent`] and a single consumer
//! task ([`run_hub`]) drains the queue, serializes each event once, and
//! fans the payload out to every active subscriber. Because there is
//! exactly one consumer, every subscriber observes events in the same
//! relative order they were enqueued.
//!
//! A subscriber is a per-connection [`mpsc`] sender; the WebSocket task
//! on the other end forwards payloads to the socket. A failed send means
//! that task is gone, so the subscriber is dropped from the registry on
//! the spot and the broadcast continues for the rest. The registry has
//! its own lock, deliberately distinct from the store's.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rumbo_store::Store;
use rumbo_types::{PushMessage, Report};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};
use uuid::Uuid;

/// A broadcast request enqueued for the hub's consumer task.
#[derive(Debug)]
pub enum HubEvent {
    /// Push current stats to every subscriber.
    Stats,
    /// Push a freshly created report (plus the recent list), followed by
    /// updated stats.
    NewReport(Report),
}

/// Fan-out component delivering events to live subscribers.
pub struct Hub {
    store: Arc<Store>,
    events: mpsc::UnboundedSender<HubEvent>,
    subscribers: Mutex<HashMap<Uuid, mpsc::UnboundedSender<String>>>,
}

impl Hub {
    /// Create a hub and the receiving end of its event queue.
    ///
    /// The caller must spawn [`run_hub`] with the returned receiver;
    /// until then, enqueued events simply accumulate.
    pub fn new(store: Arc<Store>) -> (Arc<Self>, mpsc::UnboundedReceiver<HubEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let hub = Arc::new(Self {
            store,
            events,
            subscribers: Mutex::new(HashMap::new()),
        });
        (hub, rx)
    }

    /// Register a new subscriber and send it the initial snapshot
    /// (current stats plus recent reports) so late joiners are consistent
    /// without waiting for the next event.
    pub async fn add_subscriber(&self, id: Uuid, tx: mpsc::UnboundedSender<String>) {
        let stats = self.store.stats().await;
        let reports = self.store.recent_reports().await;
        let snapshot = PushMessage::snapshot(stats, reports);

        let count = {
            let mut subscribers = self.lock_subscribers();
            subscribers.insert(id, tx.clone());
            subscribers.len()
        };
        debug!(subscriber = %id, total = count, "subscriber connected");

        match serde_json::to_string(&snapshot) {
            Ok(payload) => {
                if tx.send(payload).is_err() {
                    warn!(subscriber = %id, "initial snapshot delivery failed");
                    self.remove_subscriber(id);
                }
            }
            Err(e) => warn!("failed to serialize initial snapshot: {e}"),
        }
    }

    /// Unregister a subscriber. Removing an absent id is a no-op.
    pub fn remove_subscriber(&self, id: Uuid) {
        let (removed, remaining) = {
            let mut subscribers = self.lock_subscribers();
            (subscribers.remove(&id).is_some(), subscribers.len())
        };
        if removed {
            debug!(subscriber = %id, total = remaining, "subscriber disconnected");
        }
    }

    /// Number of currently active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.lock_subscribers().len()
    }

    /// Enqueue a stats broadcast.
    pub fn broadcast_stats(&self) {
        self.enqueue(HubEvent::Stats);
    }

    /// Enqueue a new-report broadcast. The consumer delivers the report
    /// event and then immediately a stats event, so the changed report
    /// count reaches subscribers without a second round trip.
    pub fn broadcast_new_report(&self, report: Report) {
        self.enqueue(HubEvent::NewReport(report));
    }

    fn enqueue(&self, event: HubEvent) {
        if self.events.send(event).is_err() {
            // Only possible once the consumer task has stopped, i.e.
            // during shutdown.
            warn!("hub consumer is gone; dropping broadcast event");
        }
    }

    /// Deliver one queued event to all active subscribers.
    async fn deliver(&self, event: HubEvent) {
        match event {
            HubEvent::Stats => {
                let stats = self.store.stats().await;
                self.fan_out(&PushMessage::stats(stats)).await;
            }
            HubEvent::NewReport(report) => {
                let reports = self.store.recent_reports().await;
                self.fan_out(&PushMessage::NewReport { report, reports }).await;

                let stats = self.store.stats().await;
                self.fan_out(&PushMessage::stats(stats)).await;
            }
        }
    }

    /// Serialize a message once and send it to every subscriber.
    ///
    /// A failed send drops only that subscriber; delivery continues for
    /// the rest.
    async fn fan_out(&self, message: &PushMessage) {
        let payload = match serde_json::to_string(message) {
            Ok(p) => p,
            Err(e) => {
                warn!("failed to serialize broadcast message: {e}");
                return;
            }
        };

        let targets: Vec<(Uuid, mpsc::UnboundedSender<String>)> = self
            .lock_subscribers()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        for (id, tx) in targets {
            if tx.send(payload.clone()).is_err() {
                warn!(subscriber = %id, "delivery failed; dropping subscriber");
                self.remove_subscriber(id);
            }
        }
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, HashMap<Uuid, mpsc::UnboundedSender<String>>> {
        // A poisoned registry lock means a panic while holding it; the
        // map itself is still structurally sound, so keep serving.
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drain the hub's event queue until the shutdown signal flips or every
/// producer handle is dropped.
pub async fn run_hub(
    hub: Arc<Hub>,
    mut events: mpsc::UnboundedReceiver<HubEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(event) => hub.deliver(event).await,
                    None => return,
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("hub consumer shutting down");
                    return;
                }
            }
        }
    }
}
