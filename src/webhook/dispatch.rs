//! Event dispatch with redelivery protection.
//!
//! Paystack redelivers events on timeout or non-2xx responses, so the same
//! event can arrive more than once. Dispatch is deduplicated on the
//! transaction reference plus event type before the sink runs.

use crate::webhook::event::{EventData, EventKind, WebhookEvent};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Upper bound on remembered idempotency keys. The in-process set is a
/// stand-in for the durable store behind `EventSink`; oldest keys are
/// evicted once the bound is reached so a long-lived receiver does not
/// accumulate one entry per event forever.
const PROCESSED_CAPACITY: usize = 10_000;

/// Downstream effect of a recognized event. This is the extension point
/// where the wallet/database update plugs in; the default sink only logs.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn charge_succeeded(&self, data: &EventData) -> anyhow::Result<()>;
    async fn charge_failed(&self, data: &EventData) -> anyhow::Result<()>;
}

/// Sink that records outcomes in the logs.
pub struct LoggingSink;

#[async_trait]
impl EventSink for LoggingSink {
    async fn charge_succeeded(&self, data: &EventData) -> anyhow::Result<()> {
        info!("Payment successful for {}", data.reference);
        Ok(())
    }

    async fn charge_failed(&self, data: &EventData) -> anyhow::Result<()> {
        info!("Payment failed for {}", data.reference);
        Ok(())
    }
}

/// Bounded set of claimed idempotency keys, insertion-ordered for eviction.
struct ProcessedKeys {
    keys: HashSet<String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl ProcessedKeys {
    fn new(capacity: usize) -> Self {
        Self {
            keys: HashSet::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Claim a key. Returns false if it is already held.
    fn claim(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }

        if self.keys.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.keys.remove(&oldest);
            }
        }

        self.keys.insert(key.to_string());
        self.order.push_back(key.to_string());
        true
    }

    fn release(&mut self, key: &str) {
        self.keys.remove(key);
        self.order.retain(|k| k != key);
    }
}

/// Routes verified events to the sink, at most once per idempotency key.
pub struct Dispatcher {
    sink: Arc<dyn EventSink>,
    processed: Mutex<ProcessedKeys>,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_capacity(sink, PROCESSED_CAPACITY)
    }

    pub fn with_capacity(sink: Arc<dyn EventSink>, capacity: usize) -> Self {
        Self {
            sink,
            processed: Mutex::new(ProcessedKeys::new(capacity)),
        }
    }

    /// Dispatch one event. The idempotency key is claimed under the lock
    /// before the sink runs, so a concurrent duplicate delivery is skipped
    /// rather than racing into the sink. Sink failures are logged and
    /// swallowed so the endpoint can still answer promptly; the claim is
    /// released on failure, leaving redelivery free to retry.
    pub async fn dispatch(&self, event: &WebhookEvent) {
        let kind = event.kind();
        if let EventKind::Other(name) = &kind {
            info!("Unhandled event type: {}", name);
            return;
        }

        // Events without a reference carry no usable idempotency key;
        // deduplicating them would collapse distinct payloads.
        let key = (!event.data.reference.is_empty()).then(|| event.idempotency_key());

        if let Some(key) = &key {
            if !self.processed.lock().await.claim(key) {
                info!("Duplicate delivery of {}, skipping", key);
                return;
            }
        }

        let result = match kind {
            EventKind::ChargeSuccess => self.sink.charge_succeeded(&event.data).await,
            EventKind::ChargeFailed => self.sink.charge_failed(&event.data).await,
            EventKind::Other(_) => unreachable!(),
        };

        if let Err(e) = result {
            let key_label = key.as_deref().unwrap_or(event.event.as_str());
            error!("Event sink failed for {}: {:#}", key_label, e);
            if let Some(key) = &key {
                self.processed.lock().await.release(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingSink {
        succeeded: AtomicUsize,
        failed: AtomicUsize,
        error_next: AtomicBool,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl EventSink for CountingSink {
        async fn charge_succeeded(&self, _data: &EventData) -> anyhow::Result<()> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.error_next.swap(false, Ordering::SeqCst) {
                anyhow::bail!("store unavailable");
            }
            self.succeeded.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn charge_failed(&self, _data: &EventData) -> anyhow::Result<()> {
            self.failed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn event(event_type: &str, reference: &str) -> WebhookEvent {
        serde_json::from_value(serde_json::json!({
            "event": event_type,
            "data": {"reference": reference}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_charge_success_dispatches_once() {
        let sink = Arc::new(CountingSink::default());
        let dispatcher = Dispatcher::new(sink.clone());

        dispatcher.dispatch(&event("charge.success", "ref_1")).await;
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_duplicate_delivery_is_skipped() {
        let sink = Arc::new(CountingSink::default());
        let dispatcher = Dispatcher::new(sink.clone());

        let e = event("charge.success", "ref_1");
        dispatcher.dispatch(&e).await;
        dispatcher.dispatch(&e).await;
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_deliveries_dispatch_once() {
        let sink = Arc::new(CountingSink {
            // Keep the first dispatch inside the sink long enough for the
            // second delivery to arrive while it is in flight.
            delay: Some(Duration::from_millis(50)),
            ..Default::default()
        });
        let dispatcher = Arc::new(Dispatcher::new(sink.clone()));

        let a = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher.dispatch(&event("charge.success", "ref_race")).await;
            })
        };
        let b = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                dispatcher.dispatch(&event("charge.success", "ref_race")).await;
            })
        };

        a.await.unwrap();
        b.await.unwrap();
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_same_reference_different_event_types_both_run() {
        let sink = Arc::new(CountingSink::default());
        let dispatcher = Dispatcher::new(sink.clone());

        dispatcher.dispatch(&event("charge.success", "ref_1")).await;
        dispatcher.dispatch(&event("charge.failed", "ref_1")).await;
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 1);
        assert_eq!(sink.failed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_events_without_reference_are_not_deduplicated() {
        let sink = Arc::new(CountingSink::default());
        let dispatcher = Dispatcher::new(sink.clone());

        let e = event("charge.success", "");
        dispatcher.dispatch(&e).await;
        dispatcher.dispatch(&e).await;
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unrecognized_event_does_not_reach_sink() {
        let sink = Arc::new(CountingSink::default());
        let dispatcher = Dispatcher::new(sink.clone());

        dispatcher.dispatch(&event("invoice.create", "ref_9")).await;
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 0);
        assert_eq!(sink.failed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sink_failure_allows_redelivery() {
        let sink = Arc::new(CountingSink::default());
        sink.error_next.store(true, Ordering::SeqCst);
        let dispatcher = Dispatcher::new(sink.clone());

        let e = event("charge.success", "ref_1");
        dispatcher.dispatch(&e).await;
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 0);

        // Redelivery after the failure goes through.
        dispatcher.dispatch(&e).await;
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_processed_keys_are_bounded() {
        let sink = Arc::new(CountingSink::default());
        let dispatcher = Dispatcher::with_capacity(sink.clone(), 1);

        dispatcher.dispatch(&event("charge.success", "ref_1")).await;
        // ref_2 evicts ref_1 from the bounded set.
        dispatcher.dispatch(&event("charge.success", "ref_2")).await;
        dispatcher.dispatch(&event("charge.success", "ref_1")).await;
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 3);

        // The newest key is still deduplicated.
        dispatcher.dispatch(&event("charge.success", "ref_1")).await;
        assert_eq!(sink.succeeded.load(Ordering::SeqCst), 3);
    }
}
