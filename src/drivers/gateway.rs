use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, PoisonError};
use crate::drivers::buffer::Sample;
use crate::drivers::pipeline::{lock, SharedState};
use crate::drivers::source::{numeric_value, TelemetryMessage};
use crate::drivers::TelemetryError;
/// Events buffered per subscriber; a slow reader misses newer events past this.
pub const SUBSCRIBER_CAPACITY: usize = 1024;
/// Outcome of one ingested reading, published to subscribers.
#[derive(Clone, Debug, PartialEq)]
pub enum IngestEvent {
    Accepted(Sample),
    Rejected(TelemetryError),
}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub accepted: u64,
    pub dropped: u64,
}
/// Entry point for the network side. Every reading is handled on its own:
/// a bad one is dropped and reported, and the next one proceeds normally.
#[derive(Clone)]
pub struct IngestionGateway {
    state: SharedState,
    subscribers: Arc<Mutex<Vec<SyncSender<IngestEvent>>>>,
    accepted: Arc<AtomicU64>,
    dropped: Arc<AtomicU64>,
}
impl IngestionGateway {
    pub(crate) fn new(state: SharedState) -> Self {
        Self {
            state,
            subscribers: Arc::new(Mutex::new(Vec::new())),
            accepted: Arc::new(AtomicU64::new(0)),
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }
    pub fn on_sample_received(&self, channel: usize, value: f64) -> Result<Sample, TelemetryError> {
        let result = if value.is_finite() {
            self.append(channel, value)
        } else {
            Err(TelemetryError::MalformedSample {
                channel,
                raw: value.to_string(),
            })
        };
        self.record(result)
    }
    /// Feeds a decoded server message; returns how many readings were accepted.
    pub fn on_message(&self, message: &TelemetryMessage) -> usize {
        match message {
            TelemetryMessage::Sample { channel, value } => {
                let result = numeric_value(*channel, value).and_then(|v| self.append(*channel, v));
                usize::from(self.record(result).is_ok())
            }
            TelemetryMessage::Frame { values } => values
                .iter()
                .enumerate()
                .map(|(channel, raw)| {
                    let result = numeric_value(channel, raw).and_then(|v| self.append(channel, v));
                    self.record(result)
                })
                .filter(Result::is_ok)
                .count(),
        }
    }
    /// Registers a listener for ingest outcomes. Dropping the receiver unsubscribes.
    /// At most [`SUBSCRIBER_CAPACITY`] events wait unread; later ones are not queued
    /// for that listener until it catches up.
    pub fn subscribe(&self) -> Receiver<IngestEvent> {
        let (tx, rx) = sync_channel(SUBSCRIBER_CAPACITY);
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }
    pub fn stats(&self) -> IngestStats {
        IngestStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
    fn append(&self, channel: usize, value: f64) -> Result<Sample, TelemetryError> {
        let mut state = lock(&self.state);
        // Inactive channels still buffer; only slots that were never allocated are rejected.
        let allocated = state.registry.allocated_count();
        if channel >= allocated {
            return Err(TelemetryError::InvalidChannel {
                index: channel,
                allocated,
            });
        }
        state.store.append(channel, value)
    }
    fn record(&self, result: Result<Sample, TelemetryError>) -> Result<Sample, TelemetryError> {
        let event = match &result {
            Ok(sample) => {
                self.accepted.fetch_add(1, Ordering::Relaxed);
                IngestEvent::Accepted(*sample)
            }
            Err(err) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                log::warn!("dropped sample: {err}");
                IngestEvent::Rejected(err.clone())
            }
        };
        self.publish(event);
        result
    }
    fn publish(&self, event: IngestEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        });
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::pipeline::Session;
    use crate::types::Profile;
    use serde_json::json;
    #[test]
    fn invalid_channel_is_dropped_and_stream_continues() {
        let session = Session::new(Profile::PerformanceMetrics, 6, 3).unwrap();
        let gateway = session.gateway();
        let events = gateway.subscribe();
        let before = session.snapshots().build_snapshot();
        let err = gateway.on_sample_received(99, 1.0).unwrap_err();
        assert_eq!(
            err,
            TelemetryError::InvalidChannel {
                index: 99,
                allocated: 6
            }
        );
        assert_eq!(session.snapshots().build_snapshot(), before);
        gateway.on_sample_received(0, 7.0).unwrap();
        let after = session.snapshots().build_snapshot();
        assert_eq!(after.channels[0].values, vec![0.0, 0.0, 7.0]);
        assert_eq!(events.recv().unwrap(), IngestEvent::Rejected(err));
        assert!(matches!(events.recv().unwrap(), IngestEvent::Accepted(s) if s.value == 7.0));
        assert_eq!(gateway.stats(), IngestStats { accepted: 1, dropped: 1 });
    }
    #[test]
    fn inactive_but_allocated_channels_keep_buffering() {
        let session = Session::new(Profile::PerformanceMetrics, 6, 3).unwrap();
        let controller = session.controller();
        controller.apply_channel_count(2).unwrap();
        let gateway = session.gateway();
        gateway.on_sample_received(5, 4.0).unwrap();
        assert_eq!(session.snapshots().build_snapshot().channels.len(), 2);
        controller.apply_channel_count(6).unwrap();
        let snapshot = session.snapshots().build_snapshot();
        assert_eq!(snapshot.channels[5].values, vec![0.0, 0.0, 4.0]);
    }
    #[test]
    fn malformed_values_are_dropped_per_reading() {
        let session = Session::new(Profile::Expressions, 12, 2).unwrap();
        let gateway = session.gateway();
        let frame = TelemetryMessage::Frame {
            values: vec![json!(1.0), json!("oops"), json!("2.5")],
        };
        assert_eq!(gateway.on_message(&frame), 2);
        assert!(matches!(
            gateway.on_sample_received(0, f64::NAN),
            Err(TelemetryError::MalformedSample { channel: 0, .. })
        ));
        let snapshot = session.snapshots().build_snapshot();
        assert_eq!(snapshot.channels[0].values, vec![0.0, 1.0]);
        assert_eq!(snapshot.channels[1].values, vec![0.0, 0.0]);
        assert_eq!(snapshot.channels[2].values, vec![0.0, 2.5]);
        assert_eq!(gateway.stats(), IngestStats { accepted: 2, dropped: 2 });
    }
    #[test]
    fn hung_up_subscribers_are_pruned() {
        let session = Session::with_profile(Profile::PerformanceMetrics).unwrap();
        let gateway = session.gateway();
        drop(gateway.subscribe());
        let live = gateway.subscribe();
        gateway.on_message(&TelemetryMessage::sample(1, 0.5));
        assert_eq!(gateway.subscribers.lock().unwrap().len(), 1);
        assert!(live.try_recv().is_ok());
    }
    #[test]
    fn idle_subscriber_backlog_stays_bounded() {
        let session = Session::new(Profile::PerformanceMetrics, 6, 4).unwrap();
        let gateway = session.gateway();
        let idle = gateway.subscribe();
        for i in 0..(SUBSCRIBER_CAPACITY * 4) {
            gateway.on_sample_received(i % 6, 1.0).unwrap();
        }
        assert_eq!(gateway.subscribers.lock().unwrap().len(), 1);
        assert_eq!(
            gateway.stats().accepted,
            (SUBSCRIBER_CAPACITY * 4) as u64
        );
        let queued: Vec<IngestEvent> = idle.try_iter().collect();
        assert_eq!(queued.len(), SUBSCRIBER_CAPACITY);
        assert!(matches!(queued[0], IngestEvent::Accepted(s) if s.ordinal == 0));
        gateway.on_sample_received(0, 2.0).unwrap();
        assert!(matches!(idle.try_recv(), Ok(IngestEvent::Accepted(s)) if s.value == 2.0));
    }
}
