// src/engine.rs
use std::io;
use std::thread::{self, JoinHandle};

use crate::drivers::{IngestStats, IngestionGateway, SampleSource};

/// Counts for one ingestion run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpReport {
    pub messages: u64,
    pub undecodable: u64,
    pub stats: IngestStats,
}

/// Drains `source` into the gateway until the stream ends.
/// Messages that fail to decode are logged and skipped.
pub fn pump<S: SampleSource>(source: &mut S, gateway: &IngestionGateway) -> PumpReport {
    let mut report = PumpReport::default();
    loop {
        match source.next_message() {
            Ok(Some(message)) => {
                report.messages += 1;
                gateway.on_message(&message);
            }
            Ok(None) => break,
            Err(err) => {
                report.undecodable += 1;
                log::warn!("skipping telemetry message: {err}");
            }
        }
    }
    report.stats = gateway.stats();
    report
}

/// Runs ingestion on its own thread so the render side never waits on the network.
/// The thread ends when the source does (for a `ChannelSource`: when every sender is dropped).
pub fn spawn_ingest_thread<S>(
    mut source: S,
    gateway: IngestionGateway,
) -> io::Result<JoinHandle<PumpReport>>
where
    S: SampleSource + Send + 'static,
{
    thread::Builder::new()
        .name("telemetry-ingest".into())
        .spawn(move || {
            log::info!("ingestion started");
            let report = pump(&mut source, &gateway);
            log::info!(
                "ingestion stopped after {} messages ({} accepted, {} dropped, {} undecodable)",
                report.messages,
                report.stats.accepted,
                report.stats.dropped,
                report.undecodable
            );
            report
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{ChannelSource, JsonLineSource, ManualSource, Session, TelemetryMessage};
    use crate::types::Profile;
    use std::sync::mpsc::channel;

    #[test]
    fn pump_drains_manual_source() {
        let session = Session::new(Profile::PerformanceMetrics, 6, 3).unwrap();
        let mut source = ManualSource::new(vec![
            TelemetryMessage::sample(0, 1.0),
            TelemetryMessage::sample(99, 1.0),
            TelemetryMessage::frame([2.0, 3.0]),
        ]);
        let report = pump(&mut source, &session.gateway());
        assert_eq!(report.messages, 3);
        assert_eq!(report.stats, IngestStats { accepted: 3, dropped: 1 });
        let snapshot = session.snapshots().build_snapshot();
        assert_eq!(snapshot.channels[0].values, vec![0.0, 1.0, 2.0]);
        assert_eq!(snapshot.channels[1].values, vec![0.0, 0.0, 3.0]);
    }

    #[test]
    fn undecodable_lines_do_not_stop_the_stream() {
        let session = Session::new(Profile::Expressions, 12, 2).unwrap();
        let lines = vec![
            r#"{"kind":"sample","channel":4,"value":0.25}"#.to_owned(),
            "not json".to_owned(),
            r#"{"kind":"sample","channel":4,"value":0.75}"#.to_owned(),
        ];
        let report = pump(&mut JsonLineSource::new(lines.into_iter()), &session.gateway());
        assert_eq!(report.messages, 2);
        assert_eq!(report.undecodable, 1);
        let snapshot = session.snapshots().build_snapshot();
        assert_eq!(snapshot.channels[4].values, vec![0.25, 0.75]);
    }

    #[test]
    fn ingest_thread_ends_when_senders_drop() {
        let session = Session::new(Profile::PerformanceMetrics, 6, 10).unwrap();
        let (tx, rx) = channel();
        let handle = spawn_ingest_thread(ChannelSource::new(rx), session.gateway()).unwrap();
        for i in 0..20u32 {
            tx.send(TelemetryMessage::sample(2, f64::from(i))).unwrap();
        }
        drop(tx);
        let report = handle.join().unwrap();
        assert_eq!(report.stats.accepted, 20);
        let snapshot = session.snapshots().build_snapshot();
        let expected: Vec<f64> = (10..20u32).map(f64::from).collect();
        assert_eq!(snapshot.channels[2].values, expected);
    }
}
