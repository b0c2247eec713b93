// src/main.rs
// Headless driver: simulated server -> ingestion thread -> render ticks.
use std::env;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use affectscope::drivers::ChannelSource;
use affectscope::engine::spawn_ingest_thread;
use affectscope::sim::{spawn_server, SimulatedServer};
use affectscope::{ChannelKey, Rgb, Session, SessionConfig, Snapshot};

const FRAME_INTERVAL: Duration = Duration::from_millis(5);
const RENDER_TICK: Duration = Duration::from_millis(100);
const FRAMES: u64 = 600;

fn describe(snapshot: &Snapshot) -> String {
    snapshot
        .channels
        .iter()
        .map(|c| format!("{}={:.2}", c.label, c.values.last().copied().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<()> {
    env_logger::init();
    let config = match env::args().nth(1) {
        Some(path) => SessionConfig::load(&PathBuf::from(path))?,
        None => SessionConfig::default(),
    };
    log::info!("starting {:?} session, display length {}", config.profile, config.display_length);

    let session = Session::from_config(&config).context("failed to build session")?;
    let gateway = session.gateway();

    let (tx, rx) = channel();
    let server = SimulatedServer::new(config.profile, 42).with_glitches(97);
    let server_thread = spawn_server(server, tx, FRAME_INTERVAL, FRAMES);
    let ingest_thread = spawn_ingest_thread(ChannelSource::new(rx), gateway)
        .context("failed to spawn ingestion thread")?;

    let snapshots = session.snapshots();
    let controller = session.controller();
    let mut tick = 0u32;
    while !ingest_thread.is_finished() {
        thread::sleep(RENDER_TICK);
        tick += 1;
        // Exercise the UI surface the way a user would mid-stream.
        match tick {
            5 => {
                controller.apply_display_length_text("")?;
            }
            8 => {
                controller.apply_display_length(20)?;
            }
            12 => {
                let key: ChannelKey = "Stress".parse()?;
                controller.apply_channel_color(key, Some(Rgb(128, 0, 0)))?;
            }
            15 => {
                controller.apply_channel_count(3)?;
            }
            20 => {
                controller.apply_channel_count(config.channel_count())?;
            }
            _ => {}
        }
        let snapshot = snapshots.build_snapshot();
        log::info!(
            "tick {tick}: len={} newest={:?} {}",
            snapshot.display_length,
            snapshot.newest_ordinal,
            describe(&snapshot)
        );
    }

    server_thread
        .join()
        .map_err(|_| anyhow!("simulated server panicked"))?;
    let report = ingest_thread
        .join()
        .map_err(|_| anyhow!("ingestion thread panicked"))?;
    log::info!(
        "done: {} messages, {} samples accepted, {} rejected",
        report.messages,
        report.stats.accepted,
        report.stats.dropped
    );
    log::info!("legend: {:?}", snapshots.channel_colors());
    Ok(())
}
