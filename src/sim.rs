// src/sim.rs
// Stand-in for the telemetry server when no hardware/session is connected.
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use crate::drivers::{SampleSource, TelemetryError, TelemetryMessage};
use crate::types::Profile;

pub struct SimulatedServer {
    profile: Profile,
    rng: StdRng,
    phase: f64,
    tick: u64,
    glitch_every: Option<u64>,
    remaining: Option<u64>,
}

impl SimulatedServer {
    pub fn new(profile: Profile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
            phase: 0.0,
            tick: 0,
            glitch_every: None,
            remaining: None,
        }
    }

    /// Every `every`-th message is a bad one (unknown channel or non-numeric value).
    pub fn with_glitches(mut self, every: u64) -> Self {
        self.glitch_every = (every > 0).then_some(every);
        self
    }

    /// Ends the stream after `count` messages.
    pub fn limited(mut self, count: u64) -> Self {
        self.remaining = Some(count);
        self
    }

    pub fn next_frame(&mut self) -> TelemetryMessage {
        self.tick += 1;
        if let Some(every) = self.glitch_every {
            if self.tick % every == 0 {
                return self.glitch();
            }
        }
        self.phase += 0.1;
        let channels = self.profile.channel_count();
        let values: Vec<f64> = match self.profile {
            Profile::PerformanceMetrics => (0..channels)
                .map(|i| {
                    let wave = (self.phase * (i as f64 * 0.1 + 1.0)).sin() * 0.4 + 0.5;
                    (wave + self.rng.gen_range(-0.05..0.05)).clamp(0.0, 1.0)
                })
                .collect(),
            // Expression channels are mostly idle with short bursts.
            Profile::Expressions => (0..channels)
                .map(|_| {
                    if self.rng.gen_bool(0.1) {
                        self.rng.gen_range(0.3..1.0)
                    } else {
                        0.0
                    }
                })
                .collect(),
        };
        TelemetryMessage::frame(values)
    }

    fn glitch(&mut self) -> TelemetryMessage {
        if self.rng.gen_bool(0.5) {
            TelemetryMessage::sample(99, 1.0)
        } else {
            TelemetryMessage::Sample {
                channel: 0,
                value: Value::from("n/a"),
            }
        }
    }
}

impl SampleSource for SimulatedServer {
    fn next_message(&mut self) -> Result<Option<TelemetryMessage>, TelemetryError> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Ok(None);
            }
            *remaining -= 1;
        }
        Ok(Some(self.next_frame()))
    }
}

/// Pushes `count` frames into `tx` at a fixed interval, then hangs up.
pub fn spawn_server(
    mut server: SimulatedServer,
    tx: Sender<TelemetryMessage>,
    interval: Duration,
    count: u64,
) -> JoinHandle<()> {
    thread::spawn(move || {
        for _ in 0..count {
            if tx.send(server.next_frame()).is_err() {
                break;
            }
            thread::sleep(interval);
        }
    })
}
