//! Buffering and windowing core for live emotion/expression telemetry.
//!
//! A [`Session`] owns the channel registry and the per-channel rolling windows.
//! The network side pushes readings through an [`IngestionGateway`], the render
//! tick pulls [`Snapshot`]s from a [`SnapshotBuilder`], and UI handlers change
//! display length, channel count and colors through a [`ConfigController`].
pub mod config;
pub mod drivers;
pub mod engine;
pub mod sim;
pub mod types;
pub use config::SessionConfig;
pub use drivers::{
    ConfigController, IngestEvent, IngestionGateway, Session, Snapshot, SnapshotBuilder,
    TelemetryError, TelemetryMessage,
};
pub use types::{ChannelKey, Emotion, Profile, Rgb, MAX_CHANNELS};
