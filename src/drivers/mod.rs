// src/drivers/mod.rs
// Telemetry core: channel slots, rolling windows, ingestion, snapshots, configuration.
pub mod buffer;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod pipeline;
pub mod registry;
pub mod snapshot;
pub mod source;
pub use buffer::{RollingWindowStore, Sample, MAX_DISPLAY_LENGTH, PAD_VALUE};
pub use controller::ConfigController;
pub use error::TelemetryError;
pub use gateway::{IngestEvent, IngestStats, IngestionGateway, SUBSCRIBER_CAPACITY};
pub use pipeline::Session;
pub use registry::{Channel, ChannelRegistry};
pub use snapshot::{ChannelSeries, Snapshot, SnapshotBuilder};
pub use source::{ChannelSource, JsonLineSource, ManualSource, SampleSource, TelemetryMessage};
