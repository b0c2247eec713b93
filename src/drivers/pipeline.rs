use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use crate::config::SessionConfig;
use crate::drivers::controller::ConfigController;
use crate::drivers::error::TelemetryError;
use crate::drivers::gateway::IngestionGateway;
use crate::drivers::registry::ChannelRegistry;
use crate::drivers::snapshot::SnapshotBuilder;
use crate::drivers::buffer::RollingWindowStore;
use crate::types::Profile;
/// Registry and windows live behind one lock so that configuration changes,
/// appends and snapshot builds never interleave.
pub(crate) struct CoreState {
    pub registry: ChannelRegistry,
    pub store: RollingWindowStore,
}
pub(crate) type SharedState = Arc<Mutex<CoreState>>;
/// A panic on another thread must not take the stream down with it.
pub(crate) fn lock(state: &SharedState) -> MutexGuard<'_, CoreState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
/// Owns the per-session core and hands out the three access points:
/// ingestion (producer side), snapshots (render side) and configuration (UI side).
pub struct Session {
    gateway: IngestionGateway,
    snapshots: SnapshotBuilder,
    controller: ConfigController,
}
impl Session {
    pub fn new(
        profile: Profile,
        channel_count: usize,
        display_length: usize,
    ) -> Result<Self, TelemetryError> {
        let registry = ChannelRegistry::new(profile, channel_count)?;
        let store = RollingWindowStore::new(registry.allocated_count(), display_length)?;
        let state: SharedState = Arc::new(Mutex::new(CoreState { registry, store }));
        log::debug!(
            "session started: {profile:?}, {channel_count} channels, display length {display_length}"
        );
        Ok(Self {
            gateway: IngestionGateway::new(state.clone()),
            snapshots: SnapshotBuilder::new(state.clone()),
            controller: ConfigController::new(state),
        })
    }
    pub fn with_profile(profile: Profile) -> Result<Self, TelemetryError> {
        Self::new(
            profile,
            profile.channel_count(),
            SessionConfig::DEFAULT_DISPLAY_LENGTH,
        )
    }
    pub fn from_config(config: &SessionConfig) -> Result<Self, TelemetryError> {
        let session = Self::new(
            config.profile,
            config.channel_count(),
            config.display_length,
        )?;
        for (index, color) in config.colors.iter().enumerate() {
            session.controller.set_color_at(index, *color)?;
        }
        Ok(session)
    }
    pub fn gateway(&self) -> IngestionGateway {
        self.gateway.clone()
    }
    pub fn snapshots(&self) -> SnapshotBuilder {
        self.snapshots.clone()
    }
    pub fn controller(&self) -> ConfigController {
        self.controller.clone()
    }
}
