use crate::drivers::buffer::PAD_VALUE;
use crate::drivers::pipeline::{lock, SharedState};
use crate::types::Rgb;
/// One active channel as the renderer should draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelSeries {
    pub index: usize,
    pub label: String,
    pub color: Rgb,
    pub values: Vec<f64>, // oldest..newest, len == display_length
}
/// Render-ready copy of every active channel, taken under one configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub display_length: usize,
    /// Ordinal of the most recently accepted sample; `None` before any data.
    pub newest_ordinal: Option<u64>,
    pub channels: Vec<ChannelSeries>,
}
impl Snapshot {
    pub fn series(&self, index: usize) -> Option<&ChannelSeries> {
        self.channels.iter().find(|c| c.index == index)
    }
    /// Newest value of a channel (what the face elements are driven from).
    pub fn latest(&self, index: usize) -> Option<f64> {
        self.series(index)?.values.last().copied()
    }
    pub fn colors(&self) -> Vec<Rgb> {
        self.channels.iter().map(|c| c.color).collect()
    }
}
/// Pulled by the render tick; never pushes.
#[derive(Clone)]
pub struct SnapshotBuilder {
    state: SharedState,
}
impl SnapshotBuilder {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }
    pub fn build_snapshot(&self) -> Snapshot {
        let state = lock(&self.state);
        let display_length = state.store.display_length();
        let channels = state
            .registry
            .active_channels()
            .map(|channel| ChannelSeries {
                index: channel.index(),
                label: channel.label().to_owned(),
                color: channel.color,
                values: state
                    .store
                    .snapshot_channel(channel.index())
                    .unwrap_or_else(|_| vec![PAD_VALUE; display_length]),
            })
            .collect();
        Snapshot {
            display_length,
            newest_ordinal: state.store.next_ordinal().checked_sub(1),
            channels,
        }
    }
    pub fn channel_colors(&self) -> Vec<Rgb> {
        lock(&self.state).registry.channel_colors()
    }
}
