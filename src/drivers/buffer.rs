use std::collections::VecDeque;
use crate::drivers::TelemetryError;
/// Value reported for window positions that have no sample yet.
pub const PAD_VALUE: f64 = 0.0;
/// Largest accepted view length; every snapshot materializes this many values per channel.
pub const MAX_DISPLAY_LENGTH: usize = 100_000;
/// A single accepted reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub channel: usize,
    pub value: f64,
    /// Position in the global arrival sequence, not wall-clock time.
    pub ordinal: u64,
}
/// Rolling buffer that keeps the `display_length` most recent samples per channel.
pub struct RollingWindowStore {
    per_channel: Vec<VecDeque<Sample>>, // channel -> oldest..newest
    display_length: usize,
    next_ordinal: u64,
}
impl RollingWindowStore {
    pub fn new(channel_count: usize, display_length: usize) -> Result<Self, TelemetryError> {
        check_length(display_length)?;
        let mut store = Self {
            per_channel: Vec::new(),
            display_length,
            next_ordinal: 0,
        };
        store.ensure_channels(channel_count);
        Ok(store)
    }
    pub fn display_length(&self) -> usize {
        self.display_length
    }
    pub fn channel_count(&self) -> usize {
        self.per_channel.len()
    }
    pub fn next_ordinal(&self) -> u64 {
        self.next_ordinal
    }
    /// Adds empty buffers until `n` channels exist. Never drops buffers.
    pub fn ensure_channels(&mut self, n: usize) {
        while self.per_channel.len() < n {
            self.per_channel.push(VecDeque::new());
        }
    }
    pub fn append(&mut self, channel: usize, value: f64) -> Result<Sample, TelemetryError> {
        let allocated = self.per_channel.len();
        let queue = self
            .per_channel
            .get_mut(channel)
            .ok_or(TelemetryError::InvalidChannel {
                index: channel,
                allocated,
            })?;
        let sample = Sample {
            channel,
            value,
            ordinal: self.next_ordinal,
        };
        self.next_ordinal += 1;
        if queue.len() == self.display_length {
            queue.pop_front();
        }
        queue.push_back(sample);
        Ok(sample)
    }
    /// Changes the view length. Shrinking evicts the oldest samples right away;
    /// growing only makes room for future samples.
    pub fn resize(&mut self, new_length: usize) -> Result<(), TelemetryError> {
        check_length(new_length)?;
        self.display_length = new_length;
        for queue in &mut self.per_channel {
            if queue.len() > new_length {
                queue.drain(..queue.len() - new_length);
            }
        }
        Ok(())
    }
    /// Exactly `display_length` values, oldest first, left-padded with [`PAD_VALUE`].
    pub fn snapshot_channel(&self, channel: usize) -> Result<Vec<f64>, TelemetryError> {
        let queue = self
            .per_channel
            .get(channel)
            .ok_or(TelemetryError::InvalidChannel {
                index: channel,
                allocated: self.per_channel.len(),
            })?;
        let pad = self.display_length.saturating_sub(queue.len());
        let mut values = Vec::with_capacity(self.display_length);
        values.resize(pad, PAD_VALUE);
        values.extend(queue.iter().map(|s| s.value));
        Ok(values)
    }
    pub fn window(&self, channel: usize) -> Option<impl Iterator<Item = &Sample>> {
        self.per_channel.get(channel).map(|queue| queue.iter())
    }
    pub fn latest(&self, channel: usize) -> Option<Sample> {
        self.per_channel.get(channel)?.back().copied()
    }
}
fn check_length(length: usize) -> Result<(), TelemetryError> {
    if (1..=MAX_DISPLAY_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(TelemetryError::InvalidWindowLength(length))
    }
}
