use crate::drivers::TelemetryError;
use crate::types::{Profile, Rgb, MAX_CHANNELS};
/// One telemetry series slot. Index and label never change once allocated.
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    index: usize,
    label: String,
    pub color: Rgb,
    pub enabled: bool,
}
impl Channel {
    fn new(index: usize, label: String, color: Rgb) -> Self {
        Self {
            index,
            label,
            color,
            enabled: true,
        }
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn label(&self) -> &str {
        &self.label
    }
}
/// Fixed set of channel slots for one session.
///
/// Slots are allocated up to a high-water mark and never freed: shrinking the
/// active count only disables the tail, so a re-enabled channel comes back with
/// its color, label and buffered data intact.
#[derive(Clone, Debug)]
pub struct ChannelRegistry {
    profile: Profile,
    channels: Vec<Channel>,
    active: usize,
}
impl ChannelRegistry {
    pub fn new(profile: Profile, active: usize) -> Result<Self, TelemetryError> {
        check_count(active)?;
        let mut registry = Self {
            profile,
            channels: Vec::with_capacity(MAX_CHANNELS),
            active: 0,
        };
        registry.set_active_channel_count(active)?;
        Ok(registry)
    }
    pub fn active_count(&self) -> usize {
        self.active
    }
    pub fn allocated_count(&self) -> usize {
        self.channels.len()
    }
    /// Activates the first `n` slots, allocating any that never existed.
    /// Returns the allocated slot count so the window store can match it.
    pub fn set_active_channel_count(&mut self, n: usize) -> Result<usize, TelemetryError> {
        check_count(n)?;
        while self.channels.len() < n {
            let index = self.channels.len();
            self.channels.push(Channel::new(
                index,
                self.profile.label(index),
                self.profile.default_color(index),
            ));
        }
        for channel in &mut self.channels {
            channel.enabled = channel.index < n;
        }
        self.active = n;
        Ok(self.channels.len())
    }
    pub fn set_channel_color(&mut self, index: usize, color: Rgb) -> Result<(), TelemetryError> {
        let allocated = self.channels.len();
        let channel = self
            .channels
            .get_mut(index)
            .ok_or(TelemetryError::InvalidChannel { index, allocated })?;
        channel.color = color;
        Ok(())
    }
    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }
    pub fn active_channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter().take(self.active)
    }
    pub fn channel_colors(&self) -> Vec<Rgb> {
        self.active_channels().map(|c| c.color).collect()
    }
}
fn check_count(n: usize) -> Result<(), TelemetryError> {
    if (1..=MAX_CHANNELS).contains(&n) {
        Ok(())
    } else {
        Err(TelemetryError::InvalidChannelCount { requested: n })
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn shrinking_keeps_slot_identity() {
        let mut registry = ChannelRegistry::new(Profile::PerformanceMetrics, 6).unwrap();
        registry.set_channel_color(4, Rgb(1, 2, 3)).unwrap();
        registry.set_active_channel_count(2).unwrap();
        assert_eq!(registry.active_count(), 2);
        assert_eq!(registry.allocated_count(), 6);
        assert_eq!(registry.channel_colors().len(), 2);
        assert!(!registry.channel(4).unwrap().enabled);
        registry.set_active_channel_count(6).unwrap();
        let excitement = registry.channel(4).unwrap();
        assert_eq!(excitement.label(), "Excitement");
        assert_eq!(excitement.color, Rgb(1, 2, 3));
        assert!(excitement.enabled);
    }
    #[test]
    fn growing_allocates_new_slots() {
        let mut registry = ChannelRegistry::new(Profile::PerformanceMetrics, 6).unwrap();
        assert_eq!(registry.set_active_channel_count(9).unwrap(), 9);
        assert_eq!(registry.channel(8).unwrap().label(), "Ch 8");
        assert_eq!(registry.active_channels().count(), 9);
    }
    #[test]
    fn rejects_out_of_range_counts_and_indices() {
        let mut registry = ChannelRegistry::new(Profile::Expressions, 12).unwrap();
        assert_eq!(
            registry.set_active_channel_count(0),
            Err(TelemetryError::InvalidChannelCount { requested: 0 })
        );
        assert_eq!(
            registry.set_active_channel_count(13),
            Err(TelemetryError::InvalidChannelCount { requested: 13 })
        );
        assert_eq!(
            registry.set_channel_color(12, Rgb::BLACK),
            Err(TelemetryError::InvalidChannel {
                index: 12,
                allocated: 12
            })
        );
        assert_eq!(registry.active_count(), 12);
    }
}
