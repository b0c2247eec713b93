use crate::drivers::buffer::MAX_DISPLAY_LENGTH;
use crate::drivers::pipeline::{lock, SharedState};
use crate::drivers::TelemetryError;
use crate::types::{ChannelKey, Rgb};
/// The only writer of session configuration. Each `apply_*` holds the core
/// lock for its whole update, so a snapshot sees either all of it or none.
#[derive(Clone)]
pub struct ConfigController {
    state: SharedState,
}
impl ConfigController {
    pub(crate) fn new(state: SharedState) -> Self {
        Self { state }
    }
    /// Lengths are clamped into `1..=MAX_DISPLAY_LENGTH` (an emptied input field
    /// must not blank the plot). Returns the length actually in effect.
    pub fn apply_display_length(&self, requested: i64) -> Result<usize, TelemetryError> {
        let effective = usize::try_from(requested)
            .unwrap_or(if requested < 0 { 0 } else { usize::MAX })
            .clamp(1, MAX_DISPLAY_LENGTH);
        lock(&self.state).store.resize(effective)?;
        log::debug!("display length set to {effective} (requested {requested})");
        Ok(effective)
    }
    /// Text-field variant: empty input means 1; anything non-numeric is handed
    /// back so the caller can re-prompt.
    pub fn apply_display_length_text(&self, text: &str) -> Result<usize, TelemetryError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.apply_display_length(1);
        }
        let requested = parse_length(trimmed)
            .ok_or_else(|| TelemetryError::InvalidDisplayLengthInput(trimmed.to_owned()))?;
        self.apply_display_length(requested)
    }
    pub fn apply_channel_count(&self, n: usize) -> Result<(), TelemetryError> {
        let mut state = lock(&self.state);
        let allocated = state.registry.set_active_channel_count(n)?;
        state.store.ensure_channels(allocated);
        log::debug!("active channels set to {n} ({allocated} allocated)");
        Ok(())
    }
    /// `None` is a cancelled color dialog and changes nothing.
    /// Returns whether a color was applied.
    pub fn apply_channel_color(
        &self,
        key: ChannelKey,
        color: Option<Rgb>,
    ) -> Result<bool, TelemetryError> {
        let Some(color) = color else {
            return Ok(false);
        };
        self.set_color_at(key.index(), color)?;
        log::debug!("channel {key:?} recolored to {color}");
        Ok(true)
    }
    pub(crate) fn set_color_at(&self, index: usize, color: Rgb) -> Result<(), TelemetryError> {
        lock(&self.state).registry.set_channel_color(index, color)
    }
    pub fn display_length(&self) -> usize {
        lock(&self.state).store.display_length()
    }
    pub fn active_channel_count(&self) -> usize {
        lock(&self.state).registry.active_count()
    }
    pub fn channel_colors(&self) -> Vec<Rgb> {
        lock(&self.state).registry.channel_colors()
    }
}
/// Integer text, saturating at the `i64` bounds so that a long run of digits
/// still counts as "very large" rather than "not a number".
fn parse_length(text: &str) -> Option<i64> {
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}
