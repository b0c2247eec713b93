use thiserror::Error;
use crate::drivers::buffer::MAX_DISPLAY_LENGTH;
use crate::types::MAX_CHANNELS;
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error("channel index {index} is outside the {allocated} allocated slots")]
    InvalidChannel { index: usize, allocated: usize },
    #[error("display length must be between 1 and {max}, got {0}", max = MAX_DISPLAY_LENGTH)]
    InvalidWindowLength(usize),
    #[error("channel count must be between 1 and {max}, got {requested}", max = MAX_CHANNELS)]
    InvalidChannelCount { requested: usize },
    #[error("sample for channel {channel} is not numeric: {raw}")]
    MalformedSample { channel: usize, raw: String },
    #[error("display length input {0:?} is not a number")]
    InvalidDisplayLengthInput(String),
    #[error("unknown channel key {0:?}")]
    UnknownChannelKey(String),
    #[error("failed to decode telemetry message: {0}")]
    MalformedMessage(String),
}
impl From<serde_json::Error> for TelemetryError {
    fn from(value: serde_json::Error) -> Self {
        TelemetryError::MalformedMessage(value.to_string())
    }
}
