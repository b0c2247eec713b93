use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::drivers::TelemetryError;
/// One unit pushed by the telemetry server, after framing.
///
/// Values stay as raw JSON so that a non-numeric reading is rejected per sample
/// by the gateway instead of failing the whole message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryMessage {
    /// A single labelled reading.
    Sample { channel: usize, value: Value },
    /// One reading per channel, starting at channel 0.
    Frame { values: Vec<Value> },
}
impl TelemetryMessage {
    pub fn sample(channel: usize, value: f64) -> Self {
        TelemetryMessage::Sample {
            channel,
            value: Value::from(value),
        }
    }
    pub fn frame(values: impl IntoIterator<Item = f64>) -> Self {
        TelemetryMessage::Frame {
            values: values.into_iter().map(Value::from).collect(),
        }
    }
    pub fn from_json(line: &str) -> Result<Self, TelemetryError> {
        Ok(serde_json::from_str(line)?)
    }
    pub fn len(&self) -> usize {
        match self {
            TelemetryMessage::Sample { .. } => 1,
            TelemetryMessage::Frame { values } => values.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
/// Interprets a raw JSON reading as a finite number. Numeric strings are accepted.
pub fn numeric_value(channel: usize, raw: &Value) -> Result<f64, TelemetryError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(TelemetryError::MalformedSample {
            channel,
            raw: raw.to_string(),
        }),
    }
}
/// Trait representing something that yields telemetry messages on demand.
/// `Ok(None)` means the stream has ended.
pub trait SampleSource {
    fn next_message(&mut self) -> Result<Option<TelemetryMessage>, TelemetryError>;
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<TelemetryMessage>,
}
impl ManualSource {
    pub fn new(messages: impl IntoIterator<Item = TelemetryMessage>) -> Self {
        Self {
            queue: messages.into_iter().collect(),
        }
    }
}
impl SampleSource for ManualSource {
    fn next_message(&mut self) -> Result<Option<TelemetryMessage>, TelemetryError> {
        Ok(self.queue.pop_front())
    }
}
/// Blocking source fed by another thread. Ends when every sender is dropped.
pub struct ChannelSource {
    rx: Receiver<TelemetryMessage>,
}
impl ChannelSource {
    pub fn new(rx: Receiver<TelemetryMessage>) -> Self {
        Self { rx }
    }
}
impl SampleSource for ChannelSource {
    fn next_message(&mut self) -> Result<Option<TelemetryMessage>, TelemetryError> {
        Ok(self.rx.recv().ok())
    }
}
/// Source reading newline-delimited JSON messages, e.g. a captured server log.
pub struct JsonLineSource<I> {
    lines: I,
}
impl<I: Iterator<Item = String>> JsonLineSource<I> {
    pub fn new(lines: I) -> Self {
        Self { lines }
    }
}
impl<I: Iterator<Item = String>> SampleSource for JsonLineSource<I> {
    fn next_message(&mut self) -> Result<Option<TelemetryMessage>, TelemetryError> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            return TelemetryMessage::from_json(&line).map(Some);
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    #[test]
    fn decodes_sample_and_frame_messages() {
        let sample = TelemetryMessage::from_json(r#"{"kind":"sample","channel":3,"value":0.5}"#)
            .unwrap();
        assert_eq!(sample, TelemetryMessage::sample(3, 0.5));
        let frame = TelemetryMessage::from_json(r#"{"kind":"frame","values":[1,2.5,"x"]}"#)
            .unwrap();
        assert_eq!(frame.len(), 3);
        assert!(matches!(
            TelemetryMessage::from_json(r#"{"kind":"sample","channel":-1,"value":1}"#),
            Err(TelemetryError::MalformedMessage(_))
        ));
    }
    #[test]
    fn numeric_value_rejects_non_numbers() {
        assert_eq!(numeric_value(0, &json!(1.25)).unwrap(), 1.25);
        assert_eq!(numeric_value(0, &json!(" 7 ")).unwrap(), 7.0);
        assert!(matches!(
            numeric_value(2, &json!("n/a")),
            Err(TelemetryError::MalformedSample { channel: 2, .. })
        ));
        assert!(numeric_value(0, &json!(null)).is_err());
        assert!(numeric_value(0, &json!("NaN")).is_err());
    }
    #[test]
    fn json_line_source_skips_blank_lines() {
        let lines = vec![
            String::new(),
            r#"{"kind":"sample","channel":0,"value":1.0}"#.to_owned(),
        ];
        let mut source = JsonLineSource::new(lines.into_iter());
        assert_eq!(
            source.next_message().unwrap(),
            Some(TelemetryMessage::sample(0, 1.0))
        );
        assert_eq!(source.next_message().unwrap(), None);
    }
}
