// src/types.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::drivers::TelemetryError;

/// Hard upper bound on channel slots per session.
pub const MAX_CHANNELS: usize = 12;

/// 24-bit color, serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// Fallback palette for slots allocated beyond a profile's defaults.
pub const PALETTE: [Rgb; MAX_CHANNELS] = [
    Rgb(66, 133, 244),
    Rgb(219, 68, 55),
    Rgb(244, 180, 0),
    Rgb(15, 157, 88),
    Rgb(171, 71, 188),
    Rgb(0, 172, 193),
    Rgb(255, 112, 67),
    Rgb(158, 157, 36),
    Rgb(92, 107, 192),
    Rgb(240, 98, 146),
    Rgb(0, 121, 107),
    Rgb(121, 85, 72),
];

/// The six performance metrics, in channel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Interest,
    Engagement,
    Stress,
    Relaxation,
    Excitement,
    Focus,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Interest,
        Emotion::Engagement,
        Emotion::Stress,
        Emotion::Relaxation,
        Emotion::Excitement,
        Emotion::Focus,
    ];
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Interest => "Interest",
            Emotion::Engagement => "Engagement",
            Emotion::Stress => "Stress",
            Emotion::Relaxation => "Relaxation",
            Emotion::Excitement => "Excitement",
            Emotion::Focus => "Focus",
        }
    }
    pub fn default_color(self) -> Rgb {
        match self {
            Emotion::Interest => Rgb(255, 0, 0),
            Emotion::Engagement => Rgb(0, 0, 255),
            Emotion::Stress => Rgb(255, 200, 0),
            Emotion::Relaxation => Rgb(0, 255, 0),
            Emotion::Excitement => Rgb(255, 0, 255),
            Emotion::Focus => Rgb(0, 255, 255),
        }
    }
}

/// Expression channel names, in the order the server emits them.
pub const EXPRESSION_LABELS: [&str; MAX_CHANNELS] = [
    "blink",
    "winkLeft",
    "winkRight",
    "lookLeft",
    "lookRight",
    "furrowBrow",
    "raiseBrow",
    "smile",
    "clench",
    "smirkLeft",
    "smirkRight",
    "laugh",
];

/// Which telemetry tab a session feeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    #[default]
    PerformanceMetrics,
    Expressions,
}

impl Profile {
    pub fn channel_count(self) -> usize {
        match self {
            Profile::PerformanceMetrics => Emotion::ALL.len(),
            Profile::Expressions => EXPRESSION_LABELS.len(),
        }
    }
    /// Label for slot `index`; slots past the profile's named set get a generic label.
    pub fn label(self, index: usize) -> String {
        let named = match self {
            Profile::PerformanceMetrics => Emotion::ALL.get(index).map(|e| e.label()),
            Profile::Expressions => EXPRESSION_LABELS.get(index).copied(),
        };
        named
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Ch {index}"))
    }
    pub fn default_color(self, index: usize) -> Rgb {
        match self {
            Profile::PerformanceMetrics => Emotion::ALL
                .get(index)
                .map(|e| e.default_color())
                .unwrap_or(PALETTE[index % PALETTE.len()]),
            Profile::Expressions => PALETTE[index % PALETTE.len()],
        }
    }
}

/// Symbolic channel reference used by the color-change surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelKey {
    Emotion(Emotion),
    Expression(usize),
}

impl ChannelKey {
    pub fn index(self) -> usize {
        match self {
            ChannelKey::Emotion(emotion) => emotion.index(),
            ChannelKey::Expression(index) => index,
        }
    }
}

impl FromStr for ChannelKey {
    type Err = TelemetryError;
    /// Accepts an emotion name ("Stress"), an expression name ("raiseBrow")
    /// or a bare expression index ("7"). Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Some(emotion) = Emotion::ALL
            .iter()
            .find(|e| e.label().eq_ignore_ascii_case(key))
        {
            return Ok(ChannelKey::Emotion(*emotion));
        }
        if let Some(pos) = EXPRESSION_LABELS
            .iter()
            .position(|name| name.eq_ignore_ascii_case(key))
        {
            return Ok(ChannelKey::Expression(pos));
        }
        key.parse::<usize>()
            .map(ChannelKey::Expression)
            .map_err(|_| TelemetryError::UnknownChannelKey(key.to_owned()))
    }
}
