use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::drivers::buffer::MAX_DISPLAY_LENGTH;
use crate::types::{Profile, Rgb, MAX_CHANNELS};

/// Startup settings for one session. Nothing here is written back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub profile: Profile,
    pub display_length: usize,
    /// Defaults to the profile's own channel count.
    pub channel_count: Option<usize>,
    /// Overrides for the first `colors.len()` channels.
    pub colors: Vec<Rgb>,
}

impl SessionConfig {
    pub const DEFAULT_DISPLAY_LENGTH: usize = 100;

    pub fn channel_count(&self) -> usize {
        self.channel_count
            .unwrap_or_else(|| self.profile.channel_count())
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_DISPLAY_LENGTH).contains(&self.display_length) {
            bail!(
                "display_length must be between 1 and {MAX_DISPLAY_LENGTH}, got {}",
                self.display_length
            );
        }
        let count = self.channel_count();
        if !(1..=MAX_CHANNELS).contains(&count) {
            bail!("channel_count must be between 1 and {MAX_CHANNELS}, got {count}");
        }
        if self.colors.len() > count {
            bail!(
                "{} colors given for {count} channels",
                self.colors.len()
            );
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: SessionConfig =
            serde_json::from_str(text).context("session config is not valid JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config in {}", path.display()))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            display_length: Self::DEFAULT_DISPLAY_LENGTH,
            channel_count: None,
            colors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.channel_count(), 6);
    }

    #[test]
    fn parses_expressions_profile_with_colors() {
        let config = SessionConfig::from_json(
            r#"{"profile":"expressions","display_length":30,"colors":[[255,0,0],[0,0,255]]}"#,
        )
        .unwrap();
        assert_eq!(config.profile, Profile::Expressions);
        assert_eq!(config.channel_count(), 12);
        assert_eq!(config.colors, vec![Rgb(255, 0, 0), Rgb(0, 0, 255)]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(SessionConfig::from_json(r#"{"display_length":0}"#).is_err());
        assert!(SessionConfig::from_json(r#"{"display_length":100001}"#).is_err());
        assert!(SessionConfig::from_json(r#"{"display_length":100000}"#).is_ok());
        assert!(SessionConfig::from_json(r#"{"channel_count":13}"#).is_err());
        assert!(SessionConfig::from_json(r#"{"channel_count":1,"colors":[[1,1,1],[2,2,2]]}"#).is_err());
        assert!(SessionConfig::from_json(r#"{"display_lenght":5}"#).is_err());
    }
}
