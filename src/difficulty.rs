//! Difficulty state module.
//!
//! `DifficultyState` is the run-wide hard-mode switch plus ascension level.
//! It is set once per run by the host and read by every dispatch.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Highest ascension level a run can be played at.
pub const MAX_LEVEL: u8 = 100;

/// Hard-mode flag and ascension level for one run.
///
/// Levels outside `0..=MAX_LEVEL` are clamped with a warning instead of
/// failing, both through [`DifficultyState::new`] and when deserialising.
///
/// # Examples
///
/// ```rust
/// use ascension::DifficultyState;
///
/// let state = DifficultyState::new(true, 150);
/// assert_eq!(state.level(), 100);
///
/// let loaded = DifficultyState::from_json(r#"{ "enabled": true, "level": 49 }"#).unwrap();
/// assert!(loaded.enabled());
/// assert_eq!(loaded.level(), 49);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawDifficulty")]
pub struct DifficultyState {
    enabled: bool,
    level: u8,
}

#[derive(Deserialize)]
struct RawDifficulty {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    level: i64,
}

impl From<RawDifficulty> for DifficultyState {
    fn from(raw: RawDifficulty) -> Self {
        DifficultyState::new(raw.enabled, raw.level)
    }
}

impl DifficultyState {
    /// Create a difficulty state, clamping `level` into `0..=MAX_LEVEL`.
    pub fn new(enabled: bool, level: i64) -> Self {
        let clamped = level.clamp(0, i64::from(MAX_LEVEL));
        if clamped != level {
            tracing::warn!(
                requested = level,
                clamped,
                "ascension level out of range, clamping"
            );
        }
        Self {
            enabled,
            level: clamped as u8,
        }
    }

    /// Hard mode off at level 0.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Load a difficulty state from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether hard mode is enabled for this run.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The ascension level for this run.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Whether a rule with threshold `min_level` is unlocked.
    pub fn unlocks(&self, min_level: u8) -> bool {
        self.enabled && self.level >= min_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(DifficultyState::new(true, -3).level(), 0);
        assert_eq!(DifficultyState::new(true, 101).level(), MAX_LEVEL);
        assert_eq!(DifficultyState::new(true, 42).level(), 42);
    }

    #[test]
    fn test_unlocks() {
        let state = DifficultyState::new(true, 49);
        assert!(state.unlocks(49));
        assert!(state.unlocks(21));
        assert!(!state.unlocks(50));

        let off = DifficultyState::new(false, 90);
        assert!(!off.unlocks(0));
    }

    #[test]
    fn test_from_json_clamps() {
        let state = DifficultyState::from_json(r#"{ "enabled": true, "level": 500 }"#).unwrap();
        assert_eq!(state.level(), MAX_LEVEL);
    }

    #[test]
    fn test_from_json_defaults() {
        let state = DifficultyState::from_json("{}").unwrap();
        assert_eq!(state, DifficultyState::disabled());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(DifficultyState::from_json("{ \"level\": \"high\" }").is_err());
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        let json = serde_json::to_value(DifficultyState::new(true, 78)).unwrap();
        assert_eq!(json["enabled"], true);
        assert_eq!(json["level"], 78);
    }
}
