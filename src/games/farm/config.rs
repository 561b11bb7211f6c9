//! Tunable starting values for a farm session.
//!
//! The energy cap is not part of the config: every morning refills to
//! [`MAX_ENERGY`](super::state::MAX_ENERGY).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Starting conditions. Loaded from JSON or taken from `Default`; never
/// mutated once a session starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FarmConfig {
    pub starting_money: u64,
    pub starting_day: u32,
    /// Maximum number of entries kept in the message log.
    pub log_capacity: usize,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            starting_money: 50,
            starting_day: 1,
            log_capacity: 30,
        }
    }
}

/// Reasons a config override is refused.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("farm config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("starting_day must be at least 1")]
    StartingDay,
    #[error("log_capacity must be at least 1")]
    LogCapacity,
}

impl FarmConfig {
    /// Parse and validate. Unknown fields (including a stray `max_energy`)
    /// are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_day == 0 {
            return Err(ConfigError::StartingDay);
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::LogCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::farm::catalog::CropCatalog;
    use crate::games::farm::logic::advance_day;
    use crate::games::farm::state::{FarmState, MAX_ENERGY};

    #[test]
    fn defaults_match_new_game() {
        let c = FarmConfig::default();
        assert_eq!(c.starting_money, 50);
        assert_eq!(c.starting_day, 1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = FarmConfig::from_json(r#"{ "starting_money": 500 }"#).unwrap();
        assert_eq!(c.starting_money, 500);
        assert_eq!(c.starting_day, 1);
        assert_eq!(c.log_capacity, 30);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(
            FarmConfig::from_json(r#"{ "starting_money": "lots" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn energy_cap_cannot_be_overridden() {
        assert!(matches!(
            FarmConfig::from_json(r#"{ "max_energy": 50 }"#),
            Err(ConfigError::Parse(_))
        ));

        let mut state = FarmState::with_setup(
            FarmConfig::from_json(r#"{ "starting_money": 500 }"#).unwrap(),
            CropCatalog::builtin(),
        );
        assert_eq!(state.player.energy, MAX_ENERGY);
        state.player.energy = 0;
        advance_day(&mut state);
        assert_eq!(state.player.energy, 10);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            FarmConfig::from_json(r#"{ "starting_day": 0 }"#),
            Err(ConfigError::StartingDay)
        ));
        assert!(matches!(
            FarmConfig::from_json(r#"{ "log_capacity": 0 }"#),
            Err(ConfigError::LogCapacity)
        ));
        assert_eq!(
            FarmConfig::from_json(r#"{ "starting_day": 0 }"#)
                .unwrap_err()
                .to_string(),
            "starting_day must be at least 1"
        );
    }
}
