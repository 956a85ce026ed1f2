//! Simulation configuration bundle.
//!
//! All probabilities are plain knobs validated into [0, 1] before a run is
//! allowed to start. The defaults are calibration values, not constraints:
//! legitimate users very likely type their own credentials correctly,
//! attackers very rarely guess right and fat-finger targets more often.

use serde::{Deserialize, Serialize};

use crate::core::SimError;

pub const DEFAULT_ATTACK_PROB: f64 = 0.1;
pub const DEFAULT_TRY_ALL_USERS_PROB: f64 = 0.2;
pub const DEFAULT_VALID_SUCCESS_PROB: f64 = 0.95;
pub const DEFAULT_ATTACKER_SUCCESS_PROB: f64 = 0.05;
pub const DEFAULT_VALID_TYPO_PROB: f64 = 0.01;
pub const DEFAULT_ATTACKER_TYPO_PROB: f64 = 0.25;

/// Configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Probability an attack episode triggers at each clock tick.
    pub attack_prob: f64,
    /// Probability an episode targets the entire userbase rather than a
    /// random subset.
    pub try_all_users_prob: f64,
    /// Draw a fresh source address per guess instead of one per episode.
    pub vary_ips: bool,
    /// Probability a legitimate attempt supplies the right password.
    pub valid_success_prob: f64,
    /// Probability an attacker guess happens to be right.
    pub attacker_success_prob: f64,
    /// Probability a legitimate attempt typos the username.
    pub valid_typo_prob: f64,
    /// Probability an attacker guess typos the target username.
    pub attacker_typo_prob: f64,
    /// Seed for the run's random source; fixed seed means replayable output.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            attack_prob: DEFAULT_ATTACK_PROB,
            try_all_users_prob: DEFAULT_TRY_ALL_USERS_PROB,
            vary_ips: false,
            valid_success_prob: DEFAULT_VALID_SUCCESS_PROB,
            attacker_success_prob: DEFAULT_ATTACKER_SUCCESS_PROB,
            valid_typo_prob: DEFAULT_VALID_TYPO_PROB,
            attacker_typo_prob: DEFAULT_ATTACKER_TYPO_PROB,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Reject any probability outside [0, 1].
    pub fn validate(&self) -> Result<(), SimError> {
        let probs = [
            ("attack_prob", self.attack_prob),
            ("try_all_users_prob", self.try_all_users_prob),
            ("valid_success_prob", self.valid_success_prob),
            ("attacker_success_prob", self.attacker_success_prob),
            ("valid_typo_prob", self.valid_typo_prob),
            ("attacker_typo_prob", self.attacker_typo_prob),
        ];
        for (name, value) in probs {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(SimError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let mut config = SimConfig::default();
        config.attack_prob = 1.5;
        assert_eq!(
            config.validate(),
            Err(SimError::InvalidProbability {
                name: "attack_prob",
                value: 1.5
            })
        );

        let mut config = SimConfig::default();
        config.attacker_typo_prob = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_boundary_probabilities_accepted() {
        let config = SimConfig {
            attack_prob: 1.0,
            try_all_users_prob: 0.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nan_probability_rejected() {
        let mut config = SimConfig::default();
        config.valid_typo_prob = f64::NAN;
        assert!(config.validate().is_err());
    }
}
