//! Core Types for login-sim
//!
//! Record types for the two output streams, the per-run log container, and
//! the crate error. Types are co-located here as the single source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Attempt Records
// ============================================================================

/// Who is driving a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Legitimate,
    Attacker,
}

/// One row of the login-attempt stream - the primary labeled output unit.
///
/// `username` is the name as observed by the site, which may be a typo'd
/// variant of the true username. `attacker` is the ground-truth label:
/// true iff the attempt was issued by an attack episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginAttemptRecord {
    pub timestamp: DateTime<Utc>,
    pub username: String,
    pub source_ip: String,
    pub success: bool,
    pub attacker: bool,
}

// ============================================================================
// Attack Episodes
// ============================================================================

/// Outcome of one guess within an attack episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetOutcome {
    /// True username the guess was aimed at.
    pub username: String,
    /// Username as submitted (possibly typo'd).
    pub observed: String,
    pub success: bool,
}

/// Source address strategy of one episode.
///
/// `Varying` holds one address per target, in target order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttackSource {
    Fixed(String),
    Varying(Vec<String>),
}

/// One row of the attack stream: a single hacker's complete raid, grouping
/// the constituent login attempts it emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackEpisodeRecord {
    pub start: DateTime<Utc>,
    pub source: AttackSource,
    pub targets: Vec<TargetOutcome>,
}

impl AttackEpisodeRecord {
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}

// ============================================================================
// Simulation Output
// ============================================================================

/// The two append-only record streams produced by one simulation run.
///
/// Owned by the run that fills it; export to disk happens after the run
/// completes, never interleaved with generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationLog {
    pub attempts: Vec<LoginAttemptRecord>,
    pub episodes: Vec<AttackEpisodeRecord>,
}

impl SimulationLog {
    pub fn record_attempt(&mut self, record: LoginAttemptRecord) {
        self.attempts.push(record);
    }

    /// Append an episode together with the attempt records it emitted.
    pub fn record_episode(
        &mut self,
        episode: AttackEpisodeRecord,
        attempts: Vec<LoginAttemptRecord>,
    ) {
        self.attempts.extend(attempts);
        self.episodes.push(episode);
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// Number of attempts carrying the attacker label.
    pub fn attack_attempt_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.attacker).count()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors surfaced by configuration validation, userbase loading, and the
/// simulation run. Invalid input is rejected before simulation begins; there
/// are no retries.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    InvalidProbability { name: &'static str, value: f64 },
    MissingRateBucket { weekday: u8, hour: u8 },
    InvalidRate { weekday: u8, hour: u8, rate: f64 },
    EmptyWindow { start: DateTime<Utc>, end: DateTime<Utc> },
    EmptyUserBase,
    NoAssignedIps(String),
    UnknownUser(String),
    Io(String),
    Json(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProbability { name, value } => {
                write!(f, "probability `{}` must lie in [0, 1], got {}", name, value)
            }
            Self::MissingRateBucket { weekday, hour } => {
                write!(
                    f,
                    "arrival-rate table has no bucket for weekday {} hour {}",
                    weekday, hour
                )
            }
            Self::InvalidRate { weekday, hour, rate } => {
                write!(
                    f,
                    "arrival rate for weekday {} hour {} must be finite and non-negative, got {}",
                    weekday, hour, rate
                )
            }
            Self::EmptyWindow { start, end } => {
                write!(f, "end {} must be strictly after start {}", end, start)
            }
            Self::EmptyUserBase => write!(f, "userbase contains no users"),
            Self::NoAssignedIps(user) => {
                write!(f, "user `{}` has no assigned IP addresses", user)
            }
            Self::UnknownUser(user) => {
                write!(f, "attack targeted `{}`, which is not in the userbase", user)
            }
            Self::Io(e) => write!(f, "I/O failed: {}", e),
            Self::Json(e) => write!(f, "JSON (de)serialization failed: {}", e),
        }
    }
}

impl std::error::Error for SimError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(attacker: bool) -> LoginAttemptRecord {
        LoginAttemptRecord {
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
            username: "asmith".to_string(),
            source_ip: "10.0.0.1".to_string(),
            success: true,
            attacker,
        }
    }

    #[test]
    fn test_log_recording() {
        let mut log = SimulationLog::default();
        log.record_attempt(attempt(false));

        let episode = AttackEpisodeRecord {
            start: DateTime::from_timestamp(60, 0).unwrap(),
            source: AttackSource::Fixed("203.0.113.9".to_string()),
            targets: vec![TargetOutcome {
                username: "asmith".to_string(),
                observed: "asmith".to_string(),
                success: false,
            }],
        };
        log.record_episode(episode, vec![attempt(true)]);

        assert_eq!(log.attempt_count(), 2);
        assert_eq!(log.episode_count(), 1);
        assert_eq!(log.attack_attempt_count(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = SimError::InvalidProbability {
            name: "attack_prob",
            value: 1.5,
        };
        assert!(err.to_string().contains("attack_prob"));

        let err = SimError::MissingRateBucket { weekday: 6, hour: 23 };
        assert!(err.to_string().contains("weekday 6 hour 23"));
    }
}
