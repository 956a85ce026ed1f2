//! # login-sim - Synthetic Login-Attempt Log Simulator
//!
//! Generates a labeled event log of website login attempts over a
//! configurable time window, mixing realistic legitimate-user traffic with
//! randomized hacker brute-force episodes. The output is an offline,
//! reproducible dataset for intrusion-detection experiments - this crate
//! detects nothing and serves nothing.
//!
//! ## Key Design Principles
//!
//! 1. **Ground Truth Labeling** - every login attempt knows whether it came
//!    from an attack episode, enabling precision/recall evaluation of
//!    detectors trained on the output.
//!
//! 2. **Replayable** - a single `StdRng` seeded once at construction drives
//!    every draw; the same seed and configuration reproduce the streams
//!    byte for byte.
//!
//! 3. **Validate, Then Run** - incomplete rate tables, out-of-range
//!    probabilities and empty windows are rejected before the clock starts;
//!    nothing is recovered from mid-run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::{TimeZone, Utc};
//! use login_sim::{ArrivalRateTable, SimConfig, Simulator, UserBase, profiles};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let users = UserBase::synthesize(&mut rng);
//!
//! let sim = Simulator::new(
//!     users,
//!     profiles::office_hours(),
//!     Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap(),
//!     SimConfig { attack_prob: 0.1, seed: 42, ..SimConfig::default() },
//! ).unwrap();
//!
//! let log = sim.run().unwrap();
//! // log.attempts: one row per login attempt, attacker-labeled
//! // log.episodes: one row per brute-force episode, grouping its guesses
//! ```

// Attack episode generation
pub mod attack;

// Run configuration and validation
pub mod config;

// Core record types, log streams, errors - single source of truth
pub mod core;

// Simulation clock / event driver
pub mod engine;

// Synthetic address generation
pub mod ip;

// Credential outcome model (typos + success draws)
pub mod outcome;

// Arrival rate model
pub mod rates;

// Users and userbase persistence
pub mod userbase;

// Re-exports for convenience
pub use attack::AttackModel;
pub use config::SimConfig;
pub use core::{
    AttackEpisodeRecord, AttackSource, LoginAttemptRecord, Role, SimError, SimulationLog,
    TargetOutcome,
};
pub use engine::Simulator;
pub use outcome::{AttemptOutcome, Mutation, OutcomeModel};
pub use rates::{ArrivalRateTable, profiles};
pub use userbase::{User, UserBase};
