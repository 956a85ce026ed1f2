//! Simulation Clock / Event Driver
//!
//! Advances simulated time with exponential interarrival draws against the
//! time-varying arrival rate, interleaving two stochastic processes:
//! legitimate logins and hacker attack episodes. The whole run is one
//! synchronous pass; records accumulate in a [`SimulationLog`] owned by the
//! run and are exported only after it completes.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       Simulator                           │
//! │  ┌──────────────┐  ┌───────────────┐  ┌────────────────┐  │
//! │  │ ArrivalRate  │  │ OutcomeModel  │  │  AttackModel   │  │
//! │  │ Table (λ)    │  │ (typo+success)│  │  (episodes)    │  │
//! │  └──────┬───────┘  └───────┬───────┘  └───────┬────────┘  │
//! │         └──────────────────┼──────────────────┘           │
//! │                            ▼                              │
//! │                 ┌────────────────────┐                    │
//! │                 │   SimulationLog    │                    │
//! │                 │ (attempts+episodes)│                    │
//! │                 └────────────────────┘                    │
//! └───────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};
use tracing::{debug, info};

use crate::attack::AttackModel;
use crate::config::SimConfig;
use crate::core::{LoginAttemptRecord, Role, SimError, SimulationLog};
use crate::outcome::OutcomeModel;
use crate::rates::ArrivalRateTable;
use crate::userbase::UserBase;

const NANOS_PER_HOUR: f64 = 3_600_000_000_000.0;

/// One simulation run over `[start, end]` (end-inclusive).
///
/// The random source is seeded once at construction; a fixed seed with a
/// fixed configuration replays the exact same record streams.
pub struct Simulator {
    users: UserBase,
    rates: ArrivalRateTable,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    attack_prob: f64,
    outcome: OutcomeModel,
    attack: AttackModel,
    rng: StdRng,
}

impl Simulator {
    /// Validate all inputs up front; a constructed simulator cannot fail
    /// for configuration reasons mid-run.
    pub fn new(
        users: UserBase,
        rates: ArrivalRateTable,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        config.validate()?;
        if end <= start {
            return Err(SimError::EmptyWindow { start, end });
        }
        if users.is_empty() {
            return Err(SimError::EmptyUserBase);
        }
        for user in users.users() {
            if user.ips.is_empty() {
                return Err(SimError::NoAssignedIps(user.username.clone()));
            }
        }

        Ok(Self {
            users,
            rates,
            start,
            end,
            attack_prob: config.attack_prob,
            outcome: OutcomeModel::from_config(&config),
            attack: AttackModel::from_config(&config),
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Drive the clock from start to end and return the filled log.
    ///
    /// Each iteration is one tick. With λ > 0 the clock jumps by an
    /// Exp(λ) interarrival gap and the tick carries a legitimate attempt;
    /// with λ = 0 it jumps to the next hour boundary (the earliest point
    /// the rate can change) and carries none. Either way the tick then runs
    /// one Bernoulli trial for an attack episode, so quiet hours stay
    /// attackable. A tick that would land past `end` is discarded.
    pub fn run(mut self) -> Result<SimulationLog, SimError> {
        info!(
            start = %self.start,
            end = %self.end,
            users = self.users.len(),
            "starting simulation run"
        );

        let mut log = SimulationLog::default();
        let mut t = self.start;

        loop {
            let lambda = self.rates.rate_at(t);
            let tick = if lambda > 0.0 {
                let gap_hours = Exp::new(lambda).unwrap().sample(&mut self.rng);
                t + TimeDelta::nanoseconds((gap_hours * NANOS_PER_HOUR) as i64)
            } else {
                next_hour(t)
            };
            if tick > self.end {
                break;
            }
            t = tick;

            if lambda > 0.0 {
                self.legitimate_attempt(&mut log, t);
            }

            // Attack trigger is coupled to clock ticks, not a second
            // Poisson process.
            if self.rng.random_bool(self.attack_prob) {
                let (episode, attempts) =
                    self.attack
                        .raid(&mut self.rng, &self.users, &self.outcome, t)?;
                debug!(at = %t, targets = episode.target_count(), "attack episode triggered");
                log.record_episode(episode, attempts);
            }
        }

        info!(
            attempts = log.attempt_count(),
            episodes = log.episode_count(),
            "simulation run complete"
        );
        Ok(log)
    }

    fn legitimate_attempt(&mut self, log: &mut SimulationLog, at: DateTime<Utc>) {
        let user = self.users.users().choose(&mut self.rng).unwrap();
        let source_ip = user.ips.choose(&mut self.rng).unwrap().clone();
        let outcome = self
            .outcome
            .attempt(&mut self.rng, &user.username, Role::Legitimate);
        log.record_attempt(LoginAttemptRecord {
            timestamp: at,
            username: outcome.observed,
            source_ip,
            success: outcome.success,
            attacker: false,
        });
    }
}

/// Start of the hour after the one `t` falls into.
fn next_hour(t: DateTime<Utc>) -> DateTime<Utc> {
    let secs = t.timestamp();
    let next = secs - secs.rem_euclid(3600) + 3600;
    DateTime::from_timestamp(next, 0).unwrap()
}
