//! Hacker Attack Model
//!
//! One call produces one complete attack episode: a lone hacker picking a
//! target subset of the known usernames and issuing one guess per target.
//! Episodes carry no state across triggers; one hacker's choices never
//! influence another episode.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::SimConfig;
use crate::core::{
    AttackEpisodeRecord, AttackSource, LoginAttemptRecord, Role, SimError, TargetOutcome,
};
use crate::ip;
use crate::outcome::OutcomeModel;
use crate::userbase::UserBase;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackModel {
    pub try_all_users_prob: f64,
    pub vary_ips: bool,
}

impl AttackModel {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            try_all_users_prob: config.try_all_users_prob,
            vary_ips: config.vary_ips,
        }
    }

    /// Run one episode triggered at `at`, returning the episode record and
    /// the login attempts it emitted (all stamped with the trigger time).
    pub fn raid(
        &self,
        rng: &mut StdRng,
        users: &UserBase,
        outcome: &OutcomeModel,
        at: DateTime<Utc>,
    ) -> Result<(AttackEpisodeRecord, Vec<LoginAttemptRecord>), SimError> {
        let targets = self.choose_targets(rng, users);
        self.run_episode(rng, users, outcome, at, targets)
    }

    /// Either the whole userbase (shuffled) or a uniformly sized, uniformly
    /// drawn non-empty subset. Never returns duplicates.
    fn choose_targets(&self, rng: &mut StdRng, users: &UserBase) -> Vec<String> {
        if rng.random_bool(self.try_all_users_prob) {
            let mut all: Vec<String> =
                users.users().iter().map(|u| u.username.clone()).collect();
            all.shuffle(rng);
            all
        } else {
            let size = rng.random_range(1..=users.len());
            rand::seq::index::sample(rng, users.len(), size)
                .into_iter()
                .map(|i| users.users()[i].username.clone())
                .collect()
        }
    }

    fn run_episode(
        &self,
        rng: &mut StdRng,
        users: &UserBase,
        outcome: &OutcomeModel,
        at: DateTime<Utc>,
        targets: Vec<String>,
    ) -> Result<(AttackEpisodeRecord, Vec<LoginAttemptRecord>), SimError> {
        // One standalone hacker per episode unless addresses vary per guess.
        let fixed_ip = if self.vary_ips {
            None
        } else {
            Some(ip::random_ip(rng))
        };

        let mut varying_ips = Vec::new();
        let mut attempts = Vec::with_capacity(targets.len());
        let mut outcomes = Vec::with_capacity(targets.len());

        for target in &targets {
            if users.get(target).is_none() {
                return Err(SimError::UnknownUser(target.clone()));
            }

            let source_ip = match &fixed_ip {
                Some(ip) => ip.clone(),
                None => {
                    let ip = ip::random_ip(rng);
                    varying_ips.push(ip.clone());
                    ip
                }
            };

            let guess = outcome.attempt(rng, target, Role::Attacker);
            attempts.push(LoginAttemptRecord {
                timestamp: at,
                username: guess.observed.clone(),
                source_ip,
                success: guess.success,
                attacker: true,
            });
            outcomes.push(TargetOutcome {
                username: target.clone(),
                observed: guess.observed,
                success: guess.success,
            });
        }

        let source = match fixed_ip {
            Some(ip) => AttackSource::Fixed(ip),
            None => AttackSource::Varying(varying_ips),
        };
        let episode = AttackEpisodeRecord {
            start: at,
            source,
            targets: outcomes,
        };
        Ok((episode, attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::OutcomeModel;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn small_base(rng: &mut StdRng) -> UserBase {
        let users = ["asmith", "bjones", "ckim", "dlopez"]
            .iter()
            .map(|name| crate::userbase::User {
                username: name.to_string(),
                password: "hunter2hunter".to_string(),
                ips: ip::assign(rng),
            })
            .collect();
        UserBase::new(users)
    }

    fn trigger_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_targets_bounded_and_distinct() {
        let mut rng = StdRng::seed_from_u64(5);
        let users = small_base(&mut rng);
        let outcome = OutcomeModel::from_config(&SimConfig::default());
        let model = AttackModel {
            try_all_users_prob: 0.2,
            vary_ips: false,
        };

        for _ in 0..200 {
            let (episode, attempts) = model
                .raid(&mut rng, &users, &outcome, trigger_time())
                .unwrap();
            assert!(!episode.targets.is_empty());
            assert!(episode.target_count() <= users.len());
            assert_eq!(attempts.len(), episode.target_count());

            let distinct: HashSet<&str> =
                episode.targets.iter().map(|t| t.username.as_str()).collect();
            assert_eq!(distinct.len(), episode.target_count());
        }
    }

    #[test]
    fn test_try_all_users_targets_everyone() {
        let mut rng = StdRng::seed_from_u64(5);
        let users = small_base(&mut rng);
        let outcome = OutcomeModel::from_config(&SimConfig::default());
        let model = AttackModel {
            try_all_users_prob: 1.0,
            vary_ips: false,
        };

        let (episode, _) = model
            .raid(&mut rng, &users, &outcome, trigger_time())
            .unwrap();
        assert_eq!(episode.target_count(), users.len());
    }

    #[test]
    fn test_fixed_ip_strategy() {
        let mut rng = StdRng::seed_from_u64(9);
        let users = small_base(&mut rng);
        let outcome = OutcomeModel::from_config(&SimConfig::default());
        let model = AttackModel {
            try_all_users_prob: 1.0,
            vary_ips: false,
        };

        let (episode, attempts) = model
            .raid(&mut rng, &users, &outcome, trigger_time())
            .unwrap();
        let AttackSource::Fixed(ip) = &episode.source else {
            panic!("expected a fixed source");
        };
        for attempt in &attempts {
            assert_eq!(&attempt.source_ip, ip);
            assert!(attempt.attacker);
            assert_eq!(attempt.timestamp, trigger_time());
        }
    }

    #[test]
    fn test_varying_ip_strategy() {
        let mut rng = StdRng::seed_from_u64(9);
        let users = small_base(&mut rng);
        let outcome = OutcomeModel::from_config(&SimConfig::default());
        let model = AttackModel {
            try_all_users_prob: 1.0,
            vary_ips: true,
        };

        let (episode, attempts) = model
            .raid(&mut rng, &users, &outcome, trigger_time())
            .unwrap();
        let AttackSource::Varying(ips) = &episode.source else {
            panic!("expected a varying source");
        };
        assert_eq!(ips.len(), attempts.len());
        for (attempt, ip) in attempts.iter().zip(ips) {
            assert_eq!(&attempt.source_ip, ip);
        }
    }

    #[test]
    fn test_unknown_target_is_an_error() {
        let mut rng = StdRng::seed_from_u64(9);
        let users = small_base(&mut rng);
        let outcome = OutcomeModel::from_config(&SimConfig::default());
        let model = AttackModel {
            try_all_users_prob: 1.0,
            vary_ips: false,
        };

        let result = model.run_episode(
            &mut rng,
            &users,
            &outcome,
            trigger_time(),
            vec!["ghost".to_string()],
        );
        assert_eq!(result, Err(SimError::UnknownUser("ghost".to_string())));
    }
}
