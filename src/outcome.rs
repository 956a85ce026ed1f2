//! Credential Outcome Model
//!
//! Decides, per attempt, what username the site observes (typo injection)
//! and whether the attempt succeeds. There is no real credential check in
//! this model: success is a Bernoulli draw calibrated per role, independent
//! of the typo draw.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::core::Role;

/// How an observed username differs from the true one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    NoMutation,
    DeleteCharAt(usize),
    LowercaseCharAt(usize),
}

impl Mutation {
    /// Draw a mutation for a username of `len` chars: with `typo_prob` pick
    /// one of the two typo kinds at a uniform position, otherwise none.
    /// Empty usernames are never mutated.
    pub fn draw(rng: &mut StdRng, typo_prob: f64, len: usize) -> Self {
        if len == 0 || !rng.random_bool(typo_prob) {
            return Mutation::NoMutation;
        }
        let at = rng.random_range(0..len);
        if rng.random_bool(0.5) {
            Mutation::DeleteCharAt(at)
        } else {
            Mutation::LowercaseCharAt(at)
        }
    }

    /// Pure string transform; positions past the end leave the name intact.
    pub fn apply(&self, username: &str) -> String {
        let mut chars: Vec<char> = username.chars().collect();
        match *self {
            Mutation::NoMutation => {}
            Mutation::DeleteCharAt(at) => {
                if at < chars.len() {
                    chars.remove(at);
                }
            }
            Mutation::LowercaseCharAt(at) => {
                if let Some(c) = chars.get_mut(at) {
                    *c = c.to_ascii_lowercase();
                }
            }
        }
        chars.into_iter().collect()
    }
}

/// What one attempt looked like to the site.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    pub observed: String,
    pub success: bool,
}

/// Success/typo probabilities for one role.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RoleProfile {
    success_prob: f64,
    typo_prob: f64,
}

/// Per-attempt outcome draws for both roles.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeModel {
    legitimate: RoleProfile,
    attacker: RoleProfile,
}

impl OutcomeModel {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            legitimate: RoleProfile {
                success_prob: config.valid_success_prob,
                typo_prob: config.valid_typo_prob,
            },
            attacker: RoleProfile {
                success_prob: config.attacker_success_prob,
                typo_prob: config.attacker_typo_prob,
            },
        }
    }

    /// Run one attempt through the model: independent typo and success
    /// draws, in that order.
    pub fn attempt(&self, rng: &mut StdRng, username: &str, role: Role) -> AttemptOutcome {
        let profile = match role {
            Role::Legitimate => self.legitimate,
            Role::Attacker => self.attacker,
        };
        let mutation = Mutation::draw(rng, profile.typo_prob, username.chars().count());
        let observed = mutation.apply(username);
        let success = rng.random_bool(profile.success_prob);
        AttemptOutcome { observed, success }
    }
}
