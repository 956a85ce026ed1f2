//! Users and userbase persistence.
//!
//! A user is immutable once created: username, ground-truth password, and
//! 1-3 pre-assigned IP addresses. The userbase is loaded from (or saved to)
//! a plain JSON array; the simulator core only ever reads it.

use std::fs;
use std::path::Path;

use rand::distr::{Alphanumeric, SampleString};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::core::SimError;
use crate::ip;

const SURNAMES: &[&str] = &["smith", "jones", "kim", "lopez", "brown"];
const SERVICE_ACCOUNTS: &[&str] = &["admin", "master", "dba"];
const PASSWORD_LEN: usize = 12;

/// One known account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub ips: Vec<String>,
}

/// The known accounts, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBase {
    users: Vec<User>,
}

impl UserBase {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let users: Vec<User> =
            serde_json::from_str(json).map_err(|e| SimError::Json(e.to_string()))?;
        Ok(Self::new(users))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = fs::read_to_string(path).map_err(|e| SimError::Io(e.to_string()))?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let json =
            serde_json::to_string_pretty(&self.users).map_err(|e| SimError::Json(e.to_string()))?;
        fs::write(path, json).map_err(|e| SimError::Io(e.to_string()))
    }

    /// Generate the stock userbase: one account per first-initial/surname
    /// pair plus the usual service accounts, each with a random password
    /// and 1-3 assigned addresses.
    pub fn synthesize(rng: &mut StdRng) -> Self {
        let mut users = Vec::new();
        for first in 'a'..='z' {
            for surname in SURNAMES {
                users.push(Self::make_user(rng, format!("{}{}", first, surname)));
            }
        }
        for account in SERVICE_ACCOUNTS {
            users.push(Self::make_user(rng, account.to_string()));
        }
        Self::new(users)
    }

    fn make_user(rng: &mut StdRng, username: String) -> User {
        User {
            username,
            password: Alphanumeric.sample_string(rng, PASSWORD_LEN),
            ips: ip::assign(rng),
        }
    }
}
