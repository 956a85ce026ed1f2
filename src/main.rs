//! login-sim - synthetic login-attempt dataset generator
//!
//! Usage:
//!   login-sim seed-users --out users.json --seed 42
//!   login-sim generate --users users.json \
//!       --start 2026-01-05T00:00:00Z --end 2026-01-12T00:00:00Z \
//!       --seed 7 --attack-prob 0.1 --vary-ips \
//!       --attempts-out login_log.jsonl --attacks-out attack_log.jsonl

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use login_sim::{ArrivalRateTable, SimConfig, SimError, Simulator, UserBase, profiles};

#[derive(Parser)]
#[command(name = "login-sim")]
#[command(about = "Labeled synthetic login traffic with brute-force episodes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a userbase file (usernames, passwords, assigned IPs)
    SeedUsers {
        /// Where to write the userbase JSON
        #[arg(short, long, default_value = "users.json")]
        out: PathBuf,

        /// RNG seed for reproducible userbases
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },

    /// Run a simulation and export both record streams as JSON Lines
    Generate {
        /// Userbase JSON produced by seed-users
        #[arg(short, long)]
        users: PathBuf,

        /// Window start (RFC 3339, e.g. 2026-01-05T00:00:00Z)
        #[arg(long, value_parser = parse_utc)]
        start: DateTime<Utc>,

        /// Window end (RFC 3339), inclusive; must be after start
        #[arg(long, value_parser = parse_utc)]
        end: DateTime<Utc>,

        /// RNG seed; a fixed seed replays the exact same dataset
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Per-tick attack trigger probability
        #[arg(long, default_value_t = login_sim::config::DEFAULT_ATTACK_PROB)]
        attack_prob: f64,

        /// Probability an episode targets the whole userbase
        #[arg(long, default_value_t = login_sim::config::DEFAULT_TRY_ALL_USERS_PROB)]
        try_all_users_prob: f64,

        /// Draw a fresh attacker IP per guess instead of one per episode
        #[arg(long)]
        vary_ips: bool,

        /// Legitimate-user password success probability
        #[arg(long, default_value_t = login_sim::config::DEFAULT_VALID_SUCCESS_PROB)]
        valid_success_prob: f64,

        /// Attacker guess success probability
        #[arg(long, default_value_t = login_sim::config::DEFAULT_ATTACKER_SUCCESS_PROB)]
        attacker_success_prob: f64,

        /// Legitimate-user username typo probability
        #[arg(long, default_value_t = login_sim::config::DEFAULT_VALID_TYPO_PROB)]
        valid_typo_prob: f64,

        /// Attacker username typo probability
        #[arg(long, default_value_t = login_sim::config::DEFAULT_ATTACKER_TYPO_PROB)]
        attacker_typo_prob: f64,

        /// Arrival-rate profile for legitimate traffic
        #[arg(long, value_enum, default_value = "office-hours")]
        profile: Profile,

        /// Hourly rate for the uniform profile
        #[arg(long, default_value = "3.0")]
        rate: f64,

        /// Where to write the login-attempt stream
        #[arg(long, default_value = "login_log.jsonl")]
        attempts_out: PathBuf,

        /// Where to write the attack-episode stream
        #[arg(long, default_value = "attack_log.jsonl")]
        attacks_out: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Profile {
    OfficeHours,
    Uniform,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SimError> {
    match cli.command {
        Commands::SeedUsers { out, seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let users = UserBase::synthesize(&mut rng);
            users.save(&out)?;
            info!(users = users.len(), path = %out.display(), "userbase written");
            Ok(())
        }
        Commands::Generate {
            users,
            start,
            end,
            seed,
            attack_prob,
            try_all_users_prob,
            vary_ips,
            valid_success_prob,
            attacker_success_prob,
            valid_typo_prob,
            attacker_typo_prob,
            profile,
            rate,
            attempts_out,
            attacks_out,
        } => {
            let userbase = UserBase::from_path(&users)?;
            let rates = match profile {
                Profile::OfficeHours => profiles::office_hours(),
                Profile::Uniform => ArrivalRateTable::uniform(rate)?,
            };
            let config = SimConfig {
                attack_prob,
                try_all_users_prob,
                vary_ips,
                valid_success_prob,
                attacker_success_prob,
                valid_typo_prob,
                attacker_typo_prob,
                seed,
            };

            let log = Simulator::new(userbase, rates, start, end, config)?.run()?;

            write_jsonl(&attempts_out, &log.attempts)?;
            write_jsonl(&attacks_out, &log.episodes)?;
            info!(
                attempts = log.attempt_count(),
                attack_attempts = log.attack_attempt_count(),
                episodes = log.episode_count(),
                attempts_out = %attempts_out.display(),
                attacks_out = %attacks_out.display(),
                "dataset written"
            );
            Ok(())
        }
    }
}

/// One JSON object per line, in emission (timestamp) order.
fn write_jsonl<T: Serialize>(path: &PathBuf, records: &[T]) -> Result<(), SimError> {
    let file = File::create(path).map_err(|e| SimError::Io(e.to_string()))?;
    let mut out = BufWriter::new(file);
    for record in records {
        let line = serde_json::to_string(record).map_err(|e| SimError::Json(e.to_string()))?;
        writeln!(out, "{}", line).map_err(|e| SimError::Io(e.to_string()))?;
    }
    out.flush().map_err(|e| SimError::Io(e.to_string()))
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("not an RFC 3339 timestamp: {}", e))
}
