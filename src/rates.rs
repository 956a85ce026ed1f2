//! Arrival Rate Model
//!
//! Maps (weekday, hour-of-day) to the expected hourly rate of legitimate
//! logins. The table must cover all 168 buckets at construction time and is
//! immutable afterwards; lookup is a pure read with no side effects.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::core::SimError;

const WEEKDAYS: u8 = 7;
const HOURS: u8 = 24;

/// Expected legitimate logins per hour, bucketed by weekday (0 = Monday)
/// and hour of day.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalRateTable {
    rates: [[f64; HOURS as usize]; WEEKDAYS as usize],
}

impl ArrivalRateTable {
    /// Build from an explicit bucket map. Fails on the first missing bucket
    /// or any negative/non-finite rate.
    pub fn from_map(buckets: &HashMap<(u8, u8), f64>) -> Result<Self, SimError> {
        let mut rates = [[0.0; HOURS as usize]; WEEKDAYS as usize];
        for weekday in 0..WEEKDAYS {
            for hour in 0..HOURS {
                let rate = *buckets
                    .get(&(weekday, hour))
                    .ok_or(SimError::MissingRateBucket { weekday, hour })?;
                if !rate.is_finite() || rate < 0.0 {
                    return Err(SimError::InvalidRate { weekday, hour, rate });
                }
                rates[weekday as usize][hour as usize] = rate;
            }
        }
        Ok(Self { rates })
    }

    /// Build by evaluating `f(weekday, hour)` over every bucket.
    pub fn from_fn(f: impl Fn(u8, u8) -> f64) -> Result<Self, SimError> {
        let mut rates = [[0.0; HOURS as usize]; WEEKDAYS as usize];
        for weekday in 0..WEEKDAYS {
            for hour in 0..HOURS {
                let rate = f(weekday, hour);
                if !rate.is_finite() || rate < 0.0 {
                    return Err(SimError::InvalidRate { weekday, hour, rate });
                }
                rates[weekday as usize][hour as usize] = rate;
            }
        }
        Ok(Self { rates })
    }

    /// Same rate in every bucket.
    pub fn uniform(rate: f64) -> Result<Self, SimError> {
        Self::from_fn(|_, _| rate)
    }

    /// λ for the bucket `t` falls into. A zero rate is valid: no legitimate
    /// traffic expected in that hour.
    pub fn rate_at(&self, t: DateTime<Utc>) -> f64 {
        let weekday = t.weekday().num_days_from_monday() as usize;
        let hour = t.hour() as usize;
        self.rates[weekday][hour]
    }
}

/// Preset rate tables.
pub mod profiles {
    use super::ArrivalRateTable;

    /// Office-hours calibration: weekday working hours busy, nights quiet,
    /// weekends moderate.
    pub fn office_hours() -> ArrivalRateTable {
        ArrivalRateTable::from_fn(|weekday, hour| {
            let weekend = weekday >= 5;
            match hour {
                0..=4 => 0.25,
                5..=8 => {
                    if weekend {
                        0.75
                    } else {
                        1.5
                    }
                }
                9..=17 => {
                    if weekend {
                        1.5
                    } else {
                        2.75
                    }
                }
                18..=22 => {
                    if weekend {
                        1.75
                    } else {
                        2.0
                    }
                }
                _ => 0.5,
            }
        })
        .unwrap()
    }
}
