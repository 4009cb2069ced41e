/// Derived performance metrics
use serde::{Deserialize, Serialize};

use super::record::StatRecord;

/// Metrics computed from a `StatRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Kills divided by deaths, rounded to two decimal places.
    /// Equals the raw kill count when there were no deaths.
    pub kd_ratio: f64,
}

impl DerivedMetrics {
    pub fn derive(record: &StatRecord) -> Self {
        Self {
            kd_ratio: kd_ratio(record.kills, record.deaths),
        }
    }
}

/// Kill/death ratio rounded to hundredths.
///
/// The float quotient is rounded as written in decimal, so a tie is decided
/// by the quotient's binary value: 1/40 is slightly above 0.025 and gives 0.03.
pub fn kd_ratio(kills: u32, deaths: u32) -> f64 {
    if deaths == 0 {
        return f64::from(kills);
    }

    let quotient = f64::from(kills) / f64::from(deaths);
    format!("{:.2}", quotient).parse().unwrap_or(quotient)
}
