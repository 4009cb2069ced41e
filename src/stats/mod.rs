/// Scoreboard statistics
///
/// Holds the parsed stat record, the metrics derived from it and the verdict
/// classifier that turns both into a coaching category.
pub mod metrics;
pub mod record;
pub mod verdict;

pub use metrics::DerivedMetrics;
pub use record::{CandidateLine, StatRecord};
pub use verdict::{classify, VerdictCategory};
