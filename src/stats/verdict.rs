/// Verdict classification
///
/// Maps a stat record and its derived metrics to a coaching verdict by
/// walking an ordered decision list. The first rule whose predicate holds
/// decides the verdict, so a poor K/D is reported even when assists or kills
/// are high.
use serde::{Deserialize, Serialize};

use super::metrics::DerivedMetrics;
use super::record::StatRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictCategory {
    UnderperformingDuels,
    HighImpactSupport,
    HardCarrying,
    AveragePerformance,
}

impl VerdictCategory {
    /// Short label shown next to the stats
    pub fn headline(self) -> &'static str {
        match self {
            VerdictCategory::UnderperformingDuels => "Underperforming in pure duels.",
            VerdictCategory::HighImpactSupport => "High Impact Support.",
            VerdictCategory::HardCarrying => "Hard Carrying.",
            VerdictCategory::AveragePerformance => "Average Performance.",
        }
    }

    /// Static coaching advice for this verdict
    pub fn advice(self) -> &'static str {
        match self {
            VerdictCategory::UnderperformingDuels => {
                "Your K/D is negative. Stop taking fair 50/50 fights. Focus on trading your \
                 teammates and using utility to blind/stun before swinging."
            }
            VerdictCategory::HighImpactSupport => {
                "You have great assist numbers. You are setting your team up perfectly. If you \
                 are losing, you need to communicate your utility timing better to your duelists."
            }
            VerdictCategory::HardCarrying => {
                "You are mechanically out-aiming the lobby. If you lost this match, it's a \
                 macro-strategy issue, not an aim issue. Start calling rotations."
            }
            VerdictCategory::AveragePerformance => {
                "You are trading evenly. To rank up, you need to find ways to secure 2 kills per \
                 round, usually by improving crosshair placement."
            }
        }
    }
}

impl std::fmt::Display for VerdictCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.headline())
    }
}

/// Predicate over a record and its metrics
pub type RulePredicate = fn(&StatRecord, &DerivedMetrics) -> bool;

/// One entry of the decision list
#[derive(Clone, Copy)]
pub struct VerdictRule {
    pub name: &'static str,
    pub predicate: RulePredicate,
    pub category: VerdictCategory,
}

const MIN_EVEN_RATIO: f64 = 1.0;
const SUPPORT_ASSISTS: u32 = 8;
const CARRY_KILLS: u32 = 20;

/// Rules in priority order. Evaluation stops at the first match.
pub const RULES: &[VerdictRule] = &[
    VerdictRule {
        name: "negative-kd",
        predicate: |_, metrics| metrics.kd_ratio < MIN_EVEN_RATIO,
        category: VerdictCategory::UnderperformingDuels,
    },
    VerdictRule {
        name: "high-assists",
        predicate: |record, _| record.assists > SUPPORT_ASSISTS,
        category: VerdictCategory::HighImpactSupport,
    },
    VerdictRule {
        name: "high-kills",
        predicate: |record, _| record.kills > CARRY_KILLS,
        category: VerdictCategory::HardCarrying,
    },
];

/// Fallback when no rule matches
pub const DEFAULT_VERDICT: VerdictCategory = VerdictCategory::AveragePerformance;

/// Classify a record against the built-in rule list.
pub fn classify(record: &StatRecord, metrics: &DerivedMetrics) -> VerdictCategory {
    classify_with(RULES, record, metrics)
}

/// Classify a record against an explicit rule list.
pub fn classify_with(
    rules: &[VerdictRule],
    record: &StatRecord,
    metrics: &DerivedMetrics,
) -> VerdictCategory {
    match rules.iter().find(|rule| (rule.predicate)(record, metrics)) {
        Some(rule) => {
            tracing::debug!("Verdict rule '{}' matched -> {:?}", rule.name, rule.category);
            rule.category
        }
        None => {
            tracing::debug!("No verdict rule matched -> {:?}", DEFAULT_VERDICT);
            DEFAULT_VERDICT
        }
    }
}
