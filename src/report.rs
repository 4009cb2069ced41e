//! Match report produced by the pipeline and its text/JSON renderings.

use serde::Serialize;

use crate::stats::{classify, DerivedMetrics, StatRecord, VerdictCategory};

/// Everything the pipeline concludes about one scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchReport {
    pub record: StatRecord,
    pub metrics: DerivedMetrics,
    pub verdict: VerdictCategory,
}

impl MatchReport {
    /// Derive metrics and classify a parsed record.
    pub fn from_record(record: StatRecord) -> Self {
        let metrics = DerivedMetrics::derive(&record);
        let verdict = classify(&record, &metrics);
        Self {
            record,
            metrics,
            verdict,
        }
    }

    /// Human-readable dashboard
    pub fn render_text(&self) -> String {
        let StatRecord {
            combat_score,
            kills,
            deaths,
            assists,
        } = self.record;

        let mut out = String::new();
        out.push_str("Match Data Extracted Successfully!\n\n");
        out.push_str(&format!(
            "  Kills: {kills} | Deaths: {deaths} | Assists: {assists}\n"
        ));
        out.push_str(&format!("  K/D Ratio: {}\n", format_ratio(self.metrics.kd_ratio)));
        out.push_str(&format!("  Combat Score: {combat_score}\n\n"));
        out.push_str(&format!("Verdict: {}\n", self.verdict.headline()));
        out.push_str(&format!("Advice: {}\n", self.verdict.advice()));
        out
    }

    /// Pretty JSON with the verdict headline and advice inlined
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "record": self.record,
            "metrics": self.metrics,
            "verdict": self.verdict,
            "headline": self.verdict.headline(),
            "advice": self.verdict.advice(),
        }))
    }
}

/// Ratios print with up to two decimals and without trailing zeros.
fn format_ratio(ratio: f64) -> String {
    let fixed = format!("{ratio:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
