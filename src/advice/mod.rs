//! Coaching advice from an external text-generation service.
//!
//! The scanner never depends on this module: advice is requested after a
//! `StatRecord` exists, and a failure here is reported on its own without
//! touching the extracted stats.

pub mod gemini;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AdviceError;
use crate::stats::StatRecord;

pub use gemini::{api_key_from_env, GeminiClient};

/// Player's current rank bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SkillTier {
    IronBronze,
    SilverGold,
    PlatinumDiamond,
    AscendantPlus,
}

impl SkillTier {
    pub fn label(self) -> &'static str {
        match self {
            SkillTier::IronBronze => "Iron/Bronze",
            SkillTier::SilverGold => "Silver/Gold",
            SkillTier::PlatinumDiamond => "Platinum/Diamond",
            SkillTier::AscendantPlus => "Ascendant+",
        }
    }
}

/// Role of the agent played in the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RoleCategory {
    Duelist,
    Controller,
    Initiator,
    Sentinel,
}

impl RoleCategory {
    pub fn label(self) -> &'static str {
        match self {
            RoleCategory::Duelist => "Duelist (Jett/Reyna/Raze)",
            RoleCategory::Controller => "Controller (Omen/Clove/Viper)",
            RoleCategory::Initiator => "Initiator (Sova/Fade/Skye)",
            RoleCategory::Sentinel => "Sentinel (Killjoy/Cypher/Sage)",
        }
    }
}

/// Input to the advice generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceRequest {
    pub record: StatRecord,
    pub tier: SkillTier,
    pub role: RoleCategory,
}

impl AdviceRequest {
    pub fn new(record: StatRecord, tier: SkillTier, role: RoleCategory) -> Self {
        Self { record, tier, role }
    }

    /// Coaching prompt sent to the model
    pub fn prompt(&self) -> String {
        let StatRecord {
            combat_score,
            kills,
            deaths,
            assists,
        } = self.record;

        format!(
            "You are a professional Radiant-level Valorant coach.\n\
             Your student is currently in {tier} and played a {role} in their last match.\n\
             Their stats were: {kills} Kills, {deaths} Deaths, {assists} Assists, and a Combat Score of {combat_score}.\n\
             \n\
             Please provide a highly structured, analytical response formatted in Markdown:\n\
             1. **Performance Verdict:** A harsh but fair 2-sentence analysis of their K/D/A based on their role.\n\
             2. **Actionable Steps:** 3 concrete, step-by-step things they need to practice in the range or deathmatch to fix their specific issues.\n\
             3. **Recommended Resources:** Specific YouTube creators, aim training routines (like Voltaic), or websites they should use to study their role.\n",
            tier = self.tier.label(),
            role = self.role.label(),
        )
    }
}

/// Anything that can turn an advice request into free-form coaching text
pub trait AdviceGenerator {
    fn generate(&self, request: &AdviceRequest) -> Result<String, AdviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_context_and_stats() {
        let request = AdviceRequest::new(
            StatRecord::new(189, 14, 15, 5),
            SkillTier::SilverGold,
            RoleCategory::Initiator,
        );
        let prompt = request.prompt();

        assert!(prompt.contains("currently in Silver/Gold"));
        assert!(prompt.contains("played a Initiator (Sova/Fade/Skye)"));
        assert!(prompt.contains("14 Kills, 15 Deaths, 5 Assists, and a Combat Score of 189."));
        assert!(prompt.contains("**Actionable Steps:**"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(SkillTier::AscendantPlus.label(), "Ascendant+");
        assert_eq!(RoleCategory::Sentinel.label(), "Sentinel (Killjoy/Cypher/Sage)");
    }

    #[test]
    fn test_cli_value_names() {
        let tier = SkillTier::from_str("platinum-diamond", true).unwrap();
        assert_eq!(tier, SkillTier::PlatinumDiamond);

        let role = RoleCategory::from_str("controller", true).unwrap();
        assert_eq!(role, RoleCategory::Controller);
    }
}
