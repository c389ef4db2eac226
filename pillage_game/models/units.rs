use serde::{Deserialize, Serialize};

use pillage_types::{
    common::{GameDuration, ResourceGroup},
    research::ResearchName,
    units::UnitName,
};

/// Static definition of a trainable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub unit_name: UnitName,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defence: u32,
    #[serde(default)]
    pub health: u32,
    #[serde(default)]
    pub speed: u32,
    #[serde(default)]
    pub resources_required_to_produce: ResourceGroup,
    #[serde(default)]
    pub population_required_per_unit: u32,
    #[serde(default)]
    pub base_time_to_produce: GameDuration,
    #[serde(default)]
    pub research_required: Option<ResearchName>,
}

impl Unit {
    /// Resources needed to train `amount` units.
    pub fn cost_for(&self, amount: u32) -> ResourceGroup {
        self.resources_required_to_produce * amount
    }

    /// Population needed to train `amount` units.
    pub fn population_for(&self, amount: u32) -> u32 {
        self.population_required_per_unit.saturating_mul(amount)
    }

    /// Time the whole batch takes, units being trained one after the other.
    pub fn production_time(&self, amount: u32) -> GameDuration {
        GameDuration::from_secs(
            self.base_time_to_produce
                .as_secs()
                .saturating_mul(amount as u64),
        )
    }
}

/// A unit offered by a production building, available from `level_unlocked` on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedUnit {
    pub unit: Unit,
    #[serde(default = "first_level")]
    pub level_unlocked: u32,
}

/// Compact unlock entry, naming the unit only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitUnlock {
    pub unit_type: UnitName,
    pub level: u32,
}

fn first_level() -> u32 {
    1
}
