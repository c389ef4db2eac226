use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Researches a Smith can carry out. Most unlock the unit of the same name.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum ResearchName {
    Spear,
    Axe,
    Shield,
    Bow,
    Jarl,
    BattleShip,
}
