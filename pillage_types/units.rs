use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

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
pub enum UnitName {
    Spear,
    Axe,
    Shield,
    Bow,
    Jarl,
    TransportShip,
    BattleShip,
}
