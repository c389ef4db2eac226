use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{EnumIter, EnumString};

use crate::common::ResourceKind;

pub type BuildingId = u64;

#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Deserialize, Serialize, EnumIter, EnumString,
)]
pub enum BuildingKind {
    Headquarters,
    House,
    Lumberyard,
    Mine,
    Farm,
    Tavern,
    Storage,
    Barracks,
    Harbor,
    Smith,
    Wall,
    DefenceTower,
    CharcoalKiln,
}

impl BuildingKind {
    /// Buildings that train units.
    pub fn is_production_building(&self) -> bool {
        matches!(self, BuildingKind::Barracks | BuildingKind::Harbor)
    }

    /// Buildings that carry out researches.
    pub fn is_research_building(&self) -> bool {
        matches!(self, BuildingKind::Smith)
    }

    /// The resource this kind of building produces, if any.
    pub fn generated_resource(&self) -> Option<ResourceKind> {
        match self {
            BuildingKind::Lumberyard => Some(ResourceKind::Wood),
            BuildingKind::Mine => Some(ResourceKind::Stone),
            BuildingKind::Farm => Some(ResourceKind::Hop),
            BuildingKind::Tavern => Some(ResourceKind::Beer),
            _ => None,
        }
    }

    /// The resource another building must produce for this one to operate.
    pub fn required_resource(&self) -> Option<ResourceKind> {
        match self {
            BuildingKind::Tavern => Some(ResourceKind::Hop),
            _ => None,
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildingKind::Headquarters => "Headquarters",
            BuildingKind::House => "House",
            BuildingKind::Lumberyard => "Lumberyard",
            BuildingKind::Mine => "Mine",
            BuildingKind::Farm => "Farm",
            BuildingKind::Tavern => "Tavern",
            BuildingKind::Storage => "Storage",
            BuildingKind::Barracks => "Barracks",
            BuildingKind::Harbor => "Harbor",
            BuildingKind::Smith => "Smith",
            BuildingKind::Wall => "Wall",
            BuildingKind::DefenceTower => "Defence Tower",
            BuildingKind::CharcoalKiln => "Charcoal Kiln",
        };

        f.write_str(name)
    }
}
