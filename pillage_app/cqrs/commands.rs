use std::collections::BTreeMap;

use pillage_types::{
    buildings::{BuildingId, BuildingKind},
    common::VillageId,
    map::Position,
    research::ResearchName,
    units::UnitName,
};

use crate::cqrs::Command;

#[derive(Debug, Clone)]
pub struct BuildBuilding {
    pub village_id: VillageId,
    pub kind: BuildingKind,
    pub position: Position,
}

impl Command for BuildBuilding {
    fn village_id(&self) -> VillageId {
        self.village_id
    }
}

#[derive(Debug, Clone)]
pub struct LevelUpBuilding {
    pub village_id: VillageId,
    pub building_id: BuildingId,
}

impl Command for LevelUpBuilding {
    fn village_id(&self) -> VillageId {
        self.village_id
    }
}

#[derive(Debug, Clone)]
pub struct TrainUnits {
    pub village_id: VillageId,
    pub building_id: BuildingId,
    pub unit: UnitName,
    pub amount: u32,
}

impl Command for TrainUnits {
    fn village_id(&self) -> VillageId {
        self.village_id
    }
}

#[derive(Debug, Clone)]
pub struct StartResearch {
    pub village_id: VillageId,
    pub building_id: BuildingId,
    pub research: ResearchName,
}

impl Command for StartResearch {
    fn village_id(&self) -> VillageId {
        self.village_id
    }
}

#[derive(Debug, Clone)]
pub struct LaunchAttack {
    pub village_id: VillageId,
    pub target_village_id: VillageId,
    pub units: BTreeMap<UnitName, u32>,
}

impl Command for LaunchAttack {
    fn village_id(&self) -> VillageId {
        self.village_id
    }
}
