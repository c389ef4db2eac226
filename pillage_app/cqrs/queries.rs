use pillage_game::models::village::Village;
use pillage_types::common::VillageId;

use crate::{
    api::{VillageSummary, WorldMap},
    cqrs::Query,
};

/// Villages owned by the current session.
pub struct ListVillages;

impl Query for ListVillages {
    type Output = Vec<VillageSummary>;
}

pub struct GetVillage {
    pub village_id: VillageId,
}

impl Query for GetVillage {
    type Output = Village;
}

pub struct GetWorldMap;

impl Query for GetWorldMap {
    type Output = WorldMap;
}
