mod http;

pub use http::HttpGameApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pillage_game::models::village::Village;
use pillage_types::{
    buildings::{BuildingId, BuildingKind},
    common::VillageId,
    errors::ApplicationError,
    map::Position,
    research::ResearchName,
    units::UnitName,
};

/// The game server, as seen by the client. Every mutating call answers with
/// the authoritative village, except attacks which only return a message.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn list_villages(&self) -> Result<Vec<VillageSummary>, ApplicationError>;
    async fn get_village(&self, village_id: VillageId) -> Result<Village, ApplicationError>;
    async fn build(&self, request: &BuildRequest) -> Result<Village, ApplicationError>;
    async fn level_up(&self, request: &LevelUpRequest) -> Result<Village, ApplicationError>;
    async fn train(&self, request: &TrainRequest) -> Result<Village, ApplicationError>;
    async fn start_research(
        &self,
        request: &ResearchRequest,
    ) -> Result<Village, ApplicationError>;
    async fn world_map(&self) -> Result<WorldMap, ApplicationError>;
    async fn attack(&self, request: &AttackRequest) -> Result<String, ApplicationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageSummary {
    #[serde(alias = "id")]
    pub village_id: VillageId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldVillage {
    #[serde(alias = "id")]
    pub village_id: VillageId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
}

/// World map as served by `/api/world`. Tiles are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMap {
    #[serde(default)]
    pub villages: Vec<WorldVillage>,
    #[serde(default)]
    pub tiles: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub village_id: VillageId,
    pub building_type: BuildingKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpRequest {
    pub village_id: VillageId,
    pub building_id: BuildingId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRequest {
    pub village_id: VillageId,
    pub production_building_id: BuildingId,
    pub unit_type: UnitName,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    pub village_id: VillageId,
    pub research_building_id: BuildingId,
    pub research_type: ResearchName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitAmount {
    pub unit_type: UnitName,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackRequest {
    pub from_village_id: VillageId,
    pub to_village_id: VillageId,
    pub units: Vec<UnitAmount>,
}
