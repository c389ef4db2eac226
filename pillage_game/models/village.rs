use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pillage_types::{
    buildings::{BuildingId, BuildingKind},
    common::{ResourceGroup, VillageId},
    map::Position,
    research::ResearchName,
    units::UnitName,
};

use super::{
    buildings::{Building, BuildingBlueprint},
    research::Research,
    units::Unit,
};

/// A free tile of the village grid. Some tiles are reserved for one
/// building kind (the wall ring, the coast for harbors).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_building: Option<BuildingKind>,
}

/// Snapshot of a village as served by the game server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Village {
    #[serde(rename = "villageId", alias = "id")]
    pub id: VillageId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default)]
    pub population: u32,
    #[serde(default)]
    pub population_left: u32,
    #[serde(rename = "villageResources", alias = "resources", default)]
    pub resources: ResourceGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_limit: Option<u32>,
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub valid_build_positions: Vec<BuildPosition>,
    #[serde(
        rename = "buildingsThatCanBeBuild",
        alias = "buildableOptions",
        default
    )]
    pub buildable_options: Vec<BuildingBlueprint>,
    #[serde(default, with = "units_in_village")]
    pub units_in_village: BTreeMap<UnitName, u32>,
    #[serde(default)]
    pub available_researches: Vec<Research>,
    #[serde(default)]
    pub completed_researches: Vec<Research>,
    #[serde(default)]
    pub incoming_attacks: Vec<Value>,
    #[serde(default)]
    pub outgoing_attacks: Vec<Value>,
}

impl Village {
    pub fn building(&self, building_id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.building_id == building_id)
    }

    pub fn building_mut(&mut self, building_id: BuildingId) -> Option<&mut Building> {
        self.buildings
            .iter_mut()
            .find(|b| b.building_id == building_id)
    }

    pub fn building_at(&self, position: Position) -> Option<&Building> {
        self.buildings.iter().find(|b| b.position == position)
    }

    pub fn blueprint(&self, kind: BuildingKind) -> Option<&BuildingBlueprint> {
        self.buildable_options.iter().find(|b| b.name == kind)
    }

    /// Looks a unit definition up across every building of the village.
    pub fn unit_definition(&self, unit: UnitName) -> Option<&Unit> {
        self.buildings.iter().find_map(|b| b.unit_data(unit))
    }

    /// Looks a research up by name, available ones first.
    pub fn research(&self, name: ResearchName) -> Option<&Research> {
        self.available_researches
            .iter()
            .chain(self.completed_researches.iter())
            .find(|r| r.research_name == name)
    }

    pub fn has_completed_research(&self, name: ResearchName) -> bool {
        self.completed_researches
            .iter()
            .any(|r| r.research_name == name)
    }

    pub fn units_of(&self, unit: UnitName) -> u32 {
        self.units_in_village.get(&unit).copied().unwrap_or(0)
    }

    /// Provisional id for a building placed locally, replaced by the server's
    /// own id on the next snapshot.
    pub fn next_building_id(&self) -> BuildingId {
        self.buildings
            .iter()
            .map(|b| b.building_id)
            .max()
            .map_or(1, |id| id + 1)
    }

    /// Enforces the snapshot invariants: stocks capped at the storage limit
    /// and free population never above the total.
    pub fn normalize(&mut self) {
        if let Some(limit) = self.resource_limit {
            self.resources.clamp_to(limit);
        }
        self.population_left = self.population_left.min(self.population);
    }

    /// Removes a cost that has already been checked.
    pub(crate) fn spend(&mut self, cost: &ResourceGroup, population: u32) {
        self.resources.remove_resources(cost);
        self.population_left = self.population_left.saturating_sub(population);
    }
}

/// `unitsInVillage` arrives as `[{unit: {unitName}, amount}]`. A plain
/// `{name: amount}` map is accepted too. Duplicate entries are summed.
mod units_in_village {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use pillage_types::units::UnitName;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct UnitRef {
        unit_name: UnitName,
    }

    #[derive(Serialize, Deserialize)]
    struct Entry {
        unit: UnitRef,
        amount: u32,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        List(Vec<Entry>),
        Map(BTreeMap<UnitName, u32>),
    }

    pub fn serialize<S: Serializer>(
        units: &BTreeMap<UnitName, u32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        units
            .iter()
            .map(|(unit_name, amount)| Entry {
                unit: UnitRef {
                    unit_name: *unit_name,
                },
                amount: *amount,
            })
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<UnitName, u32>, D::Error> {
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Map(map) => map,
            Wire::List(entries) => {
                let mut map = BTreeMap::new();
                for entry in entries {
                    let amount = map.entry(entry.unit.unit_name).or_insert(0u32);
                    *amount = amount.saturating_add(entry.amount);
                }
                map
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{IdSequence, VillageFactoryOptions, village_factory};

    const SNAPSHOT: &str = r#"{
        "villageId": 7,
        "name": "Bjornholm",
        "population": 100,
        "populationLeft": 140,
        "villageResources": { "Wood": 1200, "Stone": 420, "Hop": 3, "Beer": 0 },
        "resourceLimit": 1000,
        "buildings": [
            {
                "buildingId": 1,
                "name": "Headquarters",
                "level": 2,
                "position": { "x": 6, "y": 6 },
                "constructionTime": "00:05:00"
            }
        ],
        "validBuildPositions": [
            { "name": "plot", "position": { "x": 2, "y": 2 } },
            { "position": { "x": 10, "y": 4 }, "allowedBuilding": "Wall" }
        ],
        "buildingsThatCanBeBuild": [
            {
                "name": "House",
                "description": "More room for villagers",
                "resourcesRequiredLevelUp": { "Wood": 50, "Stone": 30 },
                "populationRequiredNextLevel": 5,
                "constructionTime": "00:05:00"
            }
        ],
        "unitsInVillage": [
            { "unit": { "unitName": "Spear" }, "amount": 10 },
            { "unit": { "unitName": "Axe" }, "amount": 2 },
            { "unit": { "unitName": "Spear" }, "amount": 5 }
        ],
        "completedResearches": [ { "researchName": "Spear" } ],
        "incomingAttacks": [],
        "outgoingAttacks": [ { "target": 9 } ]
    }"#;

    #[test]
    fn test_village_from_snapshot() {
        let village: Village = serde_json::from_str(SNAPSHOT).unwrap();

        assert_eq!(village.id, 7);
        assert_eq!(village.units_of(UnitName::Spear), 15);
        assert_eq!(village.units_of(UnitName::Axe), 2);
        assert_eq!(village.units_of(UnitName::Bow), 0);
        assert!(village.has_completed_research(ResearchName::Spear));
        assert_eq!(
            village.valid_build_positions[1].allowed_building,
            Some(BuildingKind::Wall)
        );
        assert!(village.blueprint(BuildingKind::House).is_some());
        assert!(village.building_at(Position::new(6, 6)).is_some());
        assert_eq!(village.next_building_id(), 2);
        assert_eq!(village.outgoing_attacks.len(), 1);
    }

    #[test]
    fn test_normalize_clamps_snapshot() {
        let mut village: Village = serde_json::from_str(SNAPSHOT).unwrap();
        village.normalize();

        assert_eq!(village.resources, ResourceGroup::new(1000, 420, 3, 0));
        assert_eq!(village.population_left, 100);
    }

    #[test]
    fn test_units_accept_map_shape() {
        let village: Village = serde_json::from_str(
            r#"{ "id": 3, "unitsInVillage": { "Spear": 4, "Bow": 1 } }"#,
        )
        .unwrap();

        assert_eq!(village.id, 3);
        assert_eq!(village.units_of(UnitName::Spear), 4);
        assert_eq!(village.units_of(UnitName::Bow), 1);
    }

    #[test]
    fn test_units_serialize_as_list() {
        let mut ids = IdSequence::default();
        let village = village_factory(VillageFactoryOptions::default(), &mut ids);

        let json = serde_json::to_value(&village).unwrap();
        assert_eq!(json["unitsInVillage"][0]["unit"]["unitName"], "Spear");
        assert_eq!(json["unitsInVillage"][0]["amount"], 10);
        assert!(json.get("villageResources").is_some());

        let back: Village = serde_json::from_value(json).unwrap();
        assert_eq!(back, village);
    }
}
