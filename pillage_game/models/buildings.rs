use serde::{Deserialize, Serialize};

use pillage_types::{
    buildings::{BuildingId, BuildingKind},
    common::{GameDuration, ResourceGroup, ResourceKind},
    map::Position,
    units::UnitName,
};

use crate::calculators::{
    charcoal_kiln_construction_time, charcoal_kiln_cost, house_capacity, production_per_hour,
};

use super::{
    research::Research,
    units::{Unit, UnitUnlock, UnlockedUnit},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub building_id: BuildingId,
    pub name: BuildingKind,
    #[serde(default = "first_level")]
    pub level: u32,
    pub position: Position,
    #[serde(default)]
    pub is_under_construction: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generates_resource: Option<ResourceKind>,
    #[serde(
        default,
        alias = "requiresResource",
        skip_serializing_if = "Option::is_none"
    )]
    pub requires_resources: Option<ResourceKind>,
    #[serde(default)]
    pub resources_required_level_up: ResourceGroup,
    #[serde(default)]
    pub population_required_next_level: u32,
    #[serde(default)]
    pub construction_time: GameDuration,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unlocked_units_data: Vec<UnlockedUnit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units_unlocked_at_level: Vec<UnitUnlock>,
    #[serde(default)]
    pub is_research_in_progress: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_research: Option<Research>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_time_left: Option<GameDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_building: Option<BuildingKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_per_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// What the next level of a building is worth, for the level-up dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPreview {
    pub level: u32,
    pub resources_per_hour: Option<(ResourceKind, u32)>,
    pub population_capacity: Option<u32>,
}

impl Building {
    /// Level from which `unit` can be trained here, looking at both unlock
    /// lists. `None` if the building never offers it.
    pub fn unlock_level(&self, unit: UnitName) -> Option<u32> {
        self.unlocked_units_data
            .iter()
            .filter(|u| u.unit.unit_name == unit)
            .map(|u| u.level_unlocked)
            .chain(
                self.units_unlocked_at_level
                    .iter()
                    .filter(|u| u.unit_type == unit)
                    .map(|u| u.level),
            )
            .min()
    }

    /// Full unit definition, when this building carries it.
    pub fn unit_data(&self, unit: UnitName) -> Option<&Unit> {
        self.unlocked_units_data
            .iter()
            .map(|u| &u.unit)
            .find(|u| u.unit_name == unit)
    }

    /// Units trainable at the current level.
    pub fn unlocked_units(&self) -> Vec<UnitName> {
        let mut units: Vec<UnitName> = self
            .unlocked_units_data
            .iter()
            .map(|u| (u.unit.unit_name, u.level_unlocked))
            .chain(
                self.units_unlocked_at_level
                    .iter()
                    .map(|u| (u.unit_type, u.level)),
            )
            .filter(|(_, level)| *level <= self.level)
            .map(|(unit, _)| unit)
            .collect();
        units.sort();
        units.dedup();
        units
    }

    pub fn next_level_preview(&self) -> LevelPreview {
        let next = self.level.saturating_add(1);
        let level = i32::try_from(next).unwrap_or(i32::MAX);

        LevelPreview {
            level: next,
            resources_per_hour: self
                .name
                .generated_resource()
                .map(|kind| (kind, production_per_hour(kind, level))),
            population_capacity: (self.name == BuildingKind::House)
                .then(|| house_capacity(level)),
        }
    }
}

/// A building that can be placed but is not in the village yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingBlueprint {
    pub name: BuildingKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resources_required_level_up: ResourceGroup,
    #[serde(default)]
    pub population_required_next_level: u32,
    #[serde(default)]
    pub construction_time: GameDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generates_resource: Option<ResourceKind>,
    #[serde(
        default,
        alias = "requiresResource",
        skip_serializing_if = "Option::is_none"
    )]
    pub requires_resources: Option<ResourceKind>,
}

impl BuildingBlueprint {
    /// The level-1 building this blueprint turns into while it is being built.
    /// Its level-up cost is the blueprint's, except for kinds whose curve is
    /// known locally.
    pub fn to_building(&self, building_id: BuildingId, position: Position) -> Building {
        let (resources_required_level_up, construction_time) = match self.name {
            BuildingKind::CharcoalKiln => {
                (charcoal_kiln_cost(1), charcoal_kiln_construction_time(1))
            }
            _ => (self.resources_required_level_up, self.construction_time),
        };

        Building {
            building_id,
            name: self.name,
            level: 1,
            position,
            is_under_construction: true,
            generates_resource: self.generates_resource,
            requires_resources: self.requires_resources,
            resources_required_level_up,
            population_required_next_level: self.population_required_next_level,
            construction_time,
            unlocked_units_data: vec![],
            units_unlocked_at_level: vec![],
            is_research_in_progress: false,
            current_research: None,
            research_time_left: None,
            allowed_building: None,
            resources_per_hour: None,
            population_capacity: None,
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
        }
    }
}

fn first_level() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        BuildingFactoryOptions, IdSequence, UnitFactoryOptions, blueprint_factory,
        building_factory, unit_factory,
    };

    #[test]
    fn test_building_from_wire() {
        let json = r#"{
            "buildingId": 3,
            "name": "Tavern",
            "level": 2,
            "position": { "x": 4, "y": 7 },
            "isUnderConstruction": false,
            "generatesResource": "Beer",
            "requiresResource": "Hop",
            "resourcesRequiredLevelUp": { "Wood": 55, "Stone": 45, "Hop": 20 },
            "populationRequiredNextLevel": 8,
            "constructionTime": 120
        }"#;

        let building: Building = serde_json::from_str(json).unwrap();
        assert_eq!(building.name, BuildingKind::Tavern);
        assert_eq!(building.requires_resources, Some(ResourceKind::Hop));
        assert_eq!(building.construction_time.to_string(), "00:02:00");
        assert!(building.unlocked_units_data.is_empty());
    }

    #[test]
    fn test_unlock_level_uses_lowest_entry() {
        let mut ids = IdSequence::default();
        let spear = unit_factory(UnitFactoryOptions::default());
        let mut barracks = building_factory(
            BuildingFactoryOptions {
                kind: Some(BuildingKind::Barracks),
                level: Some(2),
                unlocked_units: vec![(spear, 3)],
                ..Default::default()
            },
            &mut ids,
        );
        barracks.units_unlocked_at_level.push(UnitUnlock {
            unit_type: UnitName::Spear,
            level: 1,
        });

        assert_eq!(barracks.unlock_level(UnitName::Spear), Some(1));
        assert_eq!(barracks.unlock_level(UnitName::Axe), None);
        assert!(barracks.unit_data(UnitName::Spear).is_some());
        assert_eq!(barracks.unlocked_units(), vec![UnitName::Spear]);
    }

    #[test]
    fn test_next_level_preview() {
        let mut ids = IdSequence::default();
        let house = building_factory(
            BuildingFactoryOptions {
                kind: Some(BuildingKind::House),
                level: Some(1),
                ..Default::default()
            },
            &mut ids,
        );
        let preview = house.next_level_preview();
        assert_eq!(preview.level, 2);
        assert_eq!(preview.population_capacity, Some(49));
        assert_eq!(preview.resources_per_hour, None);

        let lumberyard = building_factory(
            BuildingFactoryOptions {
                kind: Some(BuildingKind::Lumberyard),
                level: Some(4),
                ..Default::default()
            },
            &mut ids,
        );
        assert_eq!(
            lumberyard.next_level_preview().resources_per_hour,
            Some((ResourceKind::Wood, 102))
        );
    }

    #[test]
    fn test_charcoal_kiln_follows_its_cost_curve() {
        let blueprint = blueprint_factory(BuildingKind::CharcoalKiln);
        assert_eq!(
            blueprint.resources_required_level_up,
            ResourceGroup::new(45, 80, 0, 0)
        );
        assert_eq!(blueprint.construction_time.as_secs(), 40);

        let kiln = blueprint.to_building(9, Position::new(3, 3));
        assert_eq!(kiln.level, 1);
        assert_eq!(kiln.resources_required_level_up, ResourceGroup::new(50, 110, 0, 0));
        assert_eq!(kiln.construction_time.to_string(), "00:01:10");
    }
}
