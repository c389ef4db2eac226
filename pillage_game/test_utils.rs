use std::{collections::BTreeMap, str::FromStr};

use rand::Rng;
use strum::IntoEnumIterator;

use pillage_types::{
    buildings::{BuildingId, BuildingKind},
    common::{GameDuration, ResourceGroup, VillageId},
    map::Position,
    research::ResearchName,
    units::UnitName,
};

use super::calculators::{charcoal_kiln_construction_time, charcoal_kiln_cost};
use super::models::{
    buildings::{Building, BuildingBlueprint},
    research::Research,
    units::{Unit, UnlockedUnit},
    village::{BuildPosition, Village},
};

/// Hands out synthetic ids to factories, so tests never share a counter.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1000)
    }
}

#[derive(Default, Clone)]
pub struct BuildingFactoryOptions {
    pub id: Option<BuildingId>,
    pub kind: Option<BuildingKind>,
    pub level: Option<u32>,
    pub position: Option<Position>,
    pub under_construction: bool,
    pub level_up_cost: Option<ResourceGroup>,
    pub population_next_level: Option<u32>,
    pub unlocked_units: Vec<(Unit, u32)>,
    pub research_in_progress: Option<Research>,
    pub allowed_building: Option<BuildingKind>,
}

#[derive(Default, Clone)]
pub struct UnitFactoryOptions {
    pub name: Option<UnitName>,
    pub cost: Option<ResourceGroup>,
    pub population: Option<u32>,
    /// `Some(None)` for a unit that needs no research.
    pub research_required: Option<Option<ResearchName>>,
}

#[derive(Default, Clone)]
pub struct ResearchFactoryOptions {
    pub name: Option<ResearchName>,
    pub building_level_requirement: Option<u32>,
    pub cost: Option<ResourceGroup>,
    pub seconds: Option<u64>,
}

#[derive(Default, Clone)]
pub struct VillageFactoryOptions {
    pub id: Option<VillageId>,
    pub name: Option<String>,
    pub population: Option<u32>,
    pub population_left: Option<u32>,
    pub resources: Option<ResourceGroup>,
    pub resource_limit: Option<u32>,
    pub buildings: Option<Vec<Building>>,
    pub extra_buildings: Vec<Building>,
    pub build_positions: Option<Vec<BuildPosition>>,
    pub units: Option<BTreeMap<UnitName, u32>>,
    pub available_researches: Vec<Research>,
    pub completed_researches: Vec<ResearchName>,
}

pub fn build_position(position: Position, allowed_building: Option<BuildingKind>) -> BuildPosition {
    BuildPosition {
        name: None,
        position,
        allowed_building,
    }
}

/// Level-1 template for `kind`, with the costs the game server ships.
pub fn blueprint_factory(kind: BuildingKind) -> BuildingBlueprint {
    let (cost, population) = match kind {
        BuildingKind::House => (ResourceGroup::new(50, 30, 0, 0), 5),
        BuildingKind::Lumberyard => (ResourceGroup::new(60, 40, 0, 0), 6),
        BuildingKind::Mine => (ResourceGroup::new(40, 70, 0, 0), 6),
        BuildingKind::Farm => (ResourceGroup::new(50, 30, 0, 0), 8),
        BuildingKind::Tavern => (ResourceGroup::new(55, 45, 20, 0), 8),
        BuildingKind::Barracks => (ResourceGroup::new(120, 80, 0, 30), 10),
        BuildingKind::Smith => (ResourceGroup::new(150, 120, 0, 40), 10),
        BuildingKind::Harbor => (ResourceGroup::new(200, 100, 0, 50), 12),
        BuildingKind::CharcoalKiln => (charcoal_kiln_cost(0), 4),
        _ => (ResourceGroup::new(100, 100, 0, 0), 5),
    };

    BuildingBlueprint {
        name: kind,
        description: format!("A {kind}"),
        resources_required_level_up: cost,
        population_required_next_level: population,
        construction_time: match kind {
            BuildingKind::CharcoalKiln => charcoal_kiln_construction_time(0),
            _ => GameDuration::from_secs(300),
        },
        generates_resource: kind.generated_resource(),
        requires_resources: kind.required_resource(),
    }
}

pub fn building_factory(options: BuildingFactoryOptions, ids: &mut IdSequence) -> Building {
    let kind = options.kind.unwrap_or(BuildingKind::House);
    let blueprint = blueprint_factory(kind);
    let id = options.id.unwrap_or_else(|| ids.next_id());
    let position = options.position.unwrap_or(Position::new(0, 0));

    let mut building = blueprint.to_building(id, position);
    building.level = options.level.unwrap_or(1);
    building.is_under_construction = options.under_construction;
    if let Some(cost) = options.level_up_cost {
        building.resources_required_level_up = cost;
    }
    building.population_required_next_level = options
        .population_next_level
        .unwrap_or(blueprint.population_required_next_level);
    building.unlocked_units_data = options
        .unlocked_units
        .into_iter()
        .map(|(unit, level_unlocked)| UnlockedUnit {
            unit,
            level_unlocked,
        })
        .collect();
    building.research_time_left = options.research_in_progress.as_ref().map(Research::duration);
    building.is_research_in_progress = options.research_in_progress.is_some();
    building.current_research = options.research_in_progress;
    building.allowed_building = options.allowed_building;
    building
}

pub fn unit_factory(options: UnitFactoryOptions) -> Unit {
    let name = options.name.unwrap_or(UnitName::Spear);
    let research_required = options
        .research_required
        .unwrap_or_else(|| ResearchName::from_str(&name.to_string()).ok());

    Unit {
        unit_name: name,
        description: format!("{name} unit"),
        attack: 15,
        defence: 15,
        health: 20,
        speed: 10,
        resources_required_to_produce: options.cost.unwrap_or(ResourceGroup::new(15, 0, 0, 15)),
        population_required_per_unit: options.population.unwrap_or(1),
        base_time_to_produce: GameDuration::from_secs(10),
        research_required,
    }
}

pub fn research_factory(options: ResearchFactoryOptions) -> Research {
    Research {
        research_name: options.name.unwrap_or(ResearchName::Spear),
        research_level: 0,
        base_seconds_to_research: options.seconds.unwrap_or(10),
        seconds_to_research: None,
        building_level_requirement: options.building_level_requirement.unwrap_or(1),
        resources_required_to_research: options
            .cost
            .unwrap_or(ResourceGroup::new(100, 50, 0, 0)),
    }
}

pub fn village_factory(options: VillageFactoryOptions, ids: &mut IdSequence) -> Village {
    let default_name = format!("Village {}", rand::thread_rng().r#gen::<u32>());

    let mut buildings = options.buildings.unwrap_or_else(|| {
        vec![
            building_factory(
                BuildingFactoryOptions {
                    kind: Some(BuildingKind::Headquarters),
                    level: Some(4),
                    position: Some(Position::new(6, 6)),
                    allowed_building: Some(BuildingKind::Headquarters),
                    ..Default::default()
                },
                ids,
            ),
            building_factory(
                BuildingFactoryOptions {
                    kind: Some(BuildingKind::Storage),
                    level: Some(3),
                    position: Some(Position::new(7, 6)),
                    ..Default::default()
                },
                ids,
            ),
        ]
    });
    buildings.extend(options.extra_buildings);

    let valid_build_positions = options.build_positions.unwrap_or_else(|| {
        [(2, 2), (3, 3), (4, 4)]
            .into_iter()
            .map(|(x, y)| build_position(Position::new(x, y), None))
            .collect()
    });

    let completed_researches = options
        .completed_researches
        .into_iter()
        .map(|name| Research {
            research_name: name,
            research_level: 0,
            base_seconds_to_research: 0,
            seconds_to_research: None,
            building_level_requirement: 0,
            resources_required_to_research: ResourceGroup::default(),
        })
        .collect();

    Village {
        id: options.id.unwrap_or(1),
        name: options.name.unwrap_or(default_name),
        position: Some(Position::new(12, 20)),
        population: options.population.unwrap_or(100),
        population_left: options.population_left.unwrap_or(60),
        resources: options
            .resources
            .unwrap_or(ResourceGroup::new(500, 400, 40, 200)),
        resource_limit: options.resource_limit,
        buildings,
        valid_build_positions,
        buildable_options: BuildingKind::iter()
            .filter(|kind| *kind != BuildingKind::Headquarters)
            .map(blueprint_factory)
            .collect(),
        units_in_village: options
            .units
            .unwrap_or_else(|| BTreeMap::from([(UnitName::Spear, 10)])),
        available_researches: options.available_researches,
        completed_researches,
        incoming_attacks: vec![],
        outgoing_attacks: vec![],
    }
}
