use std::collections::BTreeMap;

use pillage_types::{
    buildings::BuildingId, errors::GameError, map::Position, units::UnitName,
};

use crate::{
    models::{
        buildings::BuildingBlueprint,
        research::Research,
        units::Unit,
        village::{BuildPosition, Village},
    },
    placement::is_placement_allowed,
};

/// Action checks on a village snapshot.
///
/// Every check takes `&self` and returns the village as it would look once
/// the action is accepted, or the first reason it is not allowed. Nothing
/// here mutates the snapshot it is called on.
impl Village {
    /// Checks, in order: position, resources, population, production
    /// dependency.
    pub fn can_build(
        &self,
        blueprint: &BuildingBlueprint,
        position: Position,
    ) -> Result<Village, GameError> {
        if self.building_at(position).is_some()
            || !is_placement_allowed(&self.valid_build_positions, blueprint.name, position)
        {
            return Err(GameError::InvalidPosition { position });
        }

        let cost = &blueprint.resources_required_level_up;
        self.resources.check_resources(cost)?;
        self.check_population(blueprint.population_required_next_level)?;

        if let Some(resource) = blueprint.requires_resources {
            let satisfied = self.buildings.iter().any(|b| {
                b.generates_resource == Some(resource)
                    || b.name.generated_resource() == Some(resource)
            });
            if !satisfied {
                return Err(GameError::MissingDependency {
                    building: blueprint.name,
                    resource,
                });
            }
        }

        let mut projected = self.clone();
        projected.spend(cost, blueprint.population_required_next_level);
        projected
            .valid_build_positions
            .retain(|bp| bp.position != position);
        projected
            .buildings
            .push(blueprint.to_building(self.next_building_id(), position));

        Ok(projected)
    }

    pub fn can_level_up(&self, building_id: BuildingId) -> Result<Village, GameError> {
        let building = self
            .building(building_id)
            .ok_or(GameError::BuildingNotFound(building_id))?;

        if building.is_under_construction {
            return Err(GameError::BuildingUnderConstruction(building_id));
        }

        let cost = building.resources_required_level_up;
        let population = building.population_required_next_level;
        self.resources.check_resources(&cost)?;
        self.check_population(population)?;

        let mut projected = self.clone();
        projected.spend(&cost, population);
        if let Some(b) = projected.building_mut(building_id) {
            b.level += 1;
            b.is_under_construction = true;
        }

        Ok(projected)
    }

    /// Trained units are not added to `units_in_village`: they only show up
    /// once the server reports the batch as done.
    pub fn can_train_unit(
        &self,
        building_id: BuildingId,
        unit_name: UnitName,
        amount: u32,
    ) -> Result<Village, GameError> {
        if amount == 0 {
            return Err(GameError::InvalidAmount);
        }

        let building = self
            .building(building_id)
            .ok_or(GameError::BuildingNotFound(building_id))?;

        let unlocked = building
            .unlock_level(unit_name)
            .is_some_and(|level| level <= building.level);
        let unit = building
            .unit_data(unit_name)
            .or_else(|| self.unit_definition(unit_name))
            .filter(|_| unlocked)
            .ok_or(GameError::UnitLocked { unit: unit_name })?;

        if let Some(research) = unit.research_required {
            if !self.has_completed_research(research) {
                return Err(GameError::ResearchMissing(research));
            }
        }

        let cost = unit.cost_for(amount);
        let population = unit.population_for(amount);
        self.resources.check_resources(&cost)?;
        self.check_population(population)?;

        let mut projected = self.clone();
        projected.spend(&cost, population);

        Ok(projected)
    }

    pub fn can_start_research(
        &self,
        building_id: BuildingId,
        research: &Research,
    ) -> Result<Village, GameError> {
        let building = self
            .building(building_id)
            .ok_or(GameError::BuildingNotFound(building_id))?;

        if building.is_research_in_progress {
            return Err(GameError::ResearchAlreadyInProgress);
        }
        if building.level < research.building_level_requirement {
            return Err(GameError::BuildingLevelTooLow {
                required: research.building_level_requirement,
                current: building.level,
            });
        }

        let cost = research.resources_required_to_research;
        self.resources.check_resources(&cost)?;

        if self.has_completed_research(research.research_name) {
            return Err(GameError::AlreadyResearched(research.research_name));
        }

        let mut projected = self.clone();
        projected.spend(&cost, 0);
        if let Some(b) = projected.building_mut(building_id) {
            b.is_research_in_progress = true;
            b.current_research = Some(research.clone());
            b.research_time_left = Some(research.duration());
        }

        Ok(projected)
    }

    /// Largest batch of `unit` the village can pay for right now.
    pub fn max_trainable(&self, unit: &Unit) -> u32 {
        let by_resources = self
            .resources
            .times_affordable(&unit.resources_required_to_produce)
            .unwrap_or(u32::MAX);
        let by_population = match unit.population_required_per_unit {
            0 => u32::MAX,
            per_unit => self.population_left / per_unit,
        };

        by_resources.min(by_population)
    }

    /// Units sent out leave the village immediately.
    pub fn can_launch_attack(
        &self,
        units: &BTreeMap<UnitName, u32>,
    ) -> Result<Village, GameError> {
        if units.values().all(|amount| *amount == 0) {
            return Err(GameError::NoUnitsSelected);
        }

        for (unit, required) in units.iter().filter(|(_, amount)| **amount > 0) {
            let available = self.units_of(*unit);
            if available < *required {
                return Err(GameError::NotEnoughUnits {
                    unit: *unit,
                    required: *required,
                    available,
                });
            }
        }

        let mut projected = self.clone();
        for (unit, amount) in units {
            if let Some(owned) = projected.units_in_village.get_mut(unit) {
                *owned = owned.saturating_sub(*amount);
            }
        }
        projected.units_in_village.retain(|_, amount| *amount > 0);

        Ok(projected)
    }

    /// Tears a building down. Its tile becomes buildable again, keeping any
    /// dedication it had. Nothing is refunded.
    pub fn demolish(&self, building_id: BuildingId) -> Result<Village, GameError> {
        let building = self
            .building(building_id)
            .ok_or(GameError::BuildingNotFound(building_id))?;

        let mut projected = self.clone();
        projected.buildings.retain(|b| b.building_id != building_id);
        projected.valid_build_positions.push(BuildPosition {
            name: None,
            position: building.position,
            allowed_building: building.allowed_building,
        });

        Ok(projected)
    }

    fn check_population(&self, required: u32) -> Result<(), GameError> {
        if self.population_left < required {
            return Err(GameError::InsufficientPopulation {
                required,
                available: self.population_left,
            });
        }
        Ok(())
    }
}
