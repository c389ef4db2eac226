use thiserror::Error;

use crate::{
    buildings::{BuildingId, BuildingKind},
    common::ResourceKind,
    map::Position,
    research::ResearchName,
    units::UnitName,
};

/// Reasons the village rules reject an action. Every variant renders as a
/// message fit to show next to the disabled action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Position {position} is not a valid build position")]
    InvalidPosition { position: Position },

    #[error("Not enough {resource}: need {required}, have {available}")]
    InsufficientResources {
        resource: ResourceKind,
        required: u32,
        available: u32,
    },

    #[error("Not enough population: need {required}, have {available}")]
    InsufficientPopulation { required: u32, available: u32 },

    #[error("{building} requires a building that produces {resource}")]
    MissingDependency {
        building: BuildingKind,
        resource: ResourceKind,
    },

    #[error("Building {0} is under construction")]
    BuildingUnderConstruction(BuildingId),

    #[error("Building {0} not found")]
    BuildingNotFound(BuildingId),

    #[error("{0} is not available in the build menu")]
    BlueprintNotFound(BuildingKind),

    #[error("Unit {unit} is not unlocked in this building")]
    UnitLocked { unit: UnitName },

    #[error("Unit requires research {0}")]
    ResearchMissing(ResearchName),

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("A research is already in progress")]
    ResearchAlreadyInProgress,

    #[error("Building level {current} is too low, requires level {required}")]
    BuildingLevelTooLow { required: u32, current: u32 },

    #[error("Research {0} is already completed")]
    AlreadyResearched(ResearchName),

    #[error("Research {0} is not available")]
    ResearchNotAvailable(ResearchName),

    #[error("To attack you need to send at least one unit")]
    NoUnitsSelected,

    #[error("Not enough {unit} units: need {required}, have {available}")]
    NotEnoughUnits {
        unit: UnitName,
        required: u32,
        available: u32,
    },
}
