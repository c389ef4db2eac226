use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use pillage_game::models::village::Village;
use pillage_types::{
    buildings::{BuildingId, BuildingKind},
    common::VillageId,
    errors::{AppError, ApplicationError, GameError},
    map::Position,
    research::ResearchName,
    units::UnitName,
};

/// A player action, checked locally before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VillageAction {
    Build {
        kind: BuildingKind,
        position: Position,
    },
    LevelUp {
        building_id: BuildingId,
    },
    Train {
        building_id: BuildingId,
        unit: UnitName,
        amount: u32,
    },
    Research {
        building_id: BuildingId,
        research: ResearchName,
    },
    Attack {
        target: VillageId,
        units: BTreeMap<UnitName, u32>,
    },
}

impl VillageAction {
    /// Runs the matching rule against `village`.
    pub fn project(&self, village: &Village) -> Result<Village, GameError> {
        match self {
            VillageAction::Build { kind, position } => {
                let blueprint = village
                    .blueprint(*kind)
                    .ok_or(GameError::BlueprintNotFound(*kind))?;
                village.can_build(blueprint, *position)
            }
            VillageAction::LevelUp { building_id } => village.can_level_up(*building_id),
            VillageAction::Train {
                building_id,
                unit,
                amount,
            } => village.can_train_unit(*building_id, *unit, *amount),
            VillageAction::Research {
                building_id,
                research,
            } => {
                let research = village
                    .research(*research)
                    .ok_or(GameError::ResearchNotAvailable(*research))?;
                village.can_start_research(*building_id, research)
            }
            VillageAction::Attack { units, .. } => village.can_launch_attack(units),
        }
    }
}

impl fmt::Display for VillageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VillageAction::Build { kind, position } => write!(f, "build {kind} at {position}"),
            VillageAction::LevelUp { building_id } => write!(f, "level up building {building_id}"),
            VillageAction::Train {
                building_id,
                unit,
                amount,
            } => write!(f, "train {amount} {unit} in building {building_id}"),
            VillageAction::Research {
                building_id,
                research,
            } => write!(f, "research {research} in building {building_id}"),
            VillageAction::Attack { target, units } => {
                let sent: u32 = units.values().sum();
                write!(f, "attack village {target} with {sent} units")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PendingAction {
    pub id: Uuid,
    pub action: VillageAction,
    pub created_at: DateTime<Utc>,
}

/// Optimistic view of the loaded village.
///
/// The store keeps the last snapshot the server sent, the projection of the
/// actions accepted locally since then and the pending actions still waiting
/// for an answer. A server answer always replaces the whole village.
#[derive(Debug, Default)]
pub struct VillageStore {
    authoritative: Option<Village>,
    projected: Option<Village>,
    pending: Vec<PendingAction>,
}

impl VillageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the player should see: the projection if any, else the snapshot.
    pub fn view(&self) -> Option<&Village> {
        self.projected.as_ref().or(self.authoritative.as_ref())
    }

    pub fn authoritative(&self) -> Option<&Village> {
        self.authoritative.as_ref()
    }

    pub fn pending(&self) -> &[PendingAction] {
        &self.pending
    }

    /// Takes a server snapshot as the new truth. Any local projection is
    /// dropped; pending actions stay tracked until their own answer arrives.
    pub fn replace(&mut self, mut snapshot: Village) {
        snapshot.normalize();
        debug!(village_id = snapshot.id, "Replacing village snapshot");
        self.authoritative = Some(snapshot);
        self.projected = None;
    }

    /// Applies `action` to the current view. On success the projection
    /// becomes the view and the action is recorded as pending.
    pub fn apply(
        &mut self,
        village_id: VillageId,
        action: VillageAction,
    ) -> Result<Uuid, ApplicationError> {
        let current = self.view().ok_or(AppError::NoVillageLoaded)?;
        if current.id != village_id {
            return Err(AppError::VillageNotLoaded(village_id).into());
        }

        let projected = action.project(current)?;
        let pending = PendingAction {
            id: Uuid::new_v4(),
            action,
            created_at: Utc::now(),
        };
        let id = pending.id;

        debug!(%id, action = %pending.action, "Applied optimistic action");
        self.projected = Some(projected);
        self.pending.push(pending);
        Ok(id)
    }

    /// The server accepted the action: its snapshot replaces everything.
    pub fn settle(&mut self, id: Uuid, snapshot: Village) -> Result<(), ApplicationError> {
        self.take_pending(id)?;
        self.replace(snapshot);
        Ok(())
    }

    /// The server accepted the action without sending a snapshot: the
    /// projection becomes the new truth until the next refresh.
    pub fn confirm(&mut self, id: Uuid) -> Result<(), ApplicationError> {
        let pending = self.take_pending(id)?;
        debug!(%id, action = %pending.action, "Kept projection as snapshot");
        if let Some(projected) = self.projected.take() {
            self.authoritative = Some(projected);
        }
        Ok(())
    }

    /// The action failed: the view falls back to the last snapshot.
    pub fn rollback(&mut self, id: Uuid) -> Result<(), ApplicationError> {
        let pending = self.take_pending(id)?;
        debug!(%id, action = %pending.action, "Rolled back optimistic action");
        self.projected = None;
        Ok(())
    }

    fn take_pending(&mut self, id: Uuid) -> Result<PendingAction, ApplicationError> {
        let index = self
            .pending
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::UnknownPendingAction(id))?;
        Ok(self.pending.remove(index))
    }
}
