use async_trait::async_trait;
use std::sync::Arc;

use pillage_game::models::village::Village;
use pillage_types::{common::VillageId, errors::ApplicationError};

use crate::{api::GameApi, config::Config, store::VillageAction};

/// A trait for Command structs.
/// Commands are operations that change the state of a village.
pub trait Command: Send + Sync {
    /// The village the command acts on.
    fn village_id(&self) -> VillageId;
}

/// A trait for handlers that execute Commands.
/// `action` describes the command to the local rules, `handle` submits it to
/// the game server and returns the authoritative village.
/// Handlers should NOT touch the store; applying and reconciling the
/// projection is the job of the AppBus.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    fn action(&self, cmd: &C) -> VillageAction;

    async fn handle(
        &self,
        cmd: C,
        api: &Arc<dyn GameApi>,
        config: &Arc<Config>,
    ) -> Result<Village, ApplicationError>;
}
