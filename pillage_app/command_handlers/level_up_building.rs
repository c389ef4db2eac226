use std::sync::Arc;

use pillage_game::models::village::Village;
use pillage_types::errors::ApplicationError;

use crate::{
    api::{GameApi, LevelUpRequest},
    config::Config,
    cqrs::{CommandHandler, commands::LevelUpBuilding},
    store::VillageAction,
};

pub struct LevelUpBuildingCommandHandler {}

impl LevelUpBuildingCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<LevelUpBuilding> for LevelUpBuildingCommandHandler {
    fn action(&self, command: &LevelUpBuilding) -> VillageAction {
        VillageAction::LevelUp {
            building_id: command.building_id,
        }
    }

    async fn handle(
        &self,
        command: LevelUpBuilding,
        api: &Arc<dyn GameApi>,
        _config: &Arc<Config>,
    ) -> Result<Village, ApplicationError> {
        let request = LevelUpRequest {
            village_id: command.village_id,
            building_id: command.building_id,
        };
        api.level_up(&request).await
    }
}
