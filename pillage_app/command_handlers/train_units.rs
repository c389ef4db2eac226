use std::sync::Arc;

use pillage_game::models::village::Village;
use pillage_types::errors::ApplicationError;

use crate::{
    api::{GameApi, TrainRequest},
    config::Config,
    cqrs::{CommandHandler, commands::TrainUnits},
    store::VillageAction,
};

pub struct TrainUnitsCommandHandler {}

impl TrainUnitsCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<TrainUnits> for TrainUnitsCommandHandler {
    fn action(&self, command: &TrainUnits) -> VillageAction {
        VillageAction::Train {
            building_id: command.building_id,
            unit: command.unit,
            amount: command.amount,
        }
    }

    async fn handle(
        &self,
        command: TrainUnits,
        api: &Arc<dyn GameApi>,
        _config: &Arc<Config>,
    ) -> Result<Village, ApplicationError> {
        let request = TrainRequest {
            village_id: command.village_id,
            production_building_id: command.building_id,
            unit_type: command.unit,
            amount: command.amount,
        };
        api.train(&request).await
    }
}
