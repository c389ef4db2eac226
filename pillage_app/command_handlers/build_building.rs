use std::sync::Arc;

use pillage_game::models::village::Village;
use pillage_types::errors::ApplicationError;

use crate::{
    api::{BuildRequest, GameApi},
    config::Config,
    cqrs::{CommandHandler, commands::BuildBuilding},
    store::VillageAction,
};

pub struct BuildBuildingCommandHandler {}

impl BuildBuildingCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<BuildBuilding> for BuildBuildingCommandHandler {
    fn action(&self, command: &BuildBuilding) -> VillageAction {
        VillageAction::Build {
            kind: command.kind,
            position: command.position,
        }
    }

    async fn handle(
        &self,
        command: BuildBuilding,
        api: &Arc<dyn GameApi>,
        _config: &Arc<Config>,
    ) -> Result<Village, ApplicationError> {
        let request = BuildRequest {
            village_id: command.village_id,
            building_type: command.kind,
            position: command.position,
        };
        api.build(&request).await
    }
}

#[cfg(test)]
mod tests {
    use pillage_game::test_utils::{IdSequence, village_factory};
    use pillage_types::{buildings::BuildingKind, map::Position};
    use serde_json::json;

    use super::*;
    use crate::test_utils::tests::{MockGameApi, assert_handler_success};

    #[tokio::test]
    async fn test_build_building_handler_success() {
        let mut ids = IdSequence::default();
        let village = village_factory(Default::default(), &mut ids);
        let mock = MockGameApi::with_village(village.clone());
        let api: Arc<dyn GameApi> = Arc::new(mock.clone());
        let config = Arc::new(Config::default());

        let handler = BuildBuildingCommandHandler::new();
        let command = BuildBuilding {
            village_id: village.id,
            kind: BuildingKind::House,
            position: Position::new(2, 2),
        };

        assert_eq!(
            handler.action(&command),
            VillageAction::Build {
                kind: BuildingKind::House,
                position: Position::new(2, 2),
            }
        );

        let updated = assert_handler_success(handler.handle(command, &api, &config).await);
        assert!(updated.building_at(Position::new(2, 2)).is_some());
        assert_eq!(updated.resources.wood, village.resources.wood - 50);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "/api/building/build");
        assert_eq!(
            requests[0].1,
            json!({ "villageId": village.id, "buildingType": "House", "position": { "x": 2, "y": 2 } })
        );
    }
}
