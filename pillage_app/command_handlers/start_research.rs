use std::sync::Arc;

use pillage_game::models::village::Village;
use pillage_types::errors::ApplicationError;

use crate::{
    api::{GameApi, ResearchRequest},
    config::Config,
    cqrs::{CommandHandler, commands::StartResearch},
    store::VillageAction,
};

pub struct StartResearchCommandHandler {}

impl StartResearchCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<StartResearch> for StartResearchCommandHandler {
    fn action(&self, command: &StartResearch) -> VillageAction {
        VillageAction::Research {
            building_id: command.building_id,
            research: command.research,
        }
    }

    async fn handle(
        &self,
        command: StartResearch,
        api: &Arc<dyn GameApi>,
        _config: &Arc<Config>,
    ) -> Result<Village, ApplicationError> {
        let request = ResearchRequest {
            village_id: command.village_id,
            research_building_id: command.building_id,
            research_type: command.research,
        };
        api.start_research(&request).await
    }
}

#[cfg(test)]
mod tests {
    use pillage_game::test_utils::{
        BuildingFactoryOptions, IdSequence, ResearchFactoryOptions, VillageFactoryOptions,
        building_factory, research_factory, village_factory,
    };
    use pillage_types::{buildings::BuildingKind, map::Position, research::ResearchName};
    use serde_json::json;

    use super::*;
    use crate::test_utils::tests::{MockGameApi, assert_handler_success};

    #[tokio::test]
    async fn test_start_research_handler_success() {
        let mut ids = IdSequence::default();
        let smith = building_factory(
            BuildingFactoryOptions {
                kind: Some(BuildingKind::Smith),
                level: Some(2),
                position: Some(Position::new(8, 8)),
                ..Default::default()
            },
            &mut ids,
        );
        let smith_id = smith.building_id;
        let village = village_factory(
            VillageFactoryOptions {
                extra_buildings: vec![smith],
                available_researches: vec![research_factory(ResearchFactoryOptions {
                    name: Some(ResearchName::Axe),
                    ..Default::default()
                })],
                ..Default::default()
            },
            &mut ids,
        );
        let mock = MockGameApi::with_village(village.clone());
        let api: Arc<dyn GameApi> = Arc::new(mock.clone());
        let config = Arc::new(Config::default());

        let command = StartResearch {
            village_id: village.id,
            building_id: smith_id,
            research: ResearchName::Axe,
        };
        let updated = assert_handler_success(
            StartResearchCommandHandler::new()
                .handle(command, &api, &config)
                .await,
        );

        let smith = updated.building(smith_id).unwrap();
        assert!(smith.is_research_in_progress);
        assert_eq!(
            smith.current_research.as_ref().map(|r| r.research_name),
            Some(ResearchName::Axe)
        );
        assert_eq!(
            mock.requests()[0],
            (
                "/api/research/".to_string(),
                json!({ "villageId": village.id, "researchBuildingId": smith_id, "researchType": "Axe" })
            )
        );
    }
}
