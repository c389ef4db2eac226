use async_trait::async_trait;
use std::sync::Arc;

use pillage_types::errors::ApplicationError;

use crate::{
    api::GameApi,
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetWorldMap},
};

pub struct GetWorldMapHandler {}

impl GetWorldMapHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetWorldMap> for GetWorldMapHandler {
    async fn handle(
        &self,
        _query: GetWorldMap,
        api: &Arc<dyn GameApi>,
        _config: &Arc<Config>,
    ) -> Result<<GetWorldMap as Query>::Output, ApplicationError> {
        api.world_map().await
    }
}

#[cfg(test)]
mod tests {
    use pillage_types::map::Position;
    use serde_json::json;

    use super::*;
    use crate::{
        api::{WorldMap, WorldVillage},
        test_utils::tests::MockGameApi,
    };

    #[tokio::test]
    async fn test_get_world_map() {
        let mock = MockGameApi::new();
        let world = WorldMap {
            villages: vec![WorldVillage {
                village_id: 3,
                name: "Jelling".to_string(),
                position: Some(Position::new(4, 4)),
                player_name: Some("Gorm".to_string()),
            }],
            tiles: json!([["water", "grass"]]),
        };
        mock.set_world(world.clone());
        let api: Arc<dyn GameApi> = Arc::new(mock.clone());

        let fetched = GetWorldMapHandler::new()
            .handle(GetWorldMap, &api, &Arc::new(Config::default()))
            .await
            .unwrap();

        assert_eq!(fetched, world);
        assert_eq!(mock.requests()[0].0, "/api/world");
    }
}
