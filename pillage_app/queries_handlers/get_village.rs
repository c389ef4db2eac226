use async_trait::async_trait;
use std::sync::Arc;

use pillage_types::errors::ApplicationError;

use crate::{
    api::GameApi,
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetVillage},
};

pub struct GetVillageHandler {}

impl GetVillageHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetVillage> for GetVillageHandler {
    async fn handle(
        &self,
        query: GetVillage,
        api: &Arc<dyn GameApi>,
        _config: &Arc<Config>,
    ) -> Result<<GetVillage as Query>::Output, ApplicationError> {
        api.get_village(query.village_id).await
    }
}
