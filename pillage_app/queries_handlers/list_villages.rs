use async_trait::async_trait;
use std::sync::Arc;

use pillage_types::errors::ApplicationError;

use crate::{
    api::GameApi,
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListVillages},
};

pub struct ListVillagesHandler {}

impl ListVillagesHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListVillages> for ListVillagesHandler {
    async fn handle(
        &self,
        _query: ListVillages,
        api: &Arc<dyn GameApi>,
        _config: &Arc<Config>,
    ) -> Result<<ListVillages as Query>::Output, ApplicationError> {
        api.list_villages().await
    }
}
