use async_trait::async_trait;
use pillage_types::errors::ApplicationError;
use std::sync::Arc;

use crate::{api::GameApi, config::Config};

/// A marker trait for Query structs.
/// Queries are operations that read the state of the game.
pub trait Query: Send + Sync {
    /// The data type that this query will return.
    type Output: Send + Sync;
}

/// A trait for handlers that execute Queries.
/// It receives the query and the game server to read data from.
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(
        &self,
        query: Q,
        api: &Arc<dyn GameApi>,
        config: &Arc<Config>,
    ) -> Result<Q::Output, ApplicationError>;
}
