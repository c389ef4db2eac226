use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use pillage_game::models::village::Village;
use pillage_types::{
    common::VillageId,
    errors::{AppError, ApplicationError},
};

use crate::{
    api::GameApi,
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    store::VillageStore,
};

/// AppBus (Mediator)
/// This struct is the central entry point for all client logic.
/// It does not contain any game rule itself.
/// Its primary roles are:
/// 1. Managing the optimistic lifecycle of every command.
/// 2. Dispatching Commands and Queries to their respective handlers.
pub struct AppBus {
    config: Arc<Config>,
    api: Arc<dyn GameApi>,
    store: Mutex<VillageStore>,
}

impl AppBus {
    pub fn new(config: Arc<Config>, api: Arc<dyn GameApi>) -> Self {
        Self {
            config,
            api,
            store: Mutex::new(VillageStore::new()),
        }
    }

    /// Executes a command.
    /// - It applies the command's action to the store; a rule rejection is
    ///   returned before anything is sent.
    /// - It passes the command to the handler, without holding the store.
    /// - If the handler succeeds, the answer replaces the village.
    /// - If the server took the action but no snapshot came back, the
    ///   projection is kept as the village.
    /// - If the handler fails, the projection is rolled back.
    pub async fn execute<C, H>(&self, cmd: C, handler: H) -> Result<Village, ApplicationError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let action = handler.action(&cmd);
        let pending_id = self.store.lock().await.apply(cmd.village_id(), action)?;

        match handler.handle(cmd, &self.api, &self.config).await {
            Ok(snapshot) => {
                let mut store = self.store.lock().await;
                store.settle(pending_id, snapshot)?;
                info!(%pending_id, "Action confirmed by the server");
                let village = store.view().cloned();
                village.ok_or_else(|| AppError::NoVillageLoaded.into())
            }
            Err(ApplicationError::App(AppError::SnapshotUnavailable { reason })) => {
                let mut store = self.store.lock().await;
                store.confirm(pending_id)?;
                warn!(%pending_id, %reason, "Action confirmed, keeping the local projection");
                let village = store.view().cloned();
                village.ok_or_else(|| AppError::NoVillageLoaded.into())
            }
            Err(e) => {
                self.store.lock().await.rollback(pending_id)?;
                warn!(%pending_id, error = %e, "Action failed, projection rolled back");
                Err(e)
            }
        }
    }

    /// Executes a query.
    /// A query is an operation that reads game state and returns data.
    /// It never touches the store.
    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        handler.handle(query, &self.api, &self.config).await
    }

    /// Loads `village_id` from the server into the store.
    pub async fn refresh(&self, village_id: VillageId) -> Result<Village, ApplicationError> {
        let snapshot = self.api.get_village(village_id).await?;
        let mut store = self.store.lock().await;
        store.replace(snapshot);
        let village = store.view().cloned();
        village.ok_or_else(|| AppError::NoVillageLoaded.into())
    }

    /// The village as the player should see it right now.
    pub async fn current_village(&self) -> Option<Village> {
        self.store.lock().await.view().cloned()
    }

    pub async fn pending_actions(&self) -> usize {
        self.store.lock().await.pending().len()
    }
}
