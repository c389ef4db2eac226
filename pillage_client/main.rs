use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};

use pillage_app::{
    api::{GameApi, HttpGameApi},
    app_bus::AppBus,
    command_handlers::{
        BuildBuildingCommandHandler, LaunchAttackCommandHandler, LevelUpBuildingCommandHandler,
        StartResearchCommandHandler, TrainUnitsCommandHandler,
    },
    config::Config,
    cqrs::{
        commands::{BuildBuilding, LaunchAttack, LevelUpBuilding, StartResearch, TrainUnits},
        queries::{GetWorldMap, ListVillages},
    },
    queries_handlers::{GetWorldMapHandler, ListVillagesHandler},
};
use pillage_types::{
    common::VillageId,
    errors::{AppError, ApplicationError},
    map::Position,
};

mod cli;
mod logs;
mod render;

use cli::{Cli, CliCommand, units_to_send};
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    let cli = Cli::parse();
    let _guard = setup_logging();

    let config = Arc::new(Config::from_env());
    let api: Arc<dyn GameApi> = Arc::new(HttpGameApi::new(&config)?);
    let bus = AppBus::new(config.clone(), api);
    debug!(api_url = %config.api_url, "Client ready");

    run(&bus, &config, cli).await
}

async fn run(bus: &AppBus, config: &Config, cli: Cli) -> Result<(), ApplicationError> {
    match cli.command {
        CliCommand::Villages => {
            let villages = bus.query(ListVillages, ListVillagesHandler::new()).await?;
            print!("{}", render::villages(&villages));
            return Ok(());
        }
        CliCommand::World => {
            let map = bus.query(GetWorldMap, GetWorldMapHandler::new()).await?;
            print!("{}", render::world(&map));
            return Ok(());
        }
        _ => {}
    }

    let village_id = resolve_village(bus, cli.village.or(config.village_id)).await?;
    let village = bus.refresh(village_id).await?;

    let village = match cli.command {
        CliCommand::Show => village,
        CliCommand::Build { kind, x, y } => {
            let command = BuildBuilding {
                village_id,
                kind,
                position: Position::new(x, y),
            };
            bus.execute(command, BuildBuildingCommandHandler::new())
                .await?
        }
        CliCommand::LevelUp { building_id } => {
            let command = LevelUpBuilding {
                village_id,
                building_id,
            };
            bus.execute(command, LevelUpBuildingCommandHandler::new())
                .await?
        }
        CliCommand::Train {
            building_id,
            unit,
            amount,
        } => {
            let command = TrainUnits {
                village_id,
                building_id,
                unit,
                amount,
            };
            bus.execute(command, TrainUnitsCommandHandler::new()).await?
        }
        CliCommand::Research {
            building_id,
            research,
        } => {
            let command = StartResearch {
                village_id,
                building_id,
                research,
            };
            bus.execute(command, StartResearchCommandHandler::new())
                .await?
        }
        CliCommand::Attack { target, units } => {
            let command = LaunchAttack {
                village_id,
                target_village_id: target,
                units: units_to_send(&units),
            };
            bus.execute(command, LaunchAttackCommandHandler::new())
                .await?
        }
        CliCommand::Villages | CliCommand::World => return Ok(()),
    };

    print!("{}", render::village(&village));
    Ok(())
}

/// Picks the village to act on: the explicit one, else the first village
/// the server lists for the session.
async fn resolve_village(
    bus: &AppBus,
    requested: Option<VillageId>,
) -> Result<VillageId, ApplicationError> {
    if let Some(village_id) = requested {
        return Ok(village_id);
    }

    let villages = bus.query(ListVillages, ListVillagesHandler::new()).await?;
    match villages.first() {
        Some(first) => {
            info!(village_id = first.village_id, "No village given, using the first one");
            Ok(first.village_id)
        }
        None => Err(AppError::MissingConfig("PILLAGE_VILLAGE_ID").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillage_app::test_utils::tests::MockGameApi;
    use pillage_game::test_utils::{IdSequence, VillageFactoryOptions, village_factory};

    fn bus_with(mock: &MockGameApi) -> AppBus {
        AppBus::new(Arc::new(Config::default()), Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_resolve_village_prefers_requested() {
        let mock = MockGameApi::new();
        let bus = bus_with(&mock);

        assert_eq!(resolve_village(&bus, Some(42)).await.unwrap(), 42);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_village_falls_back_to_first() {
        let mut ids = IdSequence::default();
        let mock = MockGameApi::new();
        for id in [9, 4] {
            mock.insert_village(village_factory(
                VillageFactoryOptions {
                    id: Some(id),
                    ..Default::default()
                },
                &mut ids,
            ));
        }
        let bus = bus_with(&mock);

        assert_eq!(resolve_village(&bus, None).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_resolve_village_without_villages() {
        let bus = bus_with(&MockGameApi::new());

        let result = resolve_village(&bus, None).await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(AppError::MissingConfig(
                "PILLAGE_VILLAGE_ID"
            )))
        ));
    }

    #[tokio::test]
    async fn test_run_build_updates_server() {
        let mut ids = IdSequence::default();
        let village = village_factory(Default::default(), &mut ids);
        let mock = MockGameApi::with_village(village.clone());
        let bus = bus_with(&mock);
        let cli = Cli::try_parse_from(["pillage", "-v", "1", "build", "House", "2", "2"]).unwrap();

        run(&bus, &Config::default(), cli).await.unwrap();

        let stored = mock.village(village.id).unwrap();
        assert!(stored.building_at(Position::new(2, 2)).is_some());
        assert_eq!(bus.pending_actions().await, 0);
    }
}
