mod build_building;
mod launch_attack;
mod level_up_building;
mod start_research;
mod train_units;

pub use build_building::BuildBuildingCommandHandler;
pub use launch_attack::LaunchAttackCommandHandler;
pub use level_up_building::LevelUpBuildingCommandHandler;
pub use start_research::StartResearchCommandHandler;
pub use train_units::TrainUnitsCommandHandler;
