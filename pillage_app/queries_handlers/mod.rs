mod get_village;
mod get_world_map;
mod list_villages;

pub use get_village::GetVillageHandler;
pub use get_world_map::GetWorldMapHandler;
pub use list_villages::ListVillagesHandler;
