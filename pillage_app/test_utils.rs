#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use serde::Serialize;
    use serde_json::Value;
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use pillage_game::models::village::Village;
    use pillage_types::{
        common::VillageId,
        errors::{AppError, ApplicationError},
    };

    use crate::{
        api::{
            AttackRequest, BuildRequest, GameApi, LevelUpRequest, ResearchRequest, TrainRequest,
            VillageSummary, WorldMap,
        },
        store::VillageAction,
    };

    /// In-memory game server. It runs the same rules as the client and, like
    /// the real server, delivers trained units right away.
    #[derive(Default, Clone)]
    pub struct MockGameApi {
        villages: Arc<Mutex<HashMap<VillageId, Village>>>,
        requests: Arc<Mutex<Vec<(String, Value)>>>,
        failure: Arc<Mutex<Option<u16>>>,
        path_failures: Arc<Mutex<HashMap<String, u16>>>,
        world: Arc<Mutex<WorldMap>>,
    }

    impl MockGameApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_village(village: Village) -> Self {
            let api = Self::new();
            api.insert_village(village);
            api
        }

        pub fn insert_village(&self, village: Village) {
            self.villages.lock().unwrap().insert(village.id, village);
        }

        pub fn village(&self, village_id: VillageId) -> Option<Village> {
            self.villages.lock().unwrap().get(&village_id).cloned()
        }

        pub fn set_world(&self, world: WorldMap) {
            *self.world.lock().unwrap() = world;
        }

        /// The next request answers with `status` instead of succeeding.
        pub fn fail_next(&self, status: u16) {
            *self.failure.lock().unwrap() = Some(status);
        }

        /// The next request on `path` answers with `status`.
        pub fn fail_path(&self, path: &str, status: u16) {
            self.path_failures
                .lock()
                .unwrap()
                .insert(path.to_string(), status);
        }

        /// Every request received so far, as `(path, body)`.
        pub fn requests(&self) -> Vec<(String, Value)> {
            self.requests.lock().unwrap().clone()
        }

        fn record<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApplicationError> {
            let body = serde_json::to_value(body)?;
            self.requests
                .lock()
                .unwrap()
                .push((path.to_string(), body));

            let failure = self
                .failure
                .lock()
                .unwrap()
                .take()
                .or_else(|| self.path_failures.lock().unwrap().remove(path));
            match failure {
                Some(status) => Err(AppError::HttpStatus {
                    path: path.to_string(),
                    status,
                    message: "Injected failure".to_string(),
                }
                .into()),
                None => Ok(()),
            }
        }

        fn stored(&self, path: &str, village_id: VillageId) -> Result<Village, ApplicationError> {
            self.village(village_id).ok_or_else(|| {
                AppError::HttpStatus {
                    path: path.to_string(),
                    status: 404,
                    message: format!("Village {village_id} not found"),
                }
                .into()
            })
        }

        fn run(
            &self,
            path: &str,
            village_id: VillageId,
            action: VillageAction,
        ) -> Result<Village, ApplicationError> {
            let village = self.stored(path, village_id)?;
            let mut updated = action.project(&village).map_err(|e| AppError::HttpStatus {
                path: path.to_string(),
                status: 400,
                message: e.to_string(),
            })?;

            if let VillageAction::Train { unit, amount, .. } = action {
                *updated.units_in_village.entry(unit).or_insert(0) += amount;
            }

            self.insert_village(updated.clone());
            Ok(updated)
        }
    }

    #[async_trait]
    impl GameApi for MockGameApi {
        async fn list_villages(&self) -> Result<Vec<VillageSummary>, ApplicationError> {
            self.record("/api/village/", &Value::Null)?;
            let mut summaries: Vec<VillageSummary> = self
                .villages
                .lock()
                .unwrap()
                .values()
                .map(|v| VillageSummary {
                    village_id: v.id,
                    name: v.name.clone(),
                })
                .collect();
            summaries.sort_by_key(|s| s.village_id);
            Ok(summaries)
        }

        async fn get_village(&self, village_id: VillageId) -> Result<Village, ApplicationError> {
            let path = format!("/api/village/{village_id}");
            self.record(&path, &Value::Null)?;
            self.stored(&path, village_id)
        }

        async fn build(&self, request: &BuildRequest) -> Result<Village, ApplicationError> {
            let path = "/api/building/build";
            self.record(path, request)?;
            self.run(
                path,
                request.village_id,
                VillageAction::Build {
                    kind: request.building_type,
                    position: request.position,
                },
            )
        }

        async fn level_up(&self, request: &LevelUpRequest) -> Result<Village, ApplicationError> {
            let path = "/api/building/levelup";
            self.record(path, request)?;
            self.run(
                path,
                request.village_id,
                VillageAction::LevelUp {
                    building_id: request.building_id,
                },
            )
        }

        async fn train(&self, request: &TrainRequest) -> Result<Village, ApplicationError> {
            let path = "/api/production/train";
            self.record(path, request)?;
            self.run(
                path,
                request.village_id,
                VillageAction::Train {
                    building_id: request.production_building_id,
                    unit: request.unit_type,
                    amount: request.amount,
                },
            )
        }

        async fn start_research(
            &self,
            request: &ResearchRequest,
        ) -> Result<Village, ApplicationError> {
            let path = "/api/research/";
            self.record(path, request)?;
            self.run(
                path,
                request.village_id,
                VillageAction::Research {
                    building_id: request.research_building_id,
                    research: request.research_type,
                },
            )
        }

        async fn world_map(&self) -> Result<WorldMap, ApplicationError> {
            self.record("/api/world", &Value::Null)?;
            Ok(self.world.lock().unwrap().clone())
        }

        async fn attack(&self, request: &AttackRequest) -> Result<String, ApplicationError> {
            let path = "/api/combat";
            self.record(path, request)?;
            self.run(
                path,
                request.from_village_id,
                VillageAction::Attack {
                    target: request.to_village_id,
                    units: request
                        .units
                        .iter()
                        .map(|u| (u.unit_type, u.amount))
                        .collect(),
                },
            )?;
            Ok(format!(
                "Attack on village {} launched",
                request.to_village_id
            ))
        }
    }

    pub fn assert_handler_success<T: std::fmt::Debug>(result: Result<T, ApplicationError>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => panic!("Handler returned an error: {e:?}"),
        }
    }
}
