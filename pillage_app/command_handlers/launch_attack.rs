use std::sync::Arc;

use tracing::{info, warn};

use pillage_game::models::village::Village;
use pillage_types::errors::{AppError, ApplicationError};

use crate::{
    api::{AttackRequest, GameApi, UnitAmount},
    config::Config,
    cqrs::{CommandHandler, commands::LaunchAttack},
    store::VillageAction,
};

pub struct LaunchAttackCommandHandler {}

impl LaunchAttackCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<LaunchAttack> for LaunchAttackCommandHandler {
    fn action(&self, command: &LaunchAttack) -> VillageAction {
        VillageAction::Attack {
            target: command.target_village_id,
            units: command.units.clone(),
        }
    }

    /// The combat endpoint only answers with a message, so the village is
    /// fetched again afterwards. Once the attack is sent, a failed fetch is
    /// reported as `SnapshotUnavailable` so the attack is not undone.
    async fn handle(
        &self,
        command: LaunchAttack,
        api: &Arc<dyn GameApi>,
        _config: &Arc<Config>,
    ) -> Result<Village, ApplicationError> {
        let request = AttackRequest {
            from_village_id: command.village_id,
            to_village_id: command.target_village_id,
            units: command
                .units
                .iter()
                .filter(|(_, amount)| **amount > 0)
                .map(|(unit, amount)| UnitAmount {
                    unit_type: *unit,
                    amount: *amount,
                })
                .collect(),
        };

        let message = api.attack(&request).await?;
        info!(
            from = command.village_id,
            to = command.target_village_id,
            %message,
            "Attack submitted"
        );

        match api.get_village(command.village_id).await {
            Ok(village) => Ok(village),
            Err(e) => {
                warn!(village_id = command.village_id, error = %e, "Village reload failed after attack");
                Err(AppError::SnapshotUnavailable {
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pillage_game::test_utils::{IdSequence, VillageFactoryOptions, village_factory};
    use pillage_types::units::UnitName;
    use serde_json::json;

    use super::*;
    use crate::test_utils::tests::{MockGameApi, assert_handler_success};

    #[tokio::test]
    async fn test_launch_attack_handler_success() {
        let mut ids = IdSequence::default();
        let village = village_factory(
            VillageFactoryOptions {
                units: Some(BTreeMap::from([(UnitName::Spear, 10), (UnitName::Axe, 3)])),
                ..Default::default()
            },
            &mut ids,
        );
        let mock = MockGameApi::with_village(village.clone());
        let api: Arc<dyn GameApi> = Arc::new(mock.clone());
        let config = Arc::new(Config::default());

        let command = LaunchAttack {
            village_id: village.id,
            target_village_id: 42,
            units: BTreeMap::from([(UnitName::Spear, 4), (UnitName::Axe, 0)]),
        };
        let updated = assert_handler_success(
            LaunchAttackCommandHandler::new()
                .handle(command, &api, &config)
                .await,
        );

        assert_eq!(updated.units_of(UnitName::Spear), 6);
        assert_eq!(updated.units_of(UnitName::Axe), 3);

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].1,
            json!({
                "fromVillageId": village.id,
                "toVillageId": 42,
                "units": [ { "unitType": "Spear", "amount": 4 } ]
            })
        );
        assert_eq!(requests[1].0, format!("/api/village/{}", village.id));
    }

    #[tokio::test]
    async fn test_launch_attack_reload_failure_keeps_attack() {
        let mut ids = IdSequence::default();
        let village = village_factory(Default::default(), &mut ids);
        let mock = MockGameApi::with_village(village.clone());
        mock.fail_path(&format!("/api/village/{}", village.id), 503);
        let api: Arc<dyn GameApi> = Arc::new(mock.clone());
        let config = Arc::new(Config::default());

        let command = LaunchAttack {
            village_id: village.id,
            target_village_id: 42,
            units: BTreeMap::from([(UnitName::Spear, 4)]),
        };
        let result = LaunchAttackCommandHandler::new()
            .handle(command, &api, &config)
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(AppError::SnapshotUnavailable { .. }))
        ));
        assert_eq!(mock.village(village.id).unwrap().units_of(UnitName::Spear), 6);
    }
}
