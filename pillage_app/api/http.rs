use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use pillage_game::models::village::Village;
use pillage_types::{
    common::VillageId,
    errors::{AppError, ApplicationError},
};

use crate::config::Config;

use super::{
    AttackRequest, BuildRequest, GameApi, LevelUpRequest, ResearchRequest, TrainRequest,
    VillageSummary, WorldMap,
};

/// `GameApi` over HTTP, with an optional bearer token on every request.
pub struct HttpGameApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGameApi {
    pub fn new(config: &Config) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, path: &str, builder: RequestBuilder) -> Result<String, ApplicationError> {
        let response: Response = builder.send().await.map_err(|e| AppError::Transport {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| AppError::Transport {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        debug!(path, status = status.as_u16(), "Game server answered");

        if !status.is_success() {
            return Err(AppError::HttpStatus {
                path: path.to_string(),
                status: status.as_u16(),
                message: response_message(&body),
            }
            .into());
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApplicationError> {
        let body = self.send(path, self.request(Method::GET, path)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, ApplicationError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = self
            .send(path, self.request(Method::POST, path).json(payload))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn list_villages(&self) -> Result<Vec<VillageSummary>, ApplicationError> {
        self.get_json("/api/village/").await
    }

    async fn get_village(&self, village_id: VillageId) -> Result<Village, ApplicationError> {
        self.get_json(&format!("/api/village/{village_id}")).await
    }

    async fn build(&self, request: &BuildRequest) -> Result<Village, ApplicationError> {
        self.post_json("/api/building/build", request).await
    }

    async fn level_up(&self, request: &LevelUpRequest) -> Result<Village, ApplicationError> {
        self.post_json("/api/building/levelup", request).await
    }

    async fn train(&self, request: &TrainRequest) -> Result<Village, ApplicationError> {
        self.post_json("/api/production/train", request).await
    }

    async fn start_research(
        &self,
        request: &ResearchRequest,
    ) -> Result<Village, ApplicationError> {
        self.post_json("/api/research/", request).await
    }

    async fn world_map(&self) -> Result<WorldMap, ApplicationError> {
        self.get_json("/api/world").await
    }

    async fn attack(&self, request: &AttackRequest) -> Result<String, ApplicationError> {
        let path = "/api/combat";
        let body = self
            .send(path, self.request(Method::POST, path).json(request))
            .await?;
        Ok(response_message(&body))
    }
}

/// Combat results and error bodies come either as `{"message": ...}`, as a
/// JSON string or as plain text.
fn response_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => body.trim().to_string(),
        },
        Ok(Value::String(message)) => message,
        _ => body.trim().to_string(),
    }
}
