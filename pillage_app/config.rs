use dotenvy::dotenv;
use std::env;

use pillage_types::common::VillageId;

const DEFAULT_API_URL: &str = "http://localhost:8081";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub village_id: Option<VillageId>,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let api_url = match env::var("PILLAGE_API_URL") {
            Ok(val) if !val.trim().is_empty() => val.trim_end_matches('/').to_string(),
            _ => DEFAULT_API_URL.to_string(),
        };

        let api_token = match env::var("PILLAGE_API_TOKEN") {
            Ok(val) if !val.is_empty() => Some(val),
            _ => None,
        };

        let village_id = match env::var("PILLAGE_VILLAGE_ID") {
            Ok(val) => val.parse::<VillageId>().ok(),
            Err(_) => None,
        };

        let request_timeout_secs = match env::var("PILLAGE_REQUEST_TIMEOUT_SECS") {
            Ok(val) => val.parse::<u64>().unwrap_or(DEFAULT_TIMEOUT_SECS).max(1),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            api_url,
            api_token,
            village_id,
            request_timeout_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            village_id: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_server() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8081");
        assert_eq!(config.api_token, None);
        assert_eq!(config.village_id, None);
        assert_eq!(config.request_timeout_secs, 10);
    }
}
