//! Hosted real-time database adapter (Firebase-style REST API).
//!
//! Each user's data lives under `users/<uid>/` as id-keyed `vehicles` and
//! `tasks` collections plus a `warnings` list.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::normalize::Normalized;
use crate::scenario::{records_from, RawScenario, Scenario, ScenarioError};
use crate::traits::ScenarioSource;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub user_id: String,
    /// Sent as the `auth` query parameter when set.
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            user_id: "local".to_string(),
            auth_token: None,
            timeout_secs: 10,
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `FLEET_DB_URL`, `FLEET_DB_USER`,
    /// `FLEET_DB_TOKEN` and `FLEET_DB_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("FLEET_DB_URL") {
            config.base_url = url;
        }
        if let Ok(user) = std::env::var("FLEET_DB_USER") {
            config.user_id = user;
        }
        if let Ok(token) = std::env::var("FLEET_DB_TOKEN") {
            config.auth_token = Some(token);
        }
        if let Some(secs) = std::env::var("FLEET_DB_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = secs;
        }
        config
    }
}

#[derive(Debug)]
pub enum StoreError {
    Http(reqwest::Error),
    Status { path: String, status: u16 },
    Scenario(ScenarioError),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Http(err)
    }
}

impl From<ScenarioError> for StoreError {
    fn from(err: ScenarioError) -> Self {
        StoreError::Scenario(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Http(err) => write!(f, "database request failed: {}", err),
            StoreError::Status { path, status } => {
                write!(f, "database returned status {} for {}", status, path)
            }
            StoreError::Scenario(err) => write!(f, "database payload rejected: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Http(err) => Some(err),
            StoreError::Scenario(err) => Some(err),
            StoreError::Status { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RealtimeDbClient {
    config: StoreConfig,
    client: reqwest::blocking::Client,
}

impl RealtimeDbClient {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn url(&self, collection: &str) -> String {
        let mut url = format!(
            "{}/users/{}/{}.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.user_id,
            collection
        );
        if let Some(token) = &self.config.auth_token {
            url.push_str("?auth=");
            url.push_str(token);
        }
        url
    }

    fn check(&self, collection: &str, response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        warn!(collection, status = status.as_u16(), "database request rejected");
        Err(StoreError::Status {
            path: format!("users/{}/{}", self.config.user_id, collection),
            status: status.as_u16(),
        })
    }

    /// Read one collection. A missing collection reads as `null`.
    pub fn get(&self, collection: &str) -> Result<Value, StoreError> {
        debug!(collection, "GET");
        let response = self.client.get(self.url(collection)).send()?;
        Ok(self.check(collection, response)?.json::<Value>()?)
    }

    /// Replace one collection.
    pub fn put<T: Serialize + ?Sized>(&self, collection: &str, body: &T) -> Result<(), StoreError> {
        debug!(collection, "PUT");
        let response = self.client.put(self.url(collection)).json(body).send()?;
        self.check(collection, response)?;
        Ok(())
    }

    pub fn fetch_warnings(&self) -> Result<Vec<String>, StoreError> {
        let records = records_from(self.get("warnings")?, "warnings")?;
        Ok(records
            .into_iter()
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect())
    }

    /// Store a normalized config: vehicles and tasks as id-keyed maps, plus
    /// the warnings raised while normalizing it.
    pub fn save_config(&self, normalized: &Normalized) -> Result<(), StoreError> {
        let keyed = Scenario::from_normalized(normalized).to_keyed_maps()?;
        self.put("vehicles", &keyed.vehicles)?;
        self.put("tasks", &keyed.tasks)?;
        self.put("warnings", &normalized.warnings)?;
        Ok(())
    }
}

impl ScenarioSource for RealtimeDbClient {
    type Error = StoreError;

    fn load_raw(&self) -> Result<RawScenario, Self::Error> {
        Ok(RawScenario {
            vehicles: records_from(self.get("vehicles")?, "vehicles")?,
            tasks: records_from(self.get("tasks")?, "tasks")?,
        })
    }
}
