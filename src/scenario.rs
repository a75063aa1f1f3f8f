//! Scenario import/export.
//!
//! A scenario file is `{ "vehicles": [...], "tasks": [...] }`. The persisted
//! form keys each collection by record id instead; both are accepted on import.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{Task, Vehicle};
use crate::normalize::{normalize, Normalized};

#[derive(Debug)]
pub enum ScenarioError {
    Io(io::Error),
    Json(serde_json::Error),
    /// The document parsed but is not shaped like a scenario.
    Shape(String),
}

impl From<io::Error> for ScenarioError {
    fn from(err: io::Error) -> Self {
        ScenarioError::Io(err)
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(err: serde_json::Error) -> Self {
        ScenarioError::Json(err)
    }
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(err) => write!(f, "scenario I/O failed: {}", err),
            ScenarioError::Json(err) => write!(f, "scenario is not valid JSON: {}", err),
            ScenarioError::Shape(msg) => write!(f, "malformed scenario: {}", msg),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Io(err) => Some(err),
            ScenarioError::Json(err) => Some(err),
            ScenarioError::Shape(_) => None,
        }
    }
}

/// A validated snapshot, as exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub vehicles: Vec<Vehicle>,
    pub tasks: Vec<Task>,
}

/// Collections keyed by record id, the shape the hosted database stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyedScenario {
    pub vehicles: Map<String, Value>,
    pub tasks: Map<String, Value>,
}

impl Scenario {
    pub fn from_normalized(normalized: &Normalized) -> Self {
        Self {
            vehicles: normalized.vehicles.clone(),
            tasks: normalized.tasks.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        debug!(
            path = %path.display(),
            vehicles = self.vehicles.len(),
            tasks = self.tasks.len(),
            "wrote scenario"
        );
        Ok(())
    }

    pub fn to_keyed_maps(&self) -> Result<KeyedScenario, ScenarioError> {
        let mut keyed = KeyedScenario::default();
        for vehicle in &self.vehicles {
            keyed
                .vehicles
                .insert(vehicle.id.clone(), serde_json::to_value(vehicle)?);
        }
        for task in &self.tasks {
            keyed.tasks.insert(task.id.clone(), serde_json::to_value(task)?);
        }
        Ok(keyed)
    }
}

/// Records as they arrive, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScenario {
    pub vehicles: Vec<Value>,
    pub tasks: Vec<Value>,
}

impl RawScenario {
    pub fn from_value(value: Value) -> Result<Self, ScenarioError> {
        let Value::Object(mut document) = value else {
            return Err(ScenarioError::Shape("expected a JSON object".to_string()));
        };
        let vehicles = records_from(document.remove("vehicles").unwrap_or(Value::Null), "vehicles")?;
        let tasks = records_from(document.remove("tasks").unwrap_or(Value::Null), "tasks")?;
        Ok(Self { vehicles, tasks })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let raw = Self::from_json_str(&fs::read_to_string(path)?)?;
        debug!(
            path = %path.display(),
            vehicles = raw.vehicles.len(),
            tasks = raw.tasks.len(),
            "read scenario"
        );
        Ok(raw)
    }

    pub fn normalize(&self) -> Normalized {
        normalize(&self.vehicles, &self.tasks)
    }
}

/// Flatten one collection into a record list.
///
/// Accepts an array, an id-keyed object (records come back in key order; a
/// record without its own `id` takes its key), or null/absent for empty.
pub(crate) fn records_from(value: Value, collection: &str) -> Result<Vec<Value>, ScenarioError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        Value::Object(keyed) => Ok(keyed
            .into_iter()
            .map(|(key, mut record)| {
                if let Value::Object(fields) = &mut record {
                    fields.entry("id").or_insert(Value::String(key));
                }
                record
            })
            .collect()),
        other => Err(ScenarioError::Shape(format!(
            "{} must be an array or an id-keyed object, got {}",
            collection, other
        ))),
    }
}
