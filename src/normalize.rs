//! Ingestion of loosely typed vehicle and task records.
//!
//! Raw records arrive as JSON objects from uploaded configs or the hosted
//! database. Missing optional fields are defaulted, records without an id are
//! skipped, and strike tasks are dropped. Anything surprising is reported as a
//! human-readable warning rather than an error.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::geometry::Point;
use crate::model::{Task, Vehicle, VehicleType};

/// Task type that is never schedulable.
pub const FORBIDDEN_TASK_TYPE: &str = "strike";

/// Values substituted for missing fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeDefaults {
    pub capacity: f64,
    pub location: Point,
    pub speed: f64,
    pub vehicle_type: VehicleType,
    pub energy_capacity: f64,
    pub demand: f64,
    pub priority: i64,
    pub time_window: (f64, f64),
    pub task_type: String,
}

impl Default for NormalizeDefaults {
    fn default() -> Self {
        Self {
            capacity: 0.0,
            location: (0.0, 0.0),
            speed: 5.0,
            vehicle_type: VehicleType::Delivery,
            energy_capacity: 100.0,
            demand: 0.0,
            priority: 1,
            time_window: (0.0, 0.0),
            task_type: VehicleType::Delivery.as_str().to_string(),
        }
    }
}

/// Validated records plus the warnings raised while producing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub vehicles: Vec<Vehicle>,
    pub tasks: Vec<Task>,
    pub warnings: Vec<String>,
}

pub fn normalize(raw_vehicles: &[Value], raw_tasks: &[Value]) -> Normalized {
    normalize_with(raw_vehicles, raw_tasks, &NormalizeDefaults::default())
}

pub fn normalize_with(
    raw_vehicles: &[Value],
    raw_tasks: &[Value],
    defaults: &NormalizeDefaults,
) -> Normalized {
    let mut warnings = Vec::new();

    let vehicles = raw_vehicles
        .iter()
        .filter_map(|raw| normalize_vehicle(raw, defaults, &mut warnings))
        .collect();

    let tasks = raw_tasks
        .iter()
        .filter_map(|raw| normalize_task(raw, defaults, &mut warnings))
        .collect();

    Normalized {
        vehicles,
        tasks,
        warnings,
    }
}

fn normalize_vehicle(
    raw: &Value,
    defaults: &NormalizeDefaults,
    warnings: &mut Vec<String>,
) -> Option<Vehicle> {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);
    let Some(id) = record_id(record) else {
        debug!("skipping vehicle record without id");
        return None;
    };

    let mut fields = FieldReader {
        kind: "Vehicle",
        id: &id,
        record,
        warnings,
    };

    let capacity = fields.number("capacity", defaults.capacity);
    let location = fields.point("location", defaults.location);
    let speed = fields.nonzero_number("speed", defaults.speed);
    let energy_capacity = fields.nonzero_number("energy_capacity", defaults.energy_capacity);

    let vehicle_type = match fields.text("vehicle_type") {
        Some(name) => match name.parse::<VehicleType>() {
            Ok(vehicle_type) => vehicle_type,
            Err(_) => {
                fields.warn(format!(
                    "unknown vehicle_type '{}', using {}",
                    name, defaults.vehicle_type
                ));
                defaults.vehicle_type
            }
        },
        None => defaults.vehicle_type,
    };

    let capabilities = fields
        .capabilities("capabilities")
        .unwrap_or_else(|| vec![vehicle_type.as_str().to_string()]);

    Some(Vehicle {
        id,
        capacity,
        remaining_capacity: None,
        location,
        speed,
        vehicle_type,
        capabilities,
        energy_capacity,
    })
}

fn normalize_task(
    raw: &Value,
    defaults: &NormalizeDefaults,
    warnings: &mut Vec<String>,
) -> Option<Task> {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);
    let id = record_id(record);

    // Checked before the id so that even an id-less strike record is reported.
    if record.get("task_type").and_then(Value::as_str) == Some(FORBIDDEN_TASK_TYPE) {
        let message = format!(
            "Task {} removed (strike not allowed).",
            id.as_deref().unwrap_or("<missing id>")
        );
        warn!("{}", message);
        warnings.push(message);
        return None;
    }

    let Some(id) = id else {
        debug!("skipping task record without id");
        return None;
    };

    let mut fields = FieldReader {
        kind: "Task",
        id: &id,
        record,
        warnings,
    };

    let location = fields.point("location", defaults.location);
    let demand = fields.number("demand", defaults.demand);
    let priority = fields.priority("priority", defaults.priority);
    let time_window = fields.point("time_window", defaults.time_window);
    let task_type = fields
        .text("task_type")
        .unwrap_or_else(|| defaults.task_type.clone());
    let service_time = fields.optional_number("service_time");
    let estimated_energy = fields.optional_number("estimated_energy");
    let required_uavs = fields
        .optional_number("required_uavs")
        .and_then(|n| (n >= 0.0 && n.fract() == 0.0).then_some(n as u32));

    Some(Task {
        id,
        location,
        demand,
        time_window,
        priority,
        task_type,
        service_time,
        estimated_energy,
        required_uavs,
    })
}

/// Non-empty string ids are taken as-is; numeric ids (database keys) are
/// rendered as strings.
fn record_id(record: &Map<String, Value>) -> Option<String> {
    match record.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads typed fields out of one raw record, recording a warning whenever a
/// field is present but unusable.
struct FieldReader<'a> {
    kind: &'static str,
    id: &'a str,
    record: &'a Map<String, Value>,
    warnings: &'a mut Vec<String>,
}

impl<'a> FieldReader<'a> {
    fn warn(&mut self, detail: String) {
        let message = format!("{} {}: {}.", self.kind, self.id, detail);
        warn!("{}", message);
        self.warnings.push(message);
    }

    fn invalid(&mut self, field: &str) {
        self.warn(format!("invalid {}, using default", field));
    }

    /// `None` for absent or null fields.
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.record.get(field).filter(|value| !value.is_null())
    }

    fn number(&mut self, field: &str, default: f64) -> f64 {
        match self.present(field) {
            None => default,
            Some(value) => match value.as_f64() {
                Some(n) => n,
                None => {
                    self.invalid(field);
                    default
                }
            },
        }
    }

    /// Like [`Self::number`], but a zero value also takes the default.
    fn nonzero_number(&mut self, field: &str, default: f64) -> f64 {
        let n = self.number(field, default);
        if n == 0.0 { default } else { n }
    }

    fn optional_number(&mut self, field: &str) -> Option<f64> {
        let value = self.present(field)?;
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.invalid(field);
                None
            }
        }
    }

    fn priority(&mut self, field: &str, default: i64) -> i64 {
        let Some(value) = self.present(field) else {
            return default;
        };
        let parsed = value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|n| n.fract() == 0.0)
                .map(|n| n as i64)
        });
        match parsed {
            Some(0) => default,
            Some(n) => n,
            None => {
                self.invalid(field);
                default
            }
        }
    }

    /// A two-element numeric array.
    fn point(&mut self, field: &str, default: Point) -> Point {
        let Some(value) = self.present(field) else {
            return default;
        };
        let pair = value.as_array().and_then(|items| match items.as_slice() {
            [a, b] => Some((a.as_f64()?, b.as_f64()?)),
            _ => None,
        });
        match pair {
            Some(point) => point,
            None => {
                self.invalid(field);
                default
            }
        }
    }

    /// Non-empty string, or `None` for missing/empty values.
    fn text(&mut self, field: &str) -> Option<String> {
        match self.present(field)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            _ => {
                self.invalid(field);
                None
            }
        }
    }

    /// A list of strings, or a single string wrapped into one.
    fn capabilities(&mut self, field: &str) -> Option<Vec<String>> {
        match self.present(field)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(vec![s.clone()]),
            Value::Array(items) => {
                let caps: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect();
                if caps.is_none() {
                    self.invalid(field);
                }
                caps
            }
            _ => {
                self.invalid(field);
                None
            }
        }
    }
}
