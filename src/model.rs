//! Vehicle and task records.
//!
//! Field names follow the persisted shape so records round-trip through
//! scenario files and the hosted database unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Category of a vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Delivery,
    Reconnaissance,
    Strike,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Delivery => "delivery",
            VehicleType::Reconnaissance => "reconnaissance",
            VehicleType::Strike => "strike",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(VehicleType::Delivery),
            "reconnaissance" => Ok(VehicleType::Reconnaissance),
            "strike" => Ok(VehicleType::Strike),
            other => Err(format!("unknown vehicle type '{}'", other)),
        }
    }
}

/// A fleet vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub capacity: f64,
    /// Capacity left after already-committed demand. `None` means untouched,
    /// i.e. equal to `capacity`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_capacity: Option<f64>,
    pub location: Point,
    pub speed: f64,
    pub vehicle_type: VehicleType,
    /// Task types this vehicle may serve.
    pub capabilities: Vec<String>,
    pub energy_capacity: f64,
}

impl Vehicle {
    /// A vehicle with the normalization defaults applied.
    pub fn new(id: impl Into<String>) -> Self {
        let vehicle_type = VehicleType::default();
        Self {
            id: id.into(),
            capacity: 0.0,
            remaining_capacity: None,
            location: (0.0, 0.0),
            speed: 5.0,
            vehicle_type,
            capabilities: vec![vehicle_type.as_str().to_string()],
            energy_capacity: 100.0,
        }
    }

    /// Remaining capacity, falling back to full capacity when unset.
    pub fn available_capacity(&self) -> f64 {
        self.remaining_capacity.unwrap_or(self.capacity)
    }

    pub fn can_serve(&self, task_type: &str) -> bool {
        self.capabilities.iter().any(|cap| cap == task_type)
    }
}

/// A unit of work to be assigned to at most one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub location: Point,
    pub demand: f64,
    /// Preferred service interval (start, end). `start <= end` is not enforced.
    pub time_window: (f64, f64),
    /// Higher is more important.
    pub priority: i64,
    pub task_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_uavs: Option<u32>,
}

impl Task {
    /// A task with the normalization defaults applied.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: (0.0, 0.0),
            demand: 0.0,
            time_window: (0.0, 0.0),
            priority: 1,
            task_type: VehicleType::Delivery.as_str().to_string(),
            service_time: None,
            estimated_energy: None,
            required_uavs: None,
        }
    }

    pub fn window_start(&self) -> f64 {
        self.time_window.0
    }

    pub fn window_end(&self) -> f64 {
        self.time_window.1
    }
}
