//! Vehicle load alerts and task urgency notifications.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::allocator::Allocation;
use crate::model::{Task, Vehicle};

/// Share of capacity at or above which a vehicle counts as heavily loaded.
pub const HEAVY_LOAD_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        })
    }
}

/// Urgency shares the three-tier scale of [`Severity`].
pub type Urgency = Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleAlert {
    pub vehicle_id: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskNotification {
    pub task_id: String,
    pub priority: i64,
    pub urgency: Urgency,
    pub window_start: f64,
    pub window_end: f64,
    pub message: String,
}

/// Load alerts per vehicle, in vehicle order.
///
/// An overloaded vehicle gets only the High alert. Otherwise a heavily
/// loaded vehicle gets a Medium alert and a vehicle without tasks a Low one.
/// Remaining capacity is taken from the allocation, falling back to the
/// vehicle record for vehicles the allocation does not know.
pub fn vehicle_alerts(vehicles: &[Vehicle], tasks: &[Task], allocation: &Allocation) -> Vec<VehicleAlert> {
    let demand: HashMap<&str, f64> = tasks.iter().map(|t| (t.id.as_str(), t.demand)).collect();
    let mut alerts = Vec::new();

    for vehicle in vehicles {
        let task_ids = allocation.tasks_for(&vehicle.id);
        let total_demand: f64 = task_ids
            .iter()
            .filter_map(|id| demand.get(id.as_str()))
            .sum();
        let remaining = allocation
            .remaining_capacity(&vehicle.id)
            .unwrap_or_else(|| vehicle.available_capacity());

        let mut raise = |severity: Severity, message: &str| {
            alerts.push(VehicleAlert {
                vehicle_id: vehicle.id.clone(),
                severity,
                message: message.to_string(),
            })
        };

        if remaining < 0.0 {
            raise(Severity::High, "Overloaded vehicle");
            continue;
        }
        if vehicle.capacity > 0.0 && total_demand >= HEAVY_LOAD_RATIO * vehicle.capacity {
            raise(Severity::Medium, "Vehicle heavily loaded");
        }
        if task_ids.is_empty() {
            raise(Severity::Low, "Idle vehicle with no tasks");
        }
    }

    alerts
}

/// Urgency from priority alone: 4 and up is High, 3 is Medium, the rest Low.
pub fn urgency_for(priority: i64) -> Urgency {
    match priority {
        p if p >= 4 => Severity::High,
        3 => Severity::Medium,
        _ => Severity::Low,
    }
}

/// One notification per task, ordered by window start (stable for ties).
pub fn task_notifications(tasks: &[Task]) -> Vec<TaskNotification> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| a.window_start().total_cmp(&b.window_start()));

    sorted
        .into_iter()
        .map(|task| {
            let urgency = urgency_for(task.priority);
            TaskNotification {
                task_id: task.id.clone(),
                priority: task.priority,
                urgency,
                window_start: task.window_start(),
                window_end: task.window_end(),
                message: format!("{}-priority task", urgency),
            }
        })
        .collect()
}
