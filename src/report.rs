//! One-shot bundle of every view derived from a single allocation run.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::alerts::{task_notifications, vehicle_alerts, TaskNotification, VehicleAlert};
use crate::allocator::{allocate_with, unallocated, AllocateOptions, Allocation};
use crate::model::{Task, Vehicle};
use crate::normalize::Normalized;
use crate::routes::route_lengths;

/// Overall status shown on the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SystemStatus {
    Optimal,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetReport {
    pub allocation: Allocation,
    pub route_lengths: HashMap<String, f64>,
    pub total_route_length: f64,
    pub tasks_per_vehicle: BTreeMap<String, usize>,
    pub alerts: Vec<VehicleAlert>,
    pub notifications: Vec<TaskNotification>,
    pub unallocated: Vec<Task>,
    /// Task count per priority, ascending by priority.
    pub priority_distribution: BTreeMap<i64, usize>,
    pub warnings: Vec<String>,
    pub status: SystemStatus,
}

impl FleetReport {
    pub fn build(vehicles: &[Vehicle], tasks: &[Task], warnings: &[String], options: &AllocateOptions) -> Self {
        let allocation = allocate_with(vehicles, tasks, options);

        let route_lengths = route_lengths(vehicles, tasks, &allocation);
        let total_route_length: f64 = vehicles
            .iter()
            .filter_map(|v| route_lengths.get(&v.id))
            .sum();

        let tasks_per_vehicle = allocation
            .assignments
            .iter()
            .map(|a| (a.vehicle_id.clone(), a.task_ids.len()))
            .collect();

        let mut priority_distribution: BTreeMap<i64, usize> = BTreeMap::new();
        for task in tasks {
            *priority_distribution.entry(task.priority).or_insert(0) += 1;
        }

        let status = if warnings.is_empty() {
            SystemStatus::Optimal
        } else {
            SystemStatus::Warning
        };

        Self {
            alerts: vehicle_alerts(vehicles, tasks, &allocation),
            notifications: task_notifications(tasks),
            unallocated: unallocated(tasks, &allocation).into_iter().cloned().collect(),
            allocation,
            route_lengths,
            total_route_length,
            tasks_per_vehicle,
            priority_distribution,
            warnings: warnings.to_vec(),
            status,
        }
    }

    /// Report over a normalized snapshot, carrying its warnings along.
    pub fn from_normalized(normalized: &Normalized, options: &AllocateOptions) -> Self {
        Self::build(&normalized.vehicles, &normalized.tasks, &normalized.warnings, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    #[test]
    fn test_report_over_normalized_snapshot() {
        let normalized = normalize(
            &[json!({"id": "V1", "capacity": 50}), json!({"id": "V2", "capacity": 50})],
            &[
                json!({"id": "T1", "location": [3, 4], "demand": 10, "priority": 2, "time_window": [0, 100]}),
                json!({"id": "T2", "task_type": "reconnaissance", "priority": 4}),
                json!({"id": "T3", "task_type": "strike"}),
            ],
        );
        let report = FleetReport::from_normalized(&normalized, &AllocateOptions::default());

        assert_eq!(report.status, SystemStatus::Warning);
        assert_eq!(report.allocation.tasks_for("V1"), ["T1"]);
        assert_eq!(report.tasks_per_vehicle["V2"], 0);
        assert_eq!(report.unallocated.len(), 1);
        assert_eq!(report.unallocated[0].id, "T2");
        assert!((report.total_route_length - 5.0).abs() < 1e-9);
        assert_eq!(report.priority_distribution[&2], 1);
        assert_eq!(report.priority_distribution[&4], 1);
        assert_eq!(report.alerts.len(), 1, "only V2 is idle");
        assert_eq!(report.alerts[0].vehicle_id, "V2");
    }

    #[test]
    fn test_empty_snapshot_is_optimal() {
        let report = FleetReport::build(&[], &[], &[], &AllocateOptions::default());
        assert_eq!(report.status, SystemStatus::Optimal);
        assert_eq!(report.total_route_length, 0.0);
        assert!(report.unallocated.is_empty());
    }
}
