//! Route length estimation for an allocation.
//!
//! Routes are ordered nearest-first by distance from the vehicle's own
//! location. This is a display heuristic, not a tour optimization: only the
//! first hop is considered when sorting.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::allocator::Allocation;
use crate::geometry::{euclidean, path_length};
use crate::model::{Task, Vehicle};

/// Route length per vehicle id. Vehicles without tasks map to 0.
pub fn route_lengths(vehicles: &[Vehicle], tasks: &[Task], allocation: &Allocation) -> HashMap<String, f64> {
    let by_id = index_tasks(tasks);

    vehicles
        .par_iter()
        .map(|vehicle| {
            let route = sorted_route(vehicle, &by_id, allocation.tasks_for(&vehicle.id));
            let length = path_length(vehicle.location, route.iter().map(|task| task.location));
            (vehicle.id.clone(), length)
        })
        .collect()
}

/// The vehicle's tasks in nearest-first order. Unknown ids are skipped.
pub fn ordered_route<'a>(vehicle: &Vehicle, tasks: &'a [Task], task_ids: &[String]) -> Vec<&'a Task> {
    sorted_route(vehicle, &index_tasks(tasks), task_ids)
}

/// Path length visiting tasks in exactly the given order, for operator
/// reordered routes. Unknown ids are skipped.
pub fn route_length_for_order(vehicle: &Vehicle, tasks: &[Task], order: &[String]) -> f64 {
    let by_id = index_tasks(tasks);
    let points = order
        .iter()
        .filter_map(|id| by_id.get(id.as_str()))
        .map(|task| task.location);
    path_length(vehicle.location, points)
}

fn index_tasks(tasks: &[Task]) -> HashMap<&str, &Task> {
    let mut by_id = HashMap::with_capacity(tasks.len());
    for task in tasks {
        by_id.entry(task.id.as_str()).or_insert(task);
    }
    by_id
}

fn sorted_route<'a>(vehicle: &Vehicle, by_id: &HashMap<&str, &'a Task>, task_ids: &[String]) -> Vec<&'a Task> {
    let mut route: Vec<&Task> = task_ids
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect();
    // Stable, so equidistant tasks keep assignment order.
    route.sort_by(|a, b| {
        euclidean(vehicle.location, a.location).total_cmp(&euclidean(vehicle.location, b.location))
    });
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::Assignment;

    fn task(id: &str, x: f64, y: f64) -> Task {
        let mut task = Task::new(id);
        task.location = (x, y);
        task
    }

    fn allocation_of(vehicle_id: &str, ids: &[&str]) -> Allocation {
        Allocation {
            assignments: vec![Assignment {
                vehicle_id: vehicle_id.to_string(),
                task_ids: ids.iter().map(|s| s.to_string()).collect(),
                remaining_capacity: 0.0,
            }],
        }
    }

    #[test]
    fn test_idle_vehicle_has_zero_length() {
        let vehicles = vec![Vehicle::new("V1")];
        let lengths = route_lengths(&vehicles, &[], &Allocation::default());
        assert_eq!(lengths["V1"], 0.0);
    }

    #[test]
    fn test_route_sorted_nearest_first() {
        let vehicle = Vehicle::new("V1");
        let tasks = vec![task("far", 6.0, 8.0), task("near", 3.0, 4.0)];
        let allocation = allocation_of("V1", &["far", "near"]);

        let lengths = route_lengths(&[vehicle.clone()], &tasks, &allocation);
        // origin -> near (5) -> far (5)
        assert!((lengths["V1"] - 10.0).abs() < 1e-9);

        let ordered = ordered_route(&vehicle, &tasks, allocation.tasks_for("V1"));
        let ids: Vec<&str> = ordered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "far"]);
    }

    #[test]
    fn test_first_hop_heuristic_not_tour_optimal() {
        // Sorted by distance from the vehicle: a (1), b (2), c (3), although
        // a -> c -> b would be shorter.
        let vehicle = Vehicle::new("V1");
        let tasks = vec![task("a", 1.0, 0.0), task("b", -2.0, 0.0), task("c", 3.0, 0.0)];
        let allocation = allocation_of("V1", &["c", "b", "a"]);
        let lengths = route_lengths(&[vehicle], &tasks, &allocation);
        // 1 + 3 + 5
        assert!((lengths["V1"] - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_order_is_respected() {
        let vehicle = Vehicle::new("V1");
        let tasks = vec![task("near", 3.0, 4.0), task("far", 6.0, 8.0)];
        let order = vec!["far".to_string(), "near".to_string(), "missing".to_string()];
        // origin -> far (10) -> near (5)
        let length = route_length_for_order(&vehicle, &tasks, &order);
        assert!((length - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_task_ids_skipped() {
        let vehicle = Vehicle::new("V1");
        let tasks = vec![task("T1", 3.0, 4.0)];
        let allocation = allocation_of("V1", &["ghost", "T1"]);
        let lengths = route_lengths(&[vehicle], &tasks, &allocation);
        assert!((lengths["V1"] - 5.0).abs() < 1e-9);
    }
}
