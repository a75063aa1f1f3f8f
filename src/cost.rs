//! Scoring of a single (vehicle, task) pairing.
//!
//! Higher scores are better. An infeasible pairing scores
//! [`INFEASIBLE`] (negative infinity) so it never wins a maximum comparison.

use crate::geometry::euclidean;
use crate::model::{Task, Vehicle};

/// Score of a pairing that must never be selected.
pub const INFEASIBLE: f64 = f64::NEG_INFINITY;

/// Numeric constants of the scoring function.
#[derive(Debug, Clone, PartialEq)]
pub struct CostWeights {
    /// Score of a zero-distance pairing before priority and window factors.
    pub proximity_scale: f64,
    /// Multiplier when arrival is after the window end.
    pub late_factor: f64,
    /// Multiplier when arrival is before the window start.
    pub early_factor: f64,
    /// Multiplier when arrival falls inside the window.
    pub on_time_factor: f64,
    /// Speeds below this are clamped before computing travel time.
    pub min_speed: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            proximity_scale: 1000.0,
            late_factor: 0.1,
            early_factor: 0.8,
            on_time_factor: 1.0,
            min_speed: 0.01,
        }
    }
}

impl CostWeights {
    /// Window factor for a given arrival time. Late is checked first, so an
    /// inverted window (start > end) reads as late once arrival passes `end`.
    pub fn window_factor(&self, arrival_time: f64, window: (f64, f64)) -> f64 {
        let (start, end) = window;
        if arrival_time > end {
            self.late_factor
        } else if arrival_time < start {
            self.early_factor
        } else {
            self.on_time_factor
        }
    }
}

/// Capability and capacity gates. Both must pass for a pairing to be scored.
pub fn is_feasible(vehicle: &Vehicle, task: &Task) -> bool {
    vehicle.can_serve(&task.task_type) && task.demand <= vehicle.available_capacity()
}

/// Score with the default weights.
pub fn cost(vehicle: &Vehicle, task: &Task, current_time: f64) -> f64 {
    cost_with(vehicle, task, current_time, &CostWeights::default())
}

/// Score a pairing, or return [`INFEASIBLE`].
///
/// `score = scale / (1 + distance) * priority * window_factor`, where the
/// window factor depends on when the vehicle would arrive travelling in a
/// straight line from its current location starting at `current_time`.
pub fn cost_with(vehicle: &Vehicle, task: &Task, current_time: f64, weights: &CostWeights) -> f64 {
    score(vehicle, vehicle.available_capacity(), task, current_time, weights)
}

/// Scoring against an explicit remaining capacity, so the allocator can track
/// capacity without touching the vehicle record.
pub(crate) fn score(
    vehicle: &Vehicle,
    available_capacity: f64,
    task: &Task,
    current_time: f64,
    weights: &CostWeights,
) -> f64 {
    if !vehicle.can_serve(&task.task_type) {
        return INFEASIBLE;
    }
    if task.demand > available_capacity {
        return INFEASIBLE;
    }

    let distance = euclidean(vehicle.location, task.location);
    let base_score = weights.proximity_scale / (1.0 + distance);
    let travel_time = distance / vehicle.speed.max(weights.min_speed);
    let arrival_time = current_time + travel_time;
    let window_factor = weights.window_factor(arrival_time, task.time_window);

    base_score * task.priority as f64 * window_factor
}
