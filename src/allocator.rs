//! Greedy task allocation (single pass, static snapshot).
//!
//! Each round scores every (vehicle, unassigned task) pair, commits the single
//! best feasible pair, and repeats until nothing feasible remains. Simulated
//! time never advances: every pair is scored as if dispatched at t = 0.

use std::collections::{BTreeMap, HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cost::{self, CostWeights, INFEASIBLE};
use crate::model::{Task, Vehicle};

/// Dispatch time used for every scoring call.
const DISPATCH_TIME: f64 = 0.0;

/// How to choose between pairs with exactly equal scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// First pair in vehicle-major, task-minor input order wins.
    #[default]
    InputOrder,
    /// Smallest vehicle id wins, then smallest task id. Independent of input order.
    ById,
}

#[derive(Debug, Clone, Default)]
pub struct AllocateOptions {
    pub weights: CostWeights,
    pub tie_break: TieBreak,
}

/// Tasks committed to one vehicle, in assignment order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub vehicle_id: String,
    pub task_ids: Vec<String>,
    /// Capacity minus the demand of every task in `task_ids`.
    pub remaining_capacity: f64,
}

/// Result of an allocation run. One entry per vehicle, in vehicle input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub assignments: Vec<Assignment>,
}

impl Allocation {
    /// Rebuild an allocation from a vehicle id -> task ids map (for example a
    /// stored or hand-edited one). Remaining capacities are recomputed from
    /// task demand and may be negative. Unknown task ids carry no demand.
    pub fn from_map(vehicles: &[Vehicle], tasks: &[Task], map: &HashMap<String, Vec<String>>) -> Self {
        let demand: HashMap<&str, f64> = tasks.iter().map(|t| (t.id.as_str(), t.demand)).collect();

        let assignments = vehicles
            .iter()
            .map(|vehicle| {
                let task_ids = map.get(&vehicle.id).cloned().unwrap_or_default();
                let used: f64 = task_ids
                    .iter()
                    .filter_map(|id| demand.get(id.as_str()))
                    .sum();
                Assignment {
                    vehicle_id: vehicle.id.clone(),
                    remaining_capacity: vehicle.capacity - used,
                    task_ids,
                }
            })
            .collect();

        Self { assignments }
    }

    pub fn get(&self, vehicle_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.vehicle_id == vehicle_id)
    }

    /// Task ids assigned to a vehicle; empty for unknown vehicles.
    pub fn tasks_for(&self, vehicle_id: &str) -> &[String] {
        self.get(vehicle_id)
            .map(|a| a.task_ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn remaining_capacity(&self, vehicle_id: &str) -> Option<f64> {
        self.get(vehicle_id).map(|a| a.remaining_capacity)
    }

    pub fn assigned_ids(&self) -> HashSet<&str> {
        self.assignments
            .iter()
            .flat_map(|a| a.task_ids.iter().map(String::as_str))
            .collect()
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments.iter().map(|a| a.task_ids.len()).sum()
    }

    /// The vehicle id -> task ids shape consumed by views and persistence.
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.assignments
            .iter()
            .map(|a| (a.vehicle_id.clone(), a.task_ids.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    vehicle: usize,
    task: usize,
    score: f64,
}

pub fn allocate(vehicles: &[Vehicle], tasks: &[Task]) -> Allocation {
    allocate_with(vehicles, tasks, &AllocateOptions::default())
}

/// Assign tasks to vehicles greedily. Inputs are not modified.
///
/// Every vehicle starts from its full `capacity`, whatever its
/// `remaining_capacity` field says. A task id that appears more than once is
/// only considered at its first occurrence.
pub fn allocate_with(vehicles: &[Vehicle], tasks: &[Task], options: &AllocateOptions) -> Allocation {
    let mut remaining_capacity: Vec<f64> = vehicles.iter().map(|v| v.capacity).collect();
    let mut assigned: Vec<Vec<usize>> = vec![Vec::new(); vehicles.len()];

    let mut seen = HashSet::new();
    let mut open: Vec<usize> = (0..tasks.len())
        .filter(|&i| seen.insert(tasks[i].id.as_str()))
        .collect();

    while !open.is_empty() {
        // Best pair per vehicle, in parallel; `collect` keeps vehicle order so
        // the sequential reduction below sees pairs in input order.
        let per_vehicle: Vec<Option<Candidate>> = vehicles
            .par_iter()
            .enumerate()
            .map(|(vi, vehicle)| {
                open.iter()
                    .map(|&ti| Candidate {
                        vehicle: vi,
                        task: ti,
                        score: cost::score(
                            vehicle,
                            remaining_capacity[vi],
                            &tasks[ti],
                            DISPATCH_TIME,
                            &options.weights,
                        ),
                    })
                    .fold(None, |best, candidate| pick(best, candidate, vehicles, tasks, options.tie_break))
            })
            .collect();

        let best = per_vehicle
            .into_iter()
            .flatten()
            .fold(None, |best, candidate| pick(best, candidate, vehicles, tasks, options.tie_break));

        let Some(best) = best else {
            break;
        };

        let task = &tasks[best.task];
        remaining_capacity[best.vehicle] -= task.demand;
        assigned[best.vehicle].push(best.task);
        open.retain(|&ti| ti != best.task);

        debug!(
            vehicle = %vehicles[best.vehicle].id,
            task = %task.id,
            score = best.score,
            remaining_capacity = remaining_capacity[best.vehicle],
            "assigned task"
        );
    }

    let allocation = Allocation {
        assignments: vehicles
            .iter()
            .zip(assigned)
            .zip(remaining_capacity)
            .map(|((vehicle, task_indices), remaining)| Assignment {
                vehicle_id: vehicle.id.clone(),
                task_ids: task_indices.into_iter().map(|ti| tasks[ti].id.clone()).collect(),
                remaining_capacity: remaining,
            })
            .collect(),
    };

    info!(
        vehicles = vehicles.len(),
        tasks = tasks.len(),
        assigned = allocation.assigned_count(),
        unassigned = open.len(),
        "allocation finished"
    );

    allocation
}

/// Keep the better of the current best and a new candidate. Infeasible
/// candidates never win.
fn pick(
    best: Option<Candidate>,
    candidate: Candidate,
    vehicles: &[Vehicle],
    tasks: &[Task],
    tie_break: TieBreak,
) -> Option<Candidate> {
    if candidate.score.is_nan() || candidate.score <= INFEASIBLE {
        return best;
    }
    let Some(current) = best else {
        return Some(candidate);
    };

    if candidate.score > current.score {
        return Some(candidate);
    }
    if candidate.score == current.score && tie_break == TieBreak::ById {
        let key = |c: &Candidate| (vehicles[c.vehicle].id.as_str(), tasks[c.task].id.as_str());
        if key(&candidate) < key(&current) {
            return Some(candidate);
        }
    }
    Some(current)
}

/// Tasks that appear in no vehicle's assignment, in their original order.
pub fn unallocated<'a>(tasks: &'a [Task], allocation: &Allocation) -> Vec<&'a Task> {
    let assigned = allocation.assigned_ids();
    tasks
        .iter()
        .filter(|task| !assigned.contains(task.id.as_str()))
        .collect()
}
