//! Test fixtures for fleet-allocator.
//!
//! Provides:
//! - Builders for vehicles and tasks with sensible defaults
//! - The demo fleet the dashboard seeds for new users

#![allow(dead_code)]

pub mod sample_fleet;

pub use sample_fleet::*;

use fleet_allocator::model::{Task, Vehicle, VehicleType};

/// Builder for test vehicles. Defaults: delivery, capacity 50, at the origin.
#[derive(Clone, Debug)]
pub struct TestVehicle(Vehicle);

impl TestVehicle {
    pub fn new(id: &str) -> Self {
        let mut vehicle = Vehicle::new(id);
        vehicle.capacity = 50.0;
        Self(vehicle)
    }

    pub fn capacity(mut self, capacity: f64) -> Self {
        self.0.capacity = capacity;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.0.location = (x, y);
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.0.speed = speed;
        self
    }

    pub fn kind(mut self, vehicle_type: VehicleType) -> Self {
        self.0.vehicle_type = vehicle_type;
        self.0.capabilities = vec![vehicle_type.as_str().to_string()];
        self
    }

    pub fn capabilities(mut self, caps: &[&str]) -> Self {
        self.0.capabilities = caps.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn build(self) -> Vehicle {
        self.0
    }
}

/// Builder for test tasks. Defaults: delivery, demand 10, priority 1,
/// window [0, 100], at the origin.
#[derive(Clone, Debug)]
pub struct TestTask(Task);

impl TestTask {
    pub fn new(id: &str) -> Self {
        let mut task = Task::new(id);
        task.demand = 10.0;
        task.time_window = (0.0, 100.0);
        Self(task)
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.0.location = (x, y);
        self
    }

    pub fn demand(mut self, demand: f64) -> Self {
        self.0.demand = demand;
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.0.priority = priority;
        self
    }

    pub fn window(mut self, start: f64, end: f64) -> Self {
        self.0.time_window = (start, end);
        self
    }

    pub fn kind(mut self, task_type: &str) -> Self {
        self.0.task_type = task_type.to_string();
        self
    }

    pub fn build(self) -> Task {
        self.0
    }
}

pub fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id.clone()).collect()
}
