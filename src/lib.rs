//! fleet-allocator core
//!
//! Greedy task allocation for a vehicle fleet, plus the derived views a
//! monitoring dashboard needs (route lengths, load alerts, task urgency).

pub mod traits;
pub mod geometry;
pub mod model;
pub mod cost;
pub mod normalize;
pub mod allocator;
pub mod routes;
pub mod alerts;
pub mod report;
pub mod scenario;
pub mod store;
pub mod comm_log;
