//! The demo fleet seeded for a fresh account: two delivery vehicles, one
//! reconnaissance vehicle and eight tasks, all with a wide time window.

use serde_json::{json, Value};

pub fn sample_vehicles() -> Vec<Value> {
    vec![
        json!({
            "id": "V1", "capacity": 200, "energy_capacity": 500,
            "location": [10.0, 20.0], "speed": 5.0,
            "vehicle_type": "delivery", "capabilities": ["delivery"]
        }),
        json!({
            "id": "V2", "capacity": 180, "energy_capacity": 400,
            "location": [15.0, 25.0], "speed": 6.0,
            "vehicle_type": "delivery", "capabilities": ["delivery"]
        }),
        json!({
            "id": "V3", "capacity": 150, "energy_capacity": 300,
            "location": [12.0, 18.0], "speed": 7.0,
            "vehicle_type": "reconnaissance", "capabilities": ["reconnaissance"]
        }),
    ]
}

pub fn sample_tasks() -> Vec<Value> {
    let rows = [
        ("T1", [11.0, 21.0], 25, 3, "delivery"),
        ("T2", [16.0, 26.0], 30, 4, "delivery"),
        ("T3", [13.0, 19.0], 20, 2, "reconnaissance"),
        ("T4", [14.0, 22.0], 35, 5, "delivery"),
        ("T5", [17.0, 23.0], 20, 3, "delivery"),
        ("T6", [9.0, 17.0], 25, 4, "delivery"),
        ("T7", [18.0, 27.0], 15, 2, "reconnaissance"),
        ("T8", [12.0, 24.0], 30, 5, "delivery"),
    ];
    rows.iter()
        .map(|(id, location, demand, priority, task_type)| {
            json!({
                "id": id,
                "location": location,
                "demand": demand,
                "time_window": [0, 1000],
                "priority": priority,
                "task_type": task_type,
            })
        })
        .collect()
}

pub fn sample_comm_events() -> Vec<Value> {
    vec![
        json!({
            "type": "vehicle_status", "sim_time": 0.5, "agent": "V1", "battery": 95,
            "current_edge": "depot", "next_edge": "T1", "current_task": "T1",
            "assigned_tasks": ["T1", "T2"]
        }),
        json!({
            "type": "mesh_message", "sim_time": 1.2, "from": "V1", "to": "V2",
            "direction": "outgoing",
            "message": {
                "message_type": "FORWARD_ANNOUNCEMENT", "task_id": "T4",
                "pickup": "depot", "delivery": "T4", "weight": 35, "path": ["depot", "T4"]
            }
        }),
        json!({
            "type": "mesh_message", "sim_time": 2.4, "from": "V2", "to": "V1",
            "message": {
                "message_type": "WINNER_DECISION", "task_id": "T4", "winner": "V2",
                "best": {"bid": 41.5, "holder": "V2"}
            }
        }),
    ]
}
