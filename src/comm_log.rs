//! Communication-log parsing.
//!
//! The vehicles' mesh network emits a stream of loosely typed events. Only
//! three kinds matter for display: task announcements, winner decisions and
//! periodic vehicle status. Everything else is ignored.

use serde::Serialize;
use serde_json::Value;

const MESH_MESSAGE: &str = "mesh_message";
const VEHICLE_STATUS: &str = "vehicle_status";
const FORWARD_ANNOUNCEMENT: &str = "FORWARD_ANNOUNCEMENT";
const WINNER_DECISION: &str = "WINNER_DECISION";

static NULL: Value = Value::Null;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Announcement {
    pub time: Option<f64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub task_id: Option<String>,
    pub pickup_edge: Option<String>,
    pub delivery_edge: Option<String>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinnerDecision {
    pub time: Option<f64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub task_id: Option<String>,
    pub winner: Option<String>,
    pub best_bid: Option<f64>,
    pub best_holder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleStatus {
    pub time: Option<f64>,
    pub vehicle: Option<String>,
    pub battery: Option<f64>,
    pub current_edge: Option<String>,
    pub next_edge: Option<String>,
    pub current_task: Option<String>,
    /// Assigned task ids joined with ", ".
    pub assigned_tasks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommunicationLog {
    pub announcements: Vec<Announcement>,
    pub winners: Vec<WinnerDecision>,
    pub vehicle_status: Vec<VehicleStatus>,
}

pub fn parse_communication_events(events: &[Value]) -> CommunicationLog {
    let mut log = CommunicationLog::default();

    for event in events {
        match text(event, "type").as_deref() {
            Some(MESH_MESSAGE) => {
                let message = event.get("message").unwrap_or(&NULL);
                match text(message, "message_type").as_deref() {
                    Some(FORWARD_ANNOUNCEMENT) => log.announcements.push(Announcement {
                        time: number(event, "sim_time"),
                        from: text(event, "from"),
                        to: text(event, "to"),
                        task_id: text(message, "task_id"),
                        pickup_edge: text(message, "pickup"),
                        delivery_edge: text(message, "delivery"),
                        weight: number(message, "weight"),
                    }),
                    Some(WINNER_DECISION) => {
                        let best = message.get("best").unwrap_or(&NULL);
                        log.winners.push(WinnerDecision {
                            time: number(event, "sim_time"),
                            from: text(event, "from"),
                            to: text(event, "to"),
                            task_id: text(message, "task_id"),
                            winner: text(message, "winner"),
                            best_bid: number(best, "bid"),
                            best_holder: text(best, "holder"),
                        });
                    }
                    _ => {}
                }
            }
            Some(VEHICLE_STATUS) => log.vehicle_status.push(VehicleStatus {
                time: number(event, "sim_time"),
                vehicle: text(event, "agent"),
                battery: number(event, "battery"),
                current_edge: text(event, "current_edge"),
                next_edge: text(event, "next_edge"),
                current_task: text(event, "current_task"),
                assigned_tasks: event
                    .get("assigned_tasks")
                    .and_then(Value::as_array)
                    .map(|ids| {
                        ids.iter()
                            .filter_map(scalar_text)
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default(),
            }),
            _ => {}
        }
    }

    log
}

fn number(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_text)
}

/// Strings as-is, numbers rendered; anything else is absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_announcement() {
        let log = parse_communication_events(&[json!({
            "type": "mesh_message",
            "sim_time": 12.5,
            "from": "V1",
            "to": "V2",
            "message": {
                "message_type": "FORWARD_ANNOUNCEMENT",
                "task_id": "T1",
                "pickup": "e1",
                "delivery": "e9",
                "weight": 3
            }
        })]);
        assert_eq!(log.announcements.len(), 1);
        let a = &log.announcements[0];
        assert_eq!(a.time, Some(12.5));
        assert_eq!(a.pickup_edge.as_deref(), Some("e1"));
        assert_eq!(a.delivery_edge.as_deref(), Some("e9"));
        assert_eq!(a.weight, Some(3.0));
    }

    #[test]
    fn test_winner_with_null_best() {
        let log = parse_communication_events(&[json!({
            "type": "mesh_message",
            "message": {"message_type": "WINNER_DECISION", "task_id": "T1", "winner": "V3", "best": null}
        })]);
        let w = &log.winners[0];
        assert_eq!(w.winner.as_deref(), Some("V3"));
        assert_eq!(w.best_bid, None);
        assert_eq!(w.best_holder, None);
    }

    #[test]
    fn test_vehicle_status_joins_tasks() {
        let log = parse_communication_events(&[json!({
            "type": "vehicle_status",
            "agent": "V1",
            "battery": 88.0,
            "current_task": null,
            "assigned_tasks": ["T1", "T4"]
        })]);
        let s = &log.vehicle_status[0];
        assert_eq!(s.vehicle.as_deref(), Some("V1"));
        assert_eq!(s.current_task, None);
        assert_eq!(s.assigned_tasks, "T1, T4");
    }

    #[test]
    fn test_unknown_events_ignored() {
        let log = parse_communication_events(&[
            json!({"type": "heartbeat"}),
            json!({"type": "mesh_message", "message": {"message_type": "PING"}}),
            json!("garbage"),
        ]);
        assert_eq!(log, CommunicationLog::default());
    }
}
