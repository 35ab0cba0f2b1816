//! Shared application state for the web server.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Events pushed to connected clients via SSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// An employee was onboarded
    EmployeeAdded { employee_id: String, name: String, is_manager: bool },
    /// A manager set a new goal
    GoalCreated { goal_id: String, employee_id: String, description: String },
    /// A goal's status changed
    GoalStatusChanged { goal_id: String, status: String },
    /// A goal was deleted
    GoalDeleted { goal_id: String },
    /// Feedback was logged (by a manager or by the completion trigger)
    FeedbackLogged { goal_id: String, employee_id: String },
}

impl AppEvent {
    /// SSE event name, matching the serde tag, so browser clients can use
    /// addEventListener per mutation kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::EmployeeAdded { .. } => "employee_added",
            AppEvent::GoalCreated { .. } => "goal_created",
            AppEvent::GoalStatusChanged { .. } => "goal_status_changed",
            AppEvent::GoalDeleted { .. } => "goal_deleted",
            AppEvent::FeedbackLogged { .. } => "feedback_logged",
        }
    }
}

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AppEvent>,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self { db, event_tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    /// Fire-and-forget event publish; nobody listening is fine.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_matches_serde_tag() {
        let event = AppEvent::GoalStatusChanged {
            goal_id: "g".into(),
            status: "Completed".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.kind());
    }

    #[test]
    fn test_event_kind_covers_all_variants() {
        let events = [
            AppEvent::EmployeeAdded {
                employee_id: "e".into(),
                name: "n".into(),
                is_manager: false,
            },
            AppEvent::GoalCreated {
                goal_id: "g".into(),
                employee_id: "e".into(),
                description: "d".into(),
            },
            AppEvent::GoalDeleted { goal_id: "g".into() },
            AppEvent::FeedbackLogged { goal_id: "g".into(), employee_id: "e".into() },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.kind());
        }
    }
}
