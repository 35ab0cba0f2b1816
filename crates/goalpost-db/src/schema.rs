//! Schema definitions for the performance tracker tables.
//!
//! Three related tables: employees, goals, feedback. Goals carry a status
//! that drives the automated-feedback trigger installed by
//! [`crate::database::Database::initialize`].

// =============================================================================
// Employee
// =============================================================================

/// Employee record. Immutable after onboarding.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub is_manager: bool,
}

impl Employee {
    pub fn new(name: String, email: String, is_manager: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name,
            email,
            is_manager,
        }
    }
}

// =============================================================================
// Goal
// =============================================================================

/// Lifecycle of a goal. Stored as the display string in the status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GoalStatus {
    Draft,
    InProgress,
    Completed,
    Cancelled,
}

impl GoalStatus {
    /// All statuses, in the order the UI presents them.
    pub const ALL: [GoalStatus; 4] = [
        GoalStatus::Draft,
        GoalStatus::InProgress,
        GoalStatus::Completed,
        GoalStatus::Cancelled,
    ];
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatus::Draft => write!(f, "Draft"),
            GoalStatus::InProgress => write!(f, "In Progress"),
            GoalStatus::Completed => write!(f, "Completed"),
            GoalStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(GoalStatus::Draft),
            "In Progress" => Ok(GoalStatus::InProgress),
            "Completed" => Ok(GoalStatus::Completed),
            "Cancelled" => Ok(GoalStatus::Cancelled),
            _ => Err(format!("Unknown goal status: {}", s)),
        }
    }
}

/// Goal record.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Goal {
    pub id: uuid::Uuid,
    pub employee_id: uuid::Uuid,
    pub manager_id: uuid::Uuid,
    pub description: String,
    pub due_date: chrono::NaiveDate,
    pub status: GoalStatus,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl Goal {
    pub fn new(
        employee_id: uuid::Uuid,
        manager_id: uuid::Uuid,
        description: String,
        due_date: chrono::NaiveDate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            employee_id,
            manager_id,
            description,
            due_date,
            status: GoalStatus::Draft,
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Goal joined with its manager's name, for listing pages.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct GoalRow {
    pub id: uuid::Uuid,
    pub description: String,
    pub due_date: chrono::NaiveDate,
    pub status: String,
    pub manager_name: String,
}

// =============================================================================
// Feedback
// =============================================================================

/// Feedback joined with goal description and manager name. Rows come from a
/// manager writing feedback or from the completed-goal trigger; reads don't
/// distinguish the two.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct FeedbackRow {
    pub goal_description: String,
    pub comments: String,
    pub feedback_date: chrono::DateTime<chrono::Utc>,
    pub manager_name: String,
}

/// The comment string the completed-goal trigger generates.
///
/// Kept in sync with the plpgsql body in `database.rs` so tests can assert
/// against the exact text.
pub fn auto_feedback_comment(description: &str, employee_name: &str) -> String {
    format!(
        "Goal \"{}\" was successfully completed by {}. Great work!",
        description, employee_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_roundtrip() {
        for status in GoalStatus::ALL {
            let parsed = GoalStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_display_strings() {
        // The DB stores display strings; "In Progress" has the space.
        assert_eq!(GoalStatus::InProgress.to_string(), "In Progress");
        assert!(GoalStatus::from_str("in progress").is_err());
        assert!(GoalStatus::from_str("Done").is_err());
    }

    #[test]
    fn test_new_goal_defaults_to_draft() {
        let goal = Goal::new(
            uuid::Uuid::new_v4(),
            uuid::Uuid::new_v4(),
            "Ship the Q3 report".to_string(),
            chrono::NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
        );
        assert_eq!(goal.status, GoalStatus::Draft);
    }

    #[test]
    fn test_auto_feedback_comment() {
        let comment = auto_feedback_comment("Ship the Q3 report", "Ada Lovelace");
        assert_eq!(
            comment,
            "Goal \"Ship the Q3 report\" was successfully completed by Ada Lovelace. Great work!"
        );
    }
}
