//! Feedback repository.
//!
//! Rows arrive two ways: a manager writes one explicitly, or the
//! completed-goal trigger inserts one during a status UPDATE. Reads don't
//! distinguish the two.

use crate::error::Result;
use crate::schema::FeedbackRow;
use sqlx::PgPool;

/// Repository for feedback operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Log written feedback from a manager against a goal.
    pub async fn insert(
        &self,
        goal_id: uuid::Uuid,
        employee_id: uuid::Uuid,
        manager_id: uuid::Uuid,
        comments: &str,
    ) -> Result<uuid::Uuid> {
        let id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO feedback (goal_id, employee_id, manager_id, comments)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(goal_id)
        .bind(employee_id)
        .bind(manager_id)
        .bind(comments)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(%id, %goal_id, "feedback logged");
        Ok(id)
    }

    /// All feedback for an employee, joined with goal description and
    /// manager name, newest first.
    pub async fn list_for_employee(&self, employee_id: uuid::Uuid) -> Result<Vec<FeedbackRow>> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            "SELECT g.description AS goal_description, f.comments, f.feedback_date,
                    m.name AS manager_name
             FROM feedback f
             JOIN goals g ON f.goal_id = g.id
             JOIN employees m ON f.manager_id = m.id
             WHERE f.employee_id = $1
             ORDER BY f.feedback_date DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Total feedback rows.
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Feedback rows attached to a single goal.
    pub async fn count_for_goal(&self, goal_id: uuid::Uuid) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM feedback WHERE goal_id = $1")
            .bind(goal_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
