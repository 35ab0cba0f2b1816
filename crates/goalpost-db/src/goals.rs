//! Goal repository.
//!
//! Goals are created by a manager for an employee. Status changes go through
//! [`GoalRepository::update_status`]; the Completed transition side effect
//! lives in the database trigger, not here.

use crate::error::{DbError, Result};
use crate::schema::{Goal, GoalRow, GoalStatus};
use sqlx::PgPool;

/// Outcome of a status update: the status the goal held before, and whose
/// goal it is. Captured in the same statement as the UPDATE so callers see
/// the transition the trigger saw, even under concurrent updates.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub previous: GoalStatus,
    pub employee_id: uuid::Uuid,
}

/// Repository for goal operations.
#[derive(Clone)]
pub struct GoalRepository {
    pool: PgPool,
}

impl GoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new goal in Draft status and return its ID.
    pub async fn insert(
        &self,
        employee_id: uuid::Uuid,
        manager_id: uuid::Uuid,
        description: &str,
        due_date: chrono::NaiveDate,
    ) -> Result<uuid::Uuid> {
        let id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO goals (employee_id, manager_id, description, due_date)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(employee_id)
        .bind(manager_id)
        .bind(description)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(%id, %employee_id, %manager_id, "goal created");
        Ok(id)
    }

    /// All goals for an employee, joined with the manager name, newest due
    /// date first.
    pub async fn list_for_employee(&self, employee_id: uuid::Uuid) -> Result<Vec<GoalRow>> {
        let rows = sqlx::query_as::<_, GoalRow>(
            "SELECT g.id, g.description, g.due_date, g.status, e.name AS manager_name
             FROM goals g
             JOIN employees e ON g.manager_id = e.id
             WHERE g.employee_id = $1
             ORDER BY g.due_date DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Find a goal by ID.
    pub async fn find_by_id(&self, id: uuid::Uuid) -> Result<Option<Goal>> {
        type Row = (
            uuid::Uuid,
            uuid::Uuid,
            uuid::Uuid,
            String,
            chrono::NaiveDate,
            String,
            chrono::DateTime<chrono::Utc>,
        );

        let row: Option<Row> = sqlx::query_as(
            "SELECT id, employee_id, manager_id, description, due_date, status, last_updated
             FROM goals
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((id, employee_id, manager_id, description, due_date, status, last_updated)) => {
                let status = status
                    .parse::<GoalStatus>()
                    .map_err(DbError::InvalidStatus)?;
                Ok(Some(Goal {
                    id,
                    employee_id,
                    manager_id,
                    description,
                    due_date,
                    status,
                    last_updated,
                }))
            }
            None => Ok(None),
        }
    }

    /// Update a goal's status and bump its last-updated timestamp, returning
    /// the status it held before.
    ///
    /// The automated-feedback trigger fires inside this UPDATE when the
    /// status transitions into Completed. The previous status is read under
    /// the same row lock, not in a separate query.
    pub async fn update_status(
        &self,
        goal_id: uuid::Uuid,
        status: GoalStatus,
    ) -> Result<StatusChange> {
        let row: Option<(String, uuid::Uuid)> = sqlx::query_as(
            "UPDATE goals g
             SET status = $1, last_updated = NOW()
             FROM (SELECT id, status AS prev_status FROM goals WHERE id = $2 FOR UPDATE) p
             WHERE g.id = p.id
             RETURNING p.prev_status, g.employee_id",
        )
        .bind(status.to_string())
        .bind(goal_id)
        .fetch_optional(&self.pool)
        .await?;

        let (previous, employee_id) =
            row.ok_or_else(|| DbError::NotFound(format!("goal {}", goal_id)))?;
        let previous = previous
            .parse::<GoalStatus>()
            .map_err(DbError::InvalidStatus)?;

        tracing::debug!(%goal_id, %status, %previous, "goal status updated");
        Ok(StatusChange { previous, employee_id })
    }

    /// Delete a goal (and, via cascade, its feedback rows).
    pub async fn delete(&self, goal_id: uuid::Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(goal_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("goal {}", goal_id)));
        }

        tracing::debug!(%goal_id, "goal deleted");
        Ok(())
    }

    /// Total goals.
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM goals")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
