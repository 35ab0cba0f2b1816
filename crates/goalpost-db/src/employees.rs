//! Employee repository.
//!
//! Employees are created at onboarding and never mutated afterwards, so the
//! surface here is insert + reads.

use crate::error::{is_unique_violation, DbError, Result};
use crate::schema::Employee;
use sqlx::PgPool;

/// Repository for employee operations.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a new employee or manager. A duplicate email is rejected and
    /// leaves the table unchanged.
    pub async fn insert(&self, name: &str, email: &str, is_manager: bool) -> Result<uuid::Uuid> {
        let id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO employees (name, email, is_manager)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(is_manager)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::DuplicateEmail(email.to_string())
            } else {
                DbError::Sqlx(e)
            }
        })?;

        tracing::debug!(%id, email, is_manager, "employee created");
        Ok(id)
    }

    /// All employees, ordered by name.
    pub async fn list(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, is_manager FROM employees ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Employees who are not managers, ordered by name. Used for the
    /// goal-assignment and feedback target dropdowns.
    pub async fn list_non_managers(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, is_manager
             FROM employees
             WHERE is_manager = FALSE
             ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Find an employee by ID.
    pub async fn find_by_id(&self, id: uuid::Uuid) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, is_manager FROM employees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Total employees.
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
