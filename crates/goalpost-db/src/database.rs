//! Database connection and schema management.
//!
//! Wraps the sqlx connection pool and owns the idempotent schema setup:
//! three tables plus the automated-feedback trigger.

use crate::error::Result;
use goalpost_common::AppConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const CREATE_EMPLOYEES: &str = r#"
    CREATE TABLE IF NOT EXISTS employees (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) UNIQUE NOT NULL,
        is_manager BOOLEAN NOT NULL DEFAULT FALSE
    );
"#;

const CREATE_GOALS: &str = r#"
    CREATE TABLE IF NOT EXISTS goals (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        employee_id UUID NOT NULL REFERENCES employees(id),
        manager_id UUID NOT NULL REFERENCES employees(id),
        description TEXT NOT NULL,
        due_date DATE NOT NULL,
        status VARCHAR(50) NOT NULL DEFAULT 'Draft'
            CHECK (status IN ('Draft', 'In Progress', 'Completed', 'Cancelled')),
        last_updated TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );
"#;

const CREATE_FEEDBACK: &str = r#"
    CREATE TABLE IF NOT EXISTS feedback (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        goal_id UUID NOT NULL REFERENCES goals(id) ON DELETE CASCADE,
        employee_id UUID NOT NULL REFERENCES employees(id),
        manager_id UUID NOT NULL REFERENCES employees(id),
        comments TEXT NOT NULL,
        feedback_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );
"#;

/// Fires once per transition into 'Completed'. Re-saving an already
/// Completed goal does not insert; leaving and re-entering Completed does.
const CREATE_TRIGGER_FN: &str = r#"
    CREATE OR REPLACE FUNCTION completed_goal_feedback()
    RETURNS TRIGGER AS $$
    DECLARE
        employee_name VARCHAR(255);
    BEGIN
        IF NEW.status = 'Completed' AND OLD.status <> 'Completed' THEN
            SELECT name INTO employee_name FROM employees WHERE id = NEW.employee_id;
            INSERT INTO feedback (goal_id, employee_id, manager_id, comments)
            VALUES (
                NEW.id,
                NEW.employee_id,
                NEW.manager_id,
                'Goal "' || NEW.description || '" was successfully completed by '
                    || employee_name || '. Great work!'
            );
        END IF;
        RETURN NEW;
    END;
    $$ LANGUAGE plpgsql;
"#;

const CREATE_TRIGGER: &str = r#"
    DO $$
    BEGIN
        IF NOT EXISTS (SELECT 1 FROM pg_trigger WHERE tgname = 'completed_goal_feedback_trigger') THEN
            CREATE TRIGGER completed_goal_feedback_trigger
            AFTER UPDATE ON goals
            FOR EACH ROW
            EXECUTE FUNCTION completed_goal_feedback();
        END IF;
    END
    $$;
"#;

/// Main database handle.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

/// Row counts across the three tables.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DatabaseStats {
    pub employees: i64,
    pub goals: i64,
    pub feedback: i64,
}

impl Database {
    /// Connect to PostgreSQL using the configured URL and pool size.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create tables and the automated-feedback trigger if they don't exist.
    ///
    /// Safe to run on every startup; all statements are idempotent.
    pub async fn initialize(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_EMPLOYEES).execute(&self.pool).await?;
        sqlx::raw_sql(CREATE_GOALS).execute(&self.pool).await?;
        sqlx::raw_sql(CREATE_FEEDBACK).execute(&self.pool).await?;
        sqlx::raw_sql(CREATE_TRIGGER_FN).execute(&self.pool).await?;
        sqlx::raw_sql(CREATE_TRIGGER).execute(&self.pool).await?;

        tracing::info!("database schema initialized");
        Ok(())
    }

    /// Row counts for the dashboard and startup log line.
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        let goals: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM goals")
            .fetch_one(&self.pool)
            .await?;
        let feedback: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await?;

        Ok(DatabaseStats { employees, goals, feedback })
    }
}
