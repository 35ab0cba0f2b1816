//! Goalpost Database Layer
//!
//! PostgreSQL access for the performance tracker: connection pooling, schema
//! setup (including the automated-feedback trigger), per-entity repositories,
//! and the aggregate insight queries.
//!
//! # Example
//!
//! ```rust,no_run
//! use goalpost_common::AppConfig;
//! use goalpost_db::{Database, EmployeeRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let db = Database::connect(&config).await?;
//!     db.initialize().await?;
//!
//!     let employees = EmployeeRepository::new(db.pool().clone());
//!     let roster = employees.list().await?;
//!     println!("{} employees on the books", roster.len());
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod employees;
pub mod error;
pub mod feedback;
pub mod goals;
pub mod insights;
pub mod schema;

pub use database::{Database, DatabaseStats};
pub use employees::EmployeeRepository;
pub use error::{DbError, Result};
pub use feedback::FeedbackRepository;
pub use goals::{GoalRepository, StatusChange};
pub use insights::{goal_insights, GoalInsights, StatusCount};
pub use schema::{auto_feedback_comment, Employee, FeedbackRow, Goal, GoalRow, GoalStatus};
