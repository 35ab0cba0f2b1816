//! goalpost-common — Shared error type and configuration used across all goalpost crates.

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{GoalpostError, Result};
