//! HTTP handlers for all web routes.

pub mod dashboard;
pub mod feedback;
pub mod goals;
pub mod insights;
pub mod team;
