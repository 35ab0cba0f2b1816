//! goalpost-web — Web GUI for the performance tracker
//! Provides:
//!   - Dashboard with the selected user's goals and feedback
//!   - Goal management (set, update status, delete)
//!   - Feedback & performance history
//!   - Business insights over all tracked goals
//!   - Team roster and onboarding

pub mod error;
pub mod handlers;
pub mod router;
pub mod sse;
pub mod state;
