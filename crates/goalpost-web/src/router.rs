//! Axum router — maps all URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::handlers::{
    dashboard::{api_stats, dashboard},
    feedback::{api_feedback, create_feedback, feedback_page},
    goals::{api_goals, create_goal, delete_goal, goals_page, update_goal_status},
    insights::{api_insights, insights_page},
    team::{api_employees, create_employee, team_page},
};
use crate::sse::sse_handler;
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",             get(dashboard))
        .route("/goals",        get(goals_page).post(create_goal))
        .route("/goals/status", post(update_goal_status))
        .route("/goals/delete", post(delete_goal))
        .route("/feedback",     get(feedback_page).post(create_feedback))
        .route("/insights",     get(insights_page))
        .route("/team",         get(team_page).post(create_employee))

        // SSE streaming
        .route("/api/events", get(sse_handler))

        // API endpoints
        .route("/api/employees",               get(api_employees))
        .route("/api/goals/{employee_id}",     get(api_goals))
        .route("/api/feedback/{employee_id}",  get(api_feedback))
        .route("/api/insights",                get(api_insights))
        .route("/api/stats",                   get(api_stats))

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
