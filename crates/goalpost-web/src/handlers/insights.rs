//! Business Insights — aggregate view over all tracked goals.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;

use crate::error::ApiError;
use crate::handlers::dashboard::{current_user, page_shell, user_picker, PageQuery};
use crate::state::SharedState;
use goalpost_db::{goal_insights, EmployeeRepository};

pub async fn insights_page(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, ApiError> {
    let employees = EmployeeRepository::new(state.db.clone()).list().await?;
    let user = current_user(&employees, query.user);
    let user_id = user.as_ref().map(|u| u.id);

    let insights = goal_insights(&state.db).await?;

    let breakdown_html = if insights.status_counts.is_empty() {
        r#"<p class="text-muted">No goal data to analyze.</p>"#.to_string()
    } else {
        let max = insights
            .status_counts
            .iter()
            .map(|c| c.count)
            .max()
            .unwrap_or(1)
            .max(1);
        insights
            .status_counts
            .iter()
            .map(|c| {
                let pct = (c.count * 100 / max).max(2);
                format!(
                    r#"<div class="bar-row">
    <span class="bar-label">{}</span>
    <div class="bar-track"><div class="bar-fill" style="width:{}%"></div></div>
    <span class="bar-value">{}</span>
</div>"#,
                    c.status, pct, c.count
                )
            })
            .collect()
    };

    let body = format!(
        r#"<div class="page-header">
    <h1 class="page-title">Business Insights</h1>
    {}
</div>
<section class="card">
    <h2>Goal Status Breakdown</h2>
    {}
</section>
<section class="card">
    <h2>Performance Metrics</h2>
    <div class="stats-grid">
        <div class="stat-card">
            <div class="stat-value">{:.2}</div>
            <div class="stat-label">Average Days to Complete Goal</div>
        </div>
        <div class="stat-card">
            <div class="stat-value">{}</div>
            <div class="stat-label">Total Goals Tracked</div>
        </div>
    </div>
</section>
<section class="card">
    <h2>Manager Workload</h2>
    <div class="stats-grid">
        <div class="stat-card">
            <div class="stat-value">{}</div>
            <div class="stat-label">Min Goals per Manager</div>
        </div>
        <div class="stat-card">
            <div class="stat-value">{}</div>
            <div class="stat-label">Max Goals per Manager</div>
        </div>
    </div>
</section>"#,
        user_picker(&employees, user.as_ref(), "/insights"),
        breakdown_html,
        insights.avg_days_to_complete,
        insights.total_goals,
        insights.min_goals_per_manager,
        insights.max_goals_per_manager
    );

    Ok(Html(page_shell("Business Insights", user_id, &body)))
}

/// GET /api/insights - the full aggregate set as JSON
pub async fn api_insights(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let insights = goal_insights(&state.db).await?;
    Ok(Json(insights))
}
