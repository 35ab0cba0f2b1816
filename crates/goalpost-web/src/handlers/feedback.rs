//! Feedback & History — managers write feedback; everyone reads their own.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect};
use axum::{Form, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::dashboard::{
    banner, current_user, html_escape, page_shell, status_badge, user_picker, PageQuery,
};
use crate::state::{AppEvent, SharedState};
use goalpost_db::{EmployeeRepository, FeedbackRepository, GoalRepository};

#[derive(Debug, Deserialize)]
pub struct CreateFeedbackForm {
    pub user: uuid::Uuid,
    pub goal_id: uuid::Uuid,
    pub comments: String,
}

pub async fn feedback_page(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, ApiError> {
    let employee_repo = EmployeeRepository::new(state.db.clone());
    let goal_repo = GoalRepository::new(state.db.clone());
    let feedback_repo = FeedbackRepository::new(state.db.clone());

    let employees = employee_repo.list().await?;
    let user = current_user(&employees, query.user);
    let is_manager = user.as_ref().map(|u| u.is_manager).unwrap_or(false);
    let user_id = user.as_ref().map(|u| u.id);

    // Manager-only feedback form. The goal dropdown covers every
    // non-manager's goals; the employee is derived from the goal on submit.
    let feedback_form = if is_manager {
        let mut goal_options = String::new();
        for employee in employee_repo.list_non_managers().await? {
            for goal in goal_repo.list_for_employee(employee.id).await? {
                goal_options.push_str(&format!(
                    r#"<option value="{}">{} — {}</option>"#,
                    goal.id,
                    html_escape(&employee.name),
                    html_escape(&goal.description)
                ));
            }
        }

        if goal_options.is_empty() {
            r#"<p class="text-muted">No goals found. Please set a goal first.</p>"#.to_string()
        } else {
            format!(
                r#"<form method="post" action="/feedback" class="stacked-form">
    <input type="hidden" name="user" value="{}">
    <label>Select Associated Goal <select name="goal_id">{}</select></label>
    <label>Your Feedback <textarea name="comments" rows="4"></textarea></label>
    <button type="submit" class="btn btn-primary">Submit Feedback</button>
</form>"#,
                user.as_ref().map(|u| u.id.to_string()).unwrap_or_default(),
                goal_options
            )
        }
    } else {
        r#"<p class="text-muted">Only managers can provide written feedback.</p>"#.to_string()
    };

    // Performance history for the selected user.
    let history_rows = match user_id {
        Some(id) => goal_repo.list_for_employee(id).await?,
        None => Vec::new(),
    };
    let history_html = if history_rows.is_empty() {
        r#"<tr><td colspan="4" class="text-center text-muted">No goals in your history.</td></tr>"#
            .to_string()
    } else {
        history_rows
            .iter()
            .map(|g| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td><span class="{}">{}</span></td><td>{}</td></tr>"#,
                    html_escape(&g.description),
                    g.due_date,
                    status_badge(&g.status),
                    g.status,
                    html_escape(&g.manager_name)
                )
            })
            .collect()
    };

    let feedback_rows = match user_id {
        Some(id) => feedback_repo.list_for_employee(id).await?,
        None => Vec::new(),
    };
    let feedback_html = if feedback_rows.is_empty() {
        r#"<tr><td colspan="4" class="text-center text-muted">No feedback yet.</td></tr>"#
            .to_string()
    } else {
        feedback_rows
            .iter()
            .map(|f| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                    html_escape(&f.goal_description),
                    html_escape(&f.comments),
                    f.feedback_date.format("%Y-%m-%d %H:%M"),
                    html_escape(&f.manager_name)
                )
            })
            .collect()
    };

    let body = format!(
        r#"<div class="page-header">
    <h1 class="page-title">Feedback &amp; History</h1>
    {}
</div>
{}
<section class="card">
    <h2>Provide Written Feedback</h2>
    {}
</section>
<section class="card">
    <h2>Performance History</h2>
    <table class="data-table">
        <thead><tr><th>Description</th><th>Due Date</th><th>Status</th><th>Manager</th></tr></thead>
        <tbody>{}</tbody>
    </table>
</section>
<section class="card">
    <h2>Feedback Received</h2>
    <table class="data-table">
        <thead><tr><th>Goal</th><th>Comments</th><th>Date</th><th>Manager</th></tr></thead>
        <tbody>{}</tbody>
    </table>
</section>"#,
        user_picker(&employees, user.as_ref(), "/feedback"),
        banner(&query),
        feedback_form,
        history_html,
        feedback_html
    );

    Ok(Html(page_shell("Feedback & History", user_id, &body)))
}

pub async fn create_feedback(
    State(state): State<SharedState>,
    Form(form): Form<CreateFeedbackForm>,
) -> Result<Redirect, ApiError> {
    if form.comments.trim().is_empty() {
        return Ok(Redirect::to(&format!(
            "/feedback?user={}&error=empty-comments",
            form.user
        )));
    }

    let goal = GoalRepository::new(state.db.clone())
        .find_by_id(form.goal_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("goal {}", form.goal_id)))?;

    FeedbackRepository::new(state.db.clone())
        .insert(goal.id, goal.employee_id, form.user, form.comments.trim())
        .await?;

    state.publish(AppEvent::FeedbackLogged {
        goal_id: goal.id.to_string(),
        employee_id: goal.employee_id.to_string(),
    });

    Ok(Redirect::to(&format!("/feedback?user={}&notice=feedback-logged", form.user)))
}

/// GET /api/feedback/{employee_id} - feedback rows for one employee
pub async fn api_feedback(
    State(state): State<SharedState>,
    Path(employee_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = FeedbackRepository::new(state.db.clone())
        .list_for_employee(employee_id)
        .await?;
    Ok(Json(rows))
}
