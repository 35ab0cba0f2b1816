//! Goal management — managers set goals, anyone involved updates status.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect};
use axum::{Form, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::dashboard::{
    banner, current_user, html_escape, page_shell, status_badge, user_picker, PageQuery,
};
use crate::state::{AppEvent, SharedState};
use goalpost_db::{EmployeeRepository, GoalRepository, GoalStatus};

#[derive(Debug, Deserialize)]
pub struct CreateGoalForm {
    pub user: uuid::Uuid,
    pub employee_id: uuid::Uuid,
    pub description: String,
    pub due_date: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    pub user: uuid::Uuid,
    pub goal_id: uuid::Uuid,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteGoalForm {
    pub user: uuid::Uuid,
    pub goal_id: uuid::Uuid,
}

pub async fn goals_page(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, ApiError> {
    let employee_repo = EmployeeRepository::new(state.db.clone());
    let goal_repo = GoalRepository::new(state.db.clone());

    let employees = employee_repo.list().await?;
    let user = current_user(&employees, query.user);
    let is_manager = user.as_ref().map(|u| u.is_manager).unwrap_or(false);
    let user_id = user.as_ref().map(|u| u.id);

    // Manager-only form for setting a new goal.
    let set_goal_form = if is_manager {
        let non_managers = employee_repo.list_non_managers().await?;
        if non_managers.is_empty() {
            r#"<p class="text-muted">No employees found. Please add employees first.</p>"#
                .to_string()
        } else {
            let options: String = non_managers
                .iter()
                .map(|e| format!(r#"<option value="{}">{}</option>"#, e.id, html_escape(&e.name)))
                .collect();
            format!(
                r#"<form method="post" action="/goals" class="stacked-form">
    <input type="hidden" name="user" value="{}">
    <label>Select Employee <select name="employee_id">{}</select></label>
    <label>Goal Description <textarea name="description" rows="3"></textarea></label>
    <label>Due Date <input type="date" name="due_date" required></label>
    <button type="submit" class="btn btn-primary">Set Goal</button>
</form>"#,
                user.as_ref().map(|u| u.id.to_string()).unwrap_or_default(),
                options
            )
        }
    } else {
        r#"<p class="text-muted">Only managers can set new goals.</p>"#.to_string()
    };

    // Status update + delete controls for the selected user's goals.
    let goal_rows = match user_id {
        Some(id) => goal_repo.list_for_employee(id).await?,
        None => Vec::new(),
    };

    let status_options = |current: &str| -> String {
        GoalStatus::ALL
            .iter()
            .map(|s| {
                let label = s.to_string();
                let selected = if label == current { " selected" } else { "" };
                format!(r#"<option value="{}"{}>{}</option>"#, label, selected, label)
            })
            .collect()
    };

    let goals_html = if goal_rows.is_empty() {
        r#"<tr><td colspan="5" class="text-center text-muted">No goals to update.</td></tr>"#
            .to_string()
    } else {
        goal_rows
            .iter()
            .map(|g| {
                let user_value = user_id.map(|u| u.to_string()).unwrap_or_default();
                format!(
                    r#"<tr>
    <td>{}</td>
    <td>{}</td>
    <td><span class="{}">{}</span></td>
    <td>
        <form method="post" action="/goals/status" class="inline-form">
            <input type="hidden" name="user" value="{}">
            <input type="hidden" name="goal_id" value="{}">
            <select name="status">{}</select>
            <button type="submit" class="btn btn-sm">Update</button>
        </form>
    </td>
    <td>
        <form method="post" action="/goals/delete" class="inline-form">
            <input type="hidden" name="user" value="{}">
            <input type="hidden" name="goal_id" value="{}">
            <button type="submit" class="btn btn-sm btn-danger">Delete</button>
        </form>
    </td>
</tr>"#,
                    html_escape(&g.description),
                    g.due_date,
                    status_badge(&g.status),
                    g.status,
                    user_value,
                    g.id,
                    status_options(&g.status),
                    user_value,
                    g.id
                )
            })
            .collect()
    };

    let body = format!(
        r#"<div class="page-header">
    <h1 class="page-title">Goal Management</h1>
    {}
</div>
{}
<section class="card">
    <h2>Set a New Goal</h2>
    {}
</section>
<section class="card">
    <h2>Update Goal Status</h2>
    <table class="data-table">
        <thead><tr><th>Description</th><th>Due Date</th><th>Status</th><th>Change</th><th></th></tr></thead>
        <tbody>{}</tbody>
    </table>
</section>"#,
        user_picker(&employees, user.as_ref(), "/goals"),
        banner(&query),
        set_goal_form,
        goals_html
    );

    Ok(Html(page_shell("Goal Management", user_id, &body)))
}

pub async fn create_goal(
    State(state): State<SharedState>,
    Form(form): Form<CreateGoalForm>,
) -> Result<Redirect, ApiError> {
    if form.description.trim().is_empty() {
        return Ok(Redirect::to(&format!(
            "/goals?user={}&error=empty-description",
            form.user
        )));
    }

    let due_date = chrono::NaiveDate::parse_from_str(&form.due_date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("invalid due date: {}", form.due_date)))?;

    let goal_id = GoalRepository::new(state.db.clone())
        .insert(form.employee_id, form.user, form.description.trim(), due_date)
        .await?;

    state.publish(AppEvent::GoalCreated {
        goal_id: goal_id.to_string(),
        employee_id: form.employee_id.to_string(),
        description: form.description.trim().to_string(),
    });

    Ok(Redirect::to(&format!("/goals?user={}&notice=goal-created", form.user)))
}

pub async fn update_goal_status(
    State(state): State<SharedState>,
    Form(form): Form<UpdateStatusForm>,
) -> Result<Redirect, ApiError> {
    let status = form
        .status
        .parse::<GoalStatus>()
        .map_err(ApiError::BadRequest)?;

    // The change reports the pre-update status from the same statement, so
    // the events below describe the transition the trigger actually saw.
    let change = GoalRepository::new(state.db.clone())
        .update_status(form.goal_id, status)
        .await?;

    state.publish(AppEvent::GoalStatusChanged {
        goal_id: form.goal_id.to_string(),
        status: status.to_string(),
    });
    // The DB trigger inserted the automatic feedback row during the update.
    if status == GoalStatus::Completed && change.previous != GoalStatus::Completed {
        state.publish(AppEvent::FeedbackLogged {
            goal_id: form.goal_id.to_string(),
            employee_id: change.employee_id.to_string(),
        });
    }

    Ok(Redirect::to(&format!("/goals?user={}&notice=status-updated", form.user)))
}

pub async fn delete_goal(
    State(state): State<SharedState>,
    Form(form): Form<DeleteGoalForm>,
) -> Result<Redirect, ApiError> {
    GoalRepository::new(state.db.clone()).delete(form.goal_id).await?;

    state.publish(AppEvent::GoalDeleted { goal_id: form.goal_id.to_string() });

    Ok(Redirect::to(&format!("/goals?user={}&notice=goal-deleted", form.user)))
}

/// GET /api/goals/{employee_id} - goals for one employee
pub async fn api_goals(
    State(state): State<SharedState>,
    Path(employee_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = GoalRepository::new(state.db.clone())
        .list_for_employee(employee_id)
        .await?;
    Ok(Json(rows))
}
