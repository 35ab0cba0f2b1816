//! Team page — roster and onboarding. Employees are immutable once created,
//! so there is no edit surface here.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect};
use axum::{Form, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::dashboard::{
    banner, current_user, html_escape, page_shell, user_picker, PageQuery,
};
use crate::state::{AppEvent, SharedState};
use goalpost_db::{DbError, EmployeeRepository};

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeForm {
    pub user: Option<uuid::Uuid>,
    pub name: String,
    pub email: String,
    /// Checkboxes post "on" when ticked and nothing otherwise.
    pub is_manager: Option<String>,
}

pub async fn team_page(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, ApiError> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employees = repo.list().await?;
    let user = current_user(&employees, query.user);
    let user_id = user.as_ref().map(|u| u.id);

    let roster_html = if employees.is_empty() {
        r#"<tr><td colspan="3" class="text-center text-muted">Nobody here yet.</td></tr>"#
            .to_string()
    } else {
        employees
            .iter()
            .map(|e| {
                let role = if e.is_manager { "Manager" } else { "Employee" };
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                    html_escape(&e.name),
                    html_escape(&e.email),
                    role
                )
            })
            .collect()
    };

    let body = format!(
        r#"<div class="page-header">
    <h1 class="page-title">Team</h1>
    {}
</div>
{}
<section class="card">
    <h2>Onboard an Employee</h2>
    <form method="post" action="/team" class="stacked-form">
        <input type="hidden" name="user" value="{}">
        <label>Name <input type="text" name="name" required></label>
        <label>Email <input type="email" name="email" required></label>
        <label class="checkbox-label"><input type="checkbox" name="is_manager"> Manager</label>
        <button type="submit" class="btn btn-primary">Add</button>
    </form>
</section>
<section class="card">
    <h2>Roster</h2>
    <table class="data-table">
        <thead><tr><th>Name</th><th>Email</th><th>Role</th></tr></thead>
        <tbody>{}</tbody>
    </table>
</section>"#,
        user_picker(&employees, user.as_ref(), "/team"),
        banner(&query),
        user_id.map(|u| u.to_string()).unwrap_or_default(),
        roster_html
    );

    Ok(Html(page_shell("Team", user_id, &body)))
}

pub async fn create_employee(
    State(state): State<SharedState>,
    Form(form): Form<CreateEmployeeForm>,
) -> Result<Redirect, ApiError> {
    let is_manager = form.is_manager.is_some();
    let user_query = form
        .user
        .map(|u| format!("user={}&", u))
        .unwrap_or_default();

    let result = EmployeeRepository::new(state.db.clone())
        .insert(form.name.trim(), form.email.trim(), is_manager)
        .await;

    match result {
        Ok(id) => {
            state.publish(AppEvent::EmployeeAdded {
                employee_id: id.to_string(),
                name: form.name.trim().to_string(),
                is_manager,
            });
            Ok(Redirect::to(&format!("/team?{}notice=employee-added", user_query)))
        }
        // Duplicate email is a user mistake, not a server fault: report it
        // on the page and leave the roster unchanged.
        Err(DbError::DuplicateEmail(_)) => {
            Ok(Redirect::to(&format!("/team?{}error=duplicate-email", user_query)))
        }
        Err(other) => Err(other.into()),
    }
}

/// GET /api/employees - full roster
pub async fn api_employees(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let employees = EmployeeRepository::new(state.db.clone()).list().await?;
    Ok(Json(employees))
}
