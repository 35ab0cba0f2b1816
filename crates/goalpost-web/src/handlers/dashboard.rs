//! Dashboard handler — landing page with the selected user's goals and
//! recent feedback. Also hosts the page-shell helpers shared by every page.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::SharedState;
use goalpost_db::{Database, Employee, EmployeeRepository, FeedbackRepository, GoalRepository};

/// Navigation fragment shared across all pages; `__USER__` is replaced with
/// the current user query string so selection survives navigation.
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");

/// Query parameters every page accepts.
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub user: Option<uuid::Uuid>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Resolve the acting user: the requested one if present, else the first
/// employee alphabetically (there is no authentication, selection is a
/// dropdown).
pub fn current_user(employees: &[Employee], requested: Option<uuid::Uuid>) -> Option<Employee> {
    match requested {
        Some(id) => employees.iter().find(|e| e.id == id).cloned(),
        None => employees.first().cloned(),
    }
    .or_else(|| employees.first().cloned())
}

/// Minimal HTML escaping for user-supplied text.
pub fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn nav_html(user: Option<uuid::Uuid>) -> String {
    let query = match user {
        Some(id) => format!("?user={}", id),
        None => String::new(),
    };
    NAV_HTML.replace("__USER__", &query)
}

/// The user-selection dropdown rendered in every page header.
pub fn user_picker(employees: &[Employee], selected: Option<&Employee>, path: &str) -> String {
    let options: String = employees
        .iter()
        .map(|e| {
            let selected_attr = if selected.map(|s| s.id) == Some(e.id) {
                " selected"
            } else {
                ""
            };
            let role = if e.is_manager { "Manager" } else { "Employee" };
            format!(
                r#"<option value="{}"{}>{} ({})</option>"#,
                e.id,
                selected_attr,
                html_escape(&e.name),
                role
            )
        })
        .collect();

    format!(
        r#"<form method="get" action="{}" class="user-picker">
    <label for="user">Acting as</label>
    <select name="user" id="user" onchange="this.form.submit()">{}</select>
</form>"#,
        path, options
    )
}

/// Banner for post-redirect notices and errors. Slugs keep the URLs clean.
pub fn banner(query: &PageQuery) -> String {
    if let Some(error) = query.error.as_deref() {
        let message = match error {
            "duplicate-email" => "An employee with this email already exists.",
            "empty-description" => "Please provide a goal description.",
            "empty-comments" => "Please write some feedback before submitting.",
            _ => "Something went wrong.",
        };
        return format!(r#"<div class="banner banner-error">{}</div>"#, message);
    }
    if let Some(notice) = query.notice.as_deref() {
        let message = match notice {
            "employee-added" => "Employee onboarded.",
            "goal-created" => "Goal set.",
            "status-updated" => "Goal status updated.",
            "goal-deleted" => "Goal deleted.",
            "feedback-logged" => "Feedback submitted.",
            _ => "Done.",
        };
        return format!(r#"<div class="banner banner-ok">{}</div>"#, message);
    }
    String::new()
}

/// Wrap page body in the shared document shell.
pub fn page_shell(title: &str, user: Option<uuid::Uuid>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} — Goalpost</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
<div class="app-container">
{}
<main class="main-content">
{}
</main>
</div>
</body>
</html>"#,
        title,
        nav_html(user),
        body
    )
}

/// CSS class for a status pill.
pub fn status_badge(status: &str) -> &'static str {
    match status {
        "Completed" => "badge badge-success",
        "In Progress" => "badge badge-info",
        "Cancelled" => "badge badge-danger",
        _ => "badge badge-muted",
    }
}

pub async fn dashboard(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, ApiError> {
    let employees = EmployeeRepository::new(state.db.clone()).list().await?;
    let user = current_user(&employees, query.user);

    let (goal_rows, feedback_rows) = match &user {
        Some(u) => {
            let goals = GoalRepository::new(state.db.clone())
                .list_for_employee(u.id)
                .await?;
            let feedback = FeedbackRepository::new(state.db.clone())
                .list_for_employee(u.id)
                .await?;
            (goals, feedback)
        }
        None => (Vec::new(), Vec::new()),
    };

    let goals_html = if goal_rows.is_empty() {
        r#"<tr><td colspan="4" class="text-center text-muted">You don't have any goals set yet.</td></tr>"#.to_string()
    } else {
        goal_rows
            .iter()
            .map(|g| {
                format!(
                    r#"<tr>
    <td>{}</td>
    <td>{}</td>
    <td><span class="{}">{}</span></td>
    <td>{}</td>
</tr>"#,
                    html_escape(&g.description),
                    g.due_date,
                    status_badge(&g.status),
                    g.status,
                    html_escape(&g.manager_name)
                )
            })
            .collect()
    };

    let feedback_html = if feedback_rows.is_empty() {
        r#"<tr><td colspan="4" class="text-center text-muted">No feedback has been provided for you yet.</td></tr>"#.to_string()
    } else {
        feedback_rows
            .iter()
            .map(|f| {
                format!(
                    r#"<tr>
    <td>{}</td>
    <td>{}</td>
    <td>{}</td>
    <td>{}</td>
</tr>"#,
                    html_escape(&f.goal_description),
                    html_escape(&f.comments),
                    f.feedback_date.format("%Y-%m-%d %H:%M"),
                    html_escape(&f.manager_name)
                )
            })
            .collect()
    };

    let greeting = user
        .as_ref()
        .map(|u| format!("Welcome, {}!", html_escape(&u.name)))
        .unwrap_or_else(|| "No employees yet — onboard someone on the Team page.".to_string());

    let body = format!(
        r#"<div class="page-header">
    <h1 class="page-title">{}</h1>
    {}
</div>
{}
<section class="card">
    <h2>Your Goals</h2>
    <table class="data-table">
        <thead><tr><th>Description</th><th>Due Date</th><th>Status</th><th>Manager</th></tr></thead>
        <tbody>{}</tbody>
    </table>
</section>
<section class="card">
    <h2>Recent Feedback</h2>
    <table class="data-table">
        <thead><tr><th>Goal</th><th>Comments</th><th>Date</th><th>Manager</th></tr></thead>
        <tbody>{}</tbody>
    </table>
</section>"#,
        greeting,
        user_picker(&employees, user.as_ref(), "/"),
        banner(&query),
        goals_html,
        feedback_html
    );

    Ok(Html(page_shell("Dashboard", user.map(|u| u.id), &body)))
}

/// GET /api/stats - row counts across the three tables
pub async fn api_stats(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let stats = Database::from_pool(state.db.clone()).stats().await?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str, is_manager: bool) -> Employee {
        Employee::new(name.to_string(), format!("{}@example.com", name), is_manager)
    }

    #[test]
    fn test_current_user_falls_back_to_first() {
        let employees = vec![employee("alice", false), employee("bob", true)];
        let picked = current_user(&employees, None).unwrap();
        assert_eq!(picked.name, "alice");

        // Unknown id also falls back rather than 404ing the page.
        let picked = current_user(&employees, Some(uuid::Uuid::new_v4())).unwrap();
        assert_eq!(picked.name, "alice");
    }

    #[test]
    fn test_current_user_honours_selection() {
        let employees = vec![employee("alice", false), employee("bob", true)];
        let bob_id = employees[1].id;
        let picked = current_user(&employees, Some(bob_id)).unwrap();
        assert_eq!(picked.name, "bob");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<b>"a"&c</b>"#), "&lt;b&gt;&quot;a&quot;&amp;c&lt;/b&gt;");
    }

    #[test]
    fn test_status_badge_classes() {
        assert_eq!(status_badge("Completed"), "badge badge-success");
        assert_eq!(status_badge("Draft"), "badge badge-muted");
    }
}
