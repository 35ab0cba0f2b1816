//! Live-database integration tests.
//!
//! Require a running PostgreSQL with DATABASE_URL set. Run with:
//! cargo test --package goalpost-db --test live_db -- --ignored --nocapture

use goalpost_db::{
    auto_feedback_comment, goal_insights, Database, EmployeeRepository, FeedbackRepository,
    GoalRepository, GoalStatus,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

async fn test_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for live tests");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("could not connect to test database");

    Database::from_pool(pool.clone())
        .initialize()
        .await
        .expect("schema setup failed");

    pool
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_rejected_and_count_unchanged() {
    let pool = test_pool().await;
    let employees = EmployeeRepository::new(pool.clone());

    let email = unique_email("dup");
    employees.insert("First Holder", &email, false).await.unwrap();

    let count_before = employees.count().await.unwrap();

    let err = employees
        .insert("Second Holder", &email, false)
        .await
        .expect_err("duplicate email should be rejected");
    assert!(
        matches!(err, goalpost_db::DbError::DuplicateEmail(ref e) if *e == email),
        "unexpected error: {err:?}"
    );

    let count_after = employees.count().await.unwrap();
    assert_eq!(count_before, count_after);
}

#[tokio::test]
#[ignore]
async fn test_completed_transition_creates_exactly_one_feedback() {
    let pool = test_pool().await;
    let employees = EmployeeRepository::new(pool.clone());
    let goals = GoalRepository::new(pool.clone());
    let feedback = FeedbackRepository::new(pool.clone());

    let manager_id = employees
        .insert("Morgan Manager", &unique_email("mgr"), true)
        .await
        .unwrap();
    let employee_id = employees
        .insert("Erin Employee", &unique_email("emp"), false)
        .await
        .unwrap();

    let due = chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let goal_id = goals
        .insert(employee_id, manager_id, "Finish onboarding docs", due)
        .await
        .unwrap();

    goals.update_status(goal_id, GoalStatus::InProgress).await.unwrap();
    assert_eq!(feedback.count_for_goal(goal_id).await.unwrap(), 0);

    goals.update_status(goal_id, GoalStatus::Completed).await.unwrap();
    assert_eq!(feedback.count_for_goal(goal_id).await.unwrap(), 1);

    // The generated row carries the canonical comment text.
    let rows = feedback.list_for_employee(employee_id).await.unwrap();
    let expected = auto_feedback_comment("Finish onboarding docs", "Erin Employee");
    assert!(rows.iter().any(|r| r.comments == expected));
}

#[tokio::test]
#[ignore]
async fn test_completed_resave_adds_no_feedback() {
    let pool = test_pool().await;
    let employees = EmployeeRepository::new(pool.clone());
    let goals = GoalRepository::new(pool.clone());
    let feedback = FeedbackRepository::new(pool.clone());

    let manager_id = employees
        .insert("Morgan Manager", &unique_email("mgr"), true)
        .await
        .unwrap();
    let employee_id = employees
        .insert("Erin Employee", &unique_email("emp"), false)
        .await
        .unwrap();

    let due = chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let goal_id = goals
        .insert(employee_id, manager_id, "Ship the beta", due)
        .await
        .unwrap();

    goals.update_status(goal_id, GoalStatus::Completed).await.unwrap();
    assert_eq!(feedback.count_for_goal(goal_id).await.unwrap(), 1);

    // Re-saving Completed is a no-op for the trigger.
    goals.update_status(goal_id, GoalStatus::Completed).await.unwrap();
    assert_eq!(feedback.count_for_goal(goal_id).await.unwrap(), 1);

    // Leaving Completed and coming back fires again: one row per transition,
    // not per goal.
    goals.update_status(goal_id, GoalStatus::InProgress).await.unwrap();
    goals.update_status(goal_id, GoalStatus::Completed).await.unwrap();
    assert_eq!(feedback.count_for_goal(goal_id).await.unwrap(), 2);
}

#[tokio::test]
#[ignore]
async fn test_update_status_reports_previous_status() {
    let pool = test_pool().await;
    let employees = EmployeeRepository::new(pool.clone());
    let goals = GoalRepository::new(pool.clone());

    let manager_id = employees
        .insert("Morgan Manager", &unique_email("mgr"), true)
        .await
        .unwrap();
    let employee_id = employees
        .insert("Erin Employee", &unique_email("emp"), false)
        .await
        .unwrap();

    let due = chrono::NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
    let goal_id = goals
        .insert(employee_id, manager_id, "Write the runbook", due)
        .await
        .unwrap();

    // Each update reports the status it replaced, from the same statement.
    let change = goals.update_status(goal_id, GoalStatus::InProgress).await.unwrap();
    assert_eq!(change.previous, GoalStatus::Draft);
    assert_eq!(change.employee_id, employee_id);

    let change = goals.update_status(goal_id, GoalStatus::Completed).await.unwrap();
    assert_eq!(change.previous, GoalStatus::InProgress);

    let err = goals
        .update_status(uuid::Uuid::new_v4(), GoalStatus::Draft)
        .await
        .expect_err("unknown goal should not update");
    assert!(matches!(err, goalpost_db::DbError::NotFound(_)));
}

#[tokio::test]
#[ignore]
async fn test_status_counts_sum_to_total() {
    let pool = test_pool().await;
    let employees = EmployeeRepository::new(pool.clone());
    let goals = GoalRepository::new(pool.clone());

    // Seed a few goals across statuses so the breakdown is non-trivial.
    let manager_id = employees
        .insert("Morgan Manager", &unique_email("mgr"), true)
        .await
        .unwrap();
    let employee_id = employees
        .insert("Erin Employee", &unique_email("emp"), false)
        .await
        .unwrap();
    let due = chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    for status in [GoalStatus::InProgress, GoalStatus::Completed, GoalStatus::Cancelled] {
        let goal_id = goals
            .insert(employee_id, manager_id, "Seed goal", due)
            .await
            .unwrap();
        goals.update_status(goal_id, status).await.unwrap();
    }

    let insights = goal_insights(&pool).await.unwrap();
    assert_eq!(insights.status_total(), insights.total_goals);
    assert_eq!(insights.total_goals, goals.count().await.unwrap());
    assert!(insights.min_goals_per_manager <= insights.max_goals_per_manager);
}

#[tokio::test]
#[ignore]
async fn test_goal_delete_cascades_feedback() {
    let pool = test_pool().await;
    let employees = EmployeeRepository::new(pool.clone());
    let goals = GoalRepository::new(pool.clone());
    let feedback = FeedbackRepository::new(pool.clone());

    let manager_id = employees
        .insert("Morgan Manager", &unique_email("mgr"), true)
        .await
        .unwrap();
    let employee_id = employees
        .insert("Erin Employee", &unique_email("emp"), false)
        .await
        .unwrap();

    let due = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let goal_id = goals
        .insert(employee_id, manager_id, "Temporary goal", due)
        .await
        .unwrap();
    goals.update_status(goal_id, GoalStatus::Completed).await.unwrap();
    assert_eq!(feedback.count_for_goal(goal_id).await.unwrap(), 1);

    goals.delete(goal_id).await.unwrap();
    assert!(goals.find_by_id(goal_id).await.unwrap().is_none());
    assert_eq!(feedback.count_for_goal(goal_id).await.unwrap(), 0);
}
