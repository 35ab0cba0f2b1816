//! Aggregate insight queries over the goals table.
//!
//! Backs the Business Insights page: status breakdown, average completion
//! time, and per-manager workload bounds.

use crate::error::Result;
use sqlx::PgPool;

/// One bar of the status breakdown.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Aggregate view of all tracked goals.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GoalInsights {
    pub status_counts: Vec<StatusCount>,
    pub avg_days_to_complete: f64,
    pub min_goals_per_manager: i64,
    pub max_goals_per_manager: i64,
    pub total_goals: i64,
}

impl GoalInsights {
    /// Assemble the insight set. The total is derived from the breakdown,
    /// never queried separately, so the two cannot drift apart under
    /// concurrent writes.
    fn from_parts(
        status_counts: Vec<StatusCount>,
        avg_days_to_complete: f64,
        min_goals_per_manager: i64,
        max_goals_per_manager: i64,
    ) -> Self {
        let total_goals = status_counts.iter().map(|c| c.count).sum();
        Self {
            status_counts,
            avg_days_to_complete,
            min_goals_per_manager,
            max_goals_per_manager,
            total_goals,
        }
    }

    /// Sum of the status breakdown. Always equals `total_goals`, since every
    /// goal has exactly one status.
    pub fn status_total(&self) -> i64 {
        self.status_counts.iter().map(|c| c.count).sum()
    }
}

/// Compute the full insight set.
pub async fn goal_insights(pool: &PgPool) -> Result<GoalInsights> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM goals GROUP BY status ORDER BY status")
            .fetch_all(pool)
            .await?;
    let status_counts = rows
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();

    // Days between due date and the final (Completed) update. Negative means
    // finished early.
    let avg_days_to_complete: f64 = sqlx::query_scalar(
        "SELECT COALESCE(
             AVG(EXTRACT(EPOCH FROM (last_updated - due_date::timestamptz)))::float8 / 86400.0,
             0.0
         )
         FROM goals
         WHERE status = 'Completed'",
    )
    .fetch_one(pool)
    .await?;

    let (min_goals, max_goals): (Option<i64>, Option<i64>) = sqlx::query_as(
        "SELECT MIN(goal_count), MAX(goal_count) FROM (
             SELECT COUNT(*) AS goal_count FROM goals GROUP BY manager_id
         ) AS per_manager",
    )
    .fetch_one(pool)
    .await?;

    Ok(GoalInsights::from_parts(
        status_counts,
        avg_days_to_complete,
        min_goals.unwrap_or(0),
        max_goals.unwrap_or(0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_total_sums_breakdown() {
        let insights = GoalInsights {
            status_counts: vec![
                StatusCount { status: "Completed".into(), count: 3 },
                StatusCount { status: "Draft".into(), count: 2 },
                StatusCount { status: "In Progress".into(), count: 5 },
            ],
            avg_days_to_complete: -1.5,
            min_goals_per_manager: 2,
            max_goals_per_manager: 8,
            total_goals: 10,
        };
        assert_eq!(insights.status_total(), 10);
        assert_eq!(insights.status_total(), insights.total_goals);
    }

    #[test]
    fn test_total_goals_derived_from_breakdown() {
        // The total must come from the breakdown itself; a separate COUNT(*)
        // could observe goals inserted between the two queries.
        let insights = GoalInsights::from_parts(
            vec![
                StatusCount { status: "Draft".into(), count: 4 },
                StatusCount { status: "Completed".into(), count: 6 },
            ],
            0.0,
            1,
            9,
        );
        assert_eq!(insights.total_goals, 10);
        assert_eq!(insights.status_total(), insights.total_goals);
    }

    #[test]
    fn test_status_total_empty() {
        let insights = GoalInsights {
            status_counts: Vec::new(),
            avg_days_to_complete: 0.0,
            min_goals_per_manager: 0,
            max_goals_per_manager: 0,
            total_goals: 0,
        };
        assert_eq!(insights.status_total(), 0);
    }
}
