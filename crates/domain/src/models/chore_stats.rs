//! Aggregated chore completion statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion statistics for one assignee over a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreStats {
    pub total_assigned: i64,
    pub total_completed: i64,
    pub total_verified: i64,
    pub total_missed: i64,
    /// Percentage of assigned instances completed or verified, 0.0-100.0.
    pub completion_rate: f64,
    pub points_earned: i64,
}

/// Query parameters for the stats endpoint.
///
/// When `assignee_id` is absent, stats are computed for the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub assignee_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chore_stats_serialization() {
        let stats = ChoreStats {
            total_assigned: 10,
            total_completed: 8,
            total_verified: 5,
            total_missed: 2,
            completion_rate: 80.0,
            points_earned: 40,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalAssigned"], 10);
        assert_eq!(json["completionRate"], 80.0);
        assert_eq!(json["pointsEarned"], 40);
    }

    #[test]
    fn test_stats_query_deserialization() {
        let query: StatsQuery =
            serde_json::from_str(r#"{"startDate": "2024-01-01", "endDate": "2024-01-31"}"#)
                .unwrap();
        assert!(query.assignee_id.is_none());
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
