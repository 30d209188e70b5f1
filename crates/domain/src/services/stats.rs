//! Completion statistics over chore instances.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::chore_instance::{ChoreInstance, InstanceStatus};
use crate::models::chore_stats::ChoreStats;
use crate::services::store::{ChoreInstanceStore, ChoreStore, StoreError};

/// Aggregates instance state into [`ChoreStats`]. Pure.
///
/// Completed and verified instances both count as completed and both earn
/// the parent chore's points. Instances whose chore is missing from the
/// lookup earn zero points.
pub fn compute_stats(instances: &[ChoreInstance], points_by_chore: &HashMap<Uuid, i32>) -> ChoreStats {
    let mut stats = ChoreStats::default();

    for instance in instances {
        stats.total_assigned += 1;
        match instance.status {
            InstanceStatus::Completed | InstanceStatus::Verified => {
                stats.total_completed += 1;
                if instance.status == InstanceStatus::Verified {
                    stats.total_verified += 1;
                }
                let points = points_by_chore.get(&instance.chore_id).copied().unwrap_or(0);
                stats.points_earned += i64::from(points);
            }
            InstanceStatus::Missed => stats.total_missed += 1,
            InstanceStatus::Pending | InstanceStatus::Rejected => {}
        }
    }

    if stats.total_assigned > 0 {
        stats.completion_rate =
            stats.total_completed as f64 / stats.total_assigned as f64 * 100.0;
    }

    stats
}

/// Loads instance history and computes completion statistics.
pub struct StatsService {
    chores: Arc<dyn ChoreStore>,
    instances: Arc<dyn ChoreInstanceStore>,
}

impl StatsService {
    pub fn new(chores: Arc<dyn ChoreStore>, instances: Arc<dyn ChoreInstanceStore>) -> Self {
        Self { chores, instances }
    }

    /// Stats for one assignee over `[start, end]` inclusive.
    pub async fn stats_for_assignee(
        &self,
        assignee_id: Uuid,
        family_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ChoreStats, StoreError> {
        let instances = self
            .instances
            .list_by_assignee(assignee_id, family_id, start, end)
            .await?;
        let chores = self.chores.list_by_family(family_id).await?;
        let points_by_chore: HashMap<Uuid, i32> =
            chores.into_iter().map(|c| (c.id, c.points)).collect();

        Ok(compute_stats(&instances, &points_by_chore))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn instance(chore_id: Uuid, status: InstanceStatus) -> ChoreInstance {
        let now = Utc::now();
        ChoreInstance {
            id: Uuid::new_v4(),
            chore_id,
            family_id: Uuid::new_v4(),
            assignee_id: Uuid::new_v4(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            status,
            completed_at: None,
            verified_by: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_compute_stats_empty_range() {
        let stats = compute_stats(&[], &HashMap::new());
        assert_eq!(stats, ChoreStats::default());
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn test_compute_stats_counts_and_rate() {
        // 10 instances: 6 completed, 2 verified, 1 missed, 1 pending,
        // 5 points each.
        let chore_id = Uuid::new_v4();
        let mut instances = Vec::new();
        for _ in 0..6 {
            instances.push(instance(chore_id, InstanceStatus::Completed));
        }
        for _ in 0..2 {
            instances.push(instance(chore_id, InstanceStatus::Verified));
        }
        instances.push(instance(chore_id, InstanceStatus::Missed));
        instances.push(instance(chore_id, InstanceStatus::Pending));

        let points = HashMap::from([(chore_id, 5)]);
        let stats = compute_stats(&instances, &points);

        assert_eq!(stats.total_assigned, 10);
        assert_eq!(stats.total_completed, 8);
        assert_eq!(stats.total_verified, 2);
        assert_eq!(stats.total_missed, 1);
        assert_eq!(stats.completion_rate, 80.0);
        assert_eq!(stats.points_earned, 40);
    }

    #[test]
    fn test_compute_stats_unknown_chore_earns_no_points() {
        let instances = vec![instance(Uuid::new_v4(), InstanceStatus::Completed)];
        let stats = compute_stats(&instances, &HashMap::new());

        assert_eq!(stats.total_completed, 1);
        assert_eq!(stats.points_earned, 0);
    }

    #[test]
    fn test_compute_stats_rejected_counts_assigned_only() {
        let chore_id = Uuid::new_v4();
        let instances = vec![
            instance(chore_id, InstanceStatus::Rejected),
            instance(chore_id, InstanceStatus::Completed),
        ];
        let points = HashMap::from([(chore_id, 5)]);
        let stats = compute_stats(&instances, &points);

        assert_eq!(stats.total_assigned, 2);
        assert_eq!(stats.total_completed, 1);
        assert_eq!(stats.total_missed, 0);
        assert_eq!(stats.completion_rate, 50.0);
        assert_eq!(stats.points_earned, 5);
    }
}
