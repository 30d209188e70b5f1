//! Background job that materializes the day's chore instances.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info};

use super::scheduler::{Job, JobFrequency};
use crate::middleware::record_instances_generated;
use domain::services::{
    CalendarService, ChoreInstanceStore, ChoreStore, GenerationSummary, InstanceGenerator,
};
use persistence::repositories::{ChoreInstanceRepository, ChoreRepository};

/// Job that runs daily instance generation across every family with chores.
///
/// One family failing does not stop the sweep; the job reports failure at
/// the end so the scheduler logs it.
pub struct DailyGenerationJob {
    pool: PgPool,
    calendar: Arc<dyn CalendarService>,
    hour: u32,
}

impl DailyGenerationJob {
    /// Create a new daily generation job running at `hour` UTC.
    pub fn new(pool: PgPool, calendar: Arc<dyn CalendarService>, hour: u32) -> Self {
        Self {
            pool,
            calendar,
            hour,
        }
    }
}

#[async_trait::async_trait]
impl Job for DailyGenerationJob {
    fn name(&self) -> &'static str {
        "daily_instance_generation"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::DailyAtHour(self.hour)
    }

    async fn execute(&self) -> Result<(), String> {
        let chores: Arc<dyn ChoreStore> = Arc::new(ChoreRepository::new(self.pool.clone()));
        let instances: Arc<dyn ChoreInstanceStore> =
            Arc::new(ChoreInstanceRepository::new(self.pool.clone()));
        let generator =
            InstanceGenerator::new(chores.clone(), instances, Arc::clone(&self.calendar));

        let family_ids = chores
            .family_ids_with_chores()
            .await
            .map_err(|e| format!("Failed to list families with chores: {}", e))?;

        let mut total = GenerationSummary::default();
        let mut families_failed = 0usize;

        for family_id in &family_ids {
            match generator.generate_daily(*family_id).await {
                Ok(summary) => {
                    total.created += summary.created;
                    total.skipped += summary.skipped;
                    total.failed += summary.failed;
                }
                Err(e) => {
                    error!(family_id = %family_id, error = %e, "Daily generation failed for family");
                    families_failed += 1;
                }
            }
        }

        record_instances_generated(total.created);
        info!(
            families = family_ids.len(),
            created = total.created,
            skipped = total.skipped,
            failed = total.failed,
            "Daily generation sweep finished"
        );

        if families_failed > 0 {
            return Err(format!(
                "{} of {} families failed",
                families_failed,
                family_ids.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::services::NoopCalendarService;

    #[tokio::test]
    async fn test_job_name_and_frequency() {
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let job = DailyGenerationJob::new(pool, Arc::new(NoopCalendarService::new()), 4);

        assert_eq!(job.name(), "daily_instance_generation");
        assert!(matches!(job.frequency(), JobFrequency::DailyAtHour(4)));
    }
}
