//! Instance generation for recurring chores.
//!
//! Two entry points share one core: backfill when a chore is created, and
//! the daily sweep that materializes the current day's instances. Both are
//! idempotent; the `exists` pre-check avoids duplicate work and the store's
//! `(chore_id, due_date)` uniqueness constraint guarantees no duplicates
//! under concurrent runs.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::chore::Chore;
use crate::models::chore_instance::ChoreInstance;
use crate::services::calendar::{
    CalendarEvent, CalendarResult, CalendarService, SOURCE_MODULE_CHORES,
};
use crate::services::occurrence;
use crate::services::store::{ChoreInstanceStore, ChoreStore, NewChoreInstance, StoreError};

/// Counts from one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    /// Instances created.
    pub created: usize,
    /// Due dates skipped because an instance already existed.
    pub skipped: usize,
    /// Due dates that failed on a store error.
    pub failed: usize,
}

impl GenerationSummary {
    fn absorb(&mut self, other: GenerationSummary) {
        self.created += other.created;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Generates dated chore instances from recurrence rules.
pub struct InstanceGenerator {
    chores: Arc<dyn ChoreStore>,
    instances: Arc<dyn ChoreInstanceStore>,
    calendar: Arc<dyn CalendarService>,
}

impl InstanceGenerator {
    pub fn new(
        chores: Arc<dyn ChoreStore>,
        instances: Arc<dyn ChoreInstanceStore>,
        calendar: Arc<dyn CalendarService>,
    ) -> Self {
        Self {
            chores,
            instances,
            calendar,
        }
    }

    /// Backfills instances for a newly created chore, from its start date
    /// through today. Future-dated chores generate nothing until the daily
    /// sweep reaches their start date.
    ///
    /// Store failures on individual dates are logged and counted, never
    /// returned; each created instance is independently valid.
    pub async fn generate_initial(&self, chore: &Chore) -> GenerationSummary {
        let today = Utc::now().date_naive();
        let (from, to) = match occurrence::generation_window(&chore.occurrence_data, today) {
            Some(window) => window,
            None => {
                debug!(
                    chore_id = %chore.id,
                    start_date = %chore.occurrence_data.start_date,
                    "Chore starts in the future, no backfill"
                );
                return GenerationSummary::default();
            }
        };

        let summary = self.generate_range(chore, from, to).await;
        info!(
            chore_id = %chore.id,
            from = %from,
            to = %to,
            created = summary.created,
            skipped = summary.skipped,
            failed = summary.failed,
            "Initial instance generation finished"
        );
        summary
    }

    /// Generates today's instances for every chore in a family. Safe to
    /// invoke any number of times per day.
    ///
    /// Fails only when the family's chore list cannot be loaded; failures
    /// on individual chores are logged and counted in the summary.
    pub async fn generate_daily(&self, family_id: Uuid) -> Result<GenerationSummary, StoreError> {
        let today = Utc::now().date_naive();
        let chores = self.chores.list_by_family(family_id).await?;

        let mut summary = GenerationSummary::default();
        for chore in &chores {
            summary.absorb(self.generate_range(chore, today, today).await);
        }

        info!(
            family_id = %family_id,
            date = %today,
            chores = chores.len(),
            created = summary.created,
            skipped = summary.skipped,
            failed = summary.failed,
            "Daily instance generation finished"
        );
        Ok(summary)
    }

    /// Generates an instance for every due date of `chore` within
    /// `[from, to]`, ascending, skipping dates that already have one.
    pub async fn generate_range(
        &self,
        chore: &Chore,
        from: NaiveDate,
        to: NaiveDate,
    ) -> GenerationSummary {
        let mut summary = GenerationSummary::default();
        for due_date in from.iter_days().take_while(|d| *d <= to) {
            if !occurrence::is_due(chore.occurrence_type, &chore.occurrence_data, due_date) {
                continue;
            }
            self.generate_for_date(chore, due_date, &mut summary).await;
        }
        summary
    }

    async fn generate_for_date(
        &self,
        chore: &Chore,
        due_date: NaiveDate,
        summary: &mut GenerationSummary,
    ) {
        match self.instances.exists(chore.id, chore.family_id, due_date).await {
            Ok(true) => {
                summary.skipped += 1;
                return;
            }
            Ok(false) => {}
            Err(err) => {
                warn!(
                    chore_id = %chore.id,
                    due_date = %due_date,
                    error = %err,
                    "Existence check failed, skipping date"
                );
                summary.failed += 1;
                return;
            }
        }

        let new_instance = NewChoreInstance {
            chore_id: chore.id,
            family_id: chore.family_id,
            assignee_id: chore.assignee_id,
            due_date,
        };

        match self.instances.insert(new_instance).await {
            Ok(instance) => {
                summary.created += 1;
                self.publish_created_event(chore, &instance).await;
            }
            // Lost a race with a concurrent run; the instance exists.
            Err(StoreError::Conflict(_)) => {
                summary.skipped += 1;
            }
            Err(err) => {
                warn!(
                    chore_id = %chore.id,
                    due_date = %due_date,
                    error = %err,
                    "Failed to create chore instance"
                );
                summary.failed += 1;
            }
        }
    }

    /// Best-effort calendar push. Failures are logged, never propagated;
    /// the instance write already succeeded.
    async fn publish_created_event(&self, chore: &Chore, instance: &ChoreInstance) {
        let event = calendar_event_for(chore, instance);
        if let CalendarResult::Failed(reason) = self.calendar.create_event(event).await {
            warn!(
                instance_id = %instance.id,
                chore_id = %chore.id,
                reason = %reason,
                "Calendar event creation failed"
            );
        }
    }
}

/// Calendar event mirroring one instance: a one-hour block starting at
/// midnight UTC on the due date.
fn calendar_event_for(chore: &Chore, instance: &ChoreInstance) -> CalendarEvent {
    let starts_at = instance.due_date.and_time(NaiveTime::MIN).and_utc();
    CalendarEvent {
        source_module: SOURCE_MODULE_CHORES.to_string(),
        source_id: instance.id,
        title: chore.name.clone(),
        description: chore.description.clone().unwrap_or_default(),
        starts_at,
        ends_at: starts_at + Duration::hours(1),
        assignee_id: instance.assignee_id,
        family_id: instance.family_id,
    }
}
