//! Completion and verification lifecycle for chore instances.
//!
//! State machine: `pending` → `completed` → `verified`. The `rejected` and
//! `missed` states exist in the data model but are driven externally, not
//! by this manager. Terminal states are immutable here; no transition moves
//! backward.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::chore_instance::{ChoreInstance, InstanceStatus};
use crate::services::calendar::{
    CalendarEventUpdate, CalendarResult, CalendarService, SOURCE_MODULE_CHORES,
};
use crate::services::store::{ChoreInstanceStore, StoreError};

/// Error from a lifecycle transition.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The acting user may not perform this transition.
    #[error("{0}")]
    Forbidden(String),
    /// The transition is not legal from the instance's current state.
    #[error("transition requires a {expected} instance, current status is {current}")]
    InvalidState {
        expected: InstanceStatus,
        current: InstanceStatus,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Applies completion and verification transitions to chore instances.
pub struct InstanceLifecycle {
    instances: Arc<dyn ChoreInstanceStore>,
    calendar: Arc<dyn CalendarService>,
}

impl InstanceLifecycle {
    pub fn new(instances: Arc<dyn ChoreInstanceStore>, calendar: Arc<dyn CalendarService>) -> Self {
        Self {
            instances,
            calendar,
        }
    }

    /// Marks a pending instance completed by its assignee.
    ///
    /// Only the assignee may complete an instance, and only from `pending`.
    pub async fn complete(
        &self,
        instance_id: Uuid,
        family_id: Uuid,
        acting_user_id: Uuid,
        notes: Option<String>,
    ) -> Result<ChoreInstance, LifecycleError> {
        let mut instance = self.instances.find_by_id(instance_id, family_id).await?;

        if instance.status != InstanceStatus::Pending {
            return Err(LifecycleError::InvalidState {
                expected: InstanceStatus::Pending,
                current: instance.status,
            });
        }
        if instance.assignee_id != acting_user_id {
            return Err(LifecycleError::Forbidden(
                "Only the assignee can complete a chore instance".to_string(),
            ));
        }

        instance.status = InstanceStatus::Completed;
        instance.completed_at = Some(Utc::now());
        instance.notes = notes;

        let updated = self.instances.update(&instance).await?;
        self.push_completed_update(&updated).await;
        Ok(updated)
    }

    /// Marks a completed instance verified by a parent.
    ///
    /// The parent role is enforced by the caller; this manager enforces the
    /// state precondition. Completion notes are preserved unless the verify
    /// request carries non-empty notes.
    pub async fn verify(
        &self,
        instance_id: Uuid,
        family_id: Uuid,
        verifier_id: Uuid,
        notes: Option<String>,
    ) -> Result<ChoreInstance, LifecycleError> {
        let mut instance = self.instances.find_by_id(instance_id, family_id).await?;

        if instance.status != InstanceStatus::Completed {
            return Err(LifecycleError::InvalidState {
                expected: InstanceStatus::Completed,
                current: instance.status,
            });
        }

        instance.status = InstanceStatus::Verified;
        instance.verified_by = Some(verifier_id);
        if let Some(notes) = notes {
            if !notes.is_empty() {
                instance.notes = Some(notes);
            }
        }

        Ok(self.instances.update(&instance).await?)
    }

    /// Best-effort calendar sync for a completed instance.
    async fn push_completed_update(&self, instance: &ChoreInstance) {
        let update = CalendarEventUpdate {
            completed: Some(true),
            ..CalendarEventUpdate::default()
        };
        let result = self
            .calendar
            .update_event(SOURCE_MODULE_CHORES, instance.id, update)
            .await;
        if let CalendarResult::Failed(reason) = result {
            warn!(
                instance_id = %instance.id,
                reason = %reason,
                "Calendar event update failed"
            );
        }
    }
}
