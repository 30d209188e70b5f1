//! Storage abstractions for chores and chore instances.
//!
//! Every operation is scoped by family id; a row that exists under a
//! different family is reported as not found. Implementations must enforce
//! the `(chore_id, due_date)` uniqueness of instances at the storage layer
//! and surface violations as [`StoreError::Conflict`].

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::chore::{Chore, OccurrenceData, OccurrenceType};
use crate::models::chore_instance::ChoreInstance;

/// Error surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched the id within the family scope.
    #[error("not found: {0}")]
    NotFound(String),
    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Transport or storage-level failure.
    #[error("storage failure: {0}")]
    Backend(String),
}

/// Fields of a chore that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewChore {
    pub family_id: Uuid,
    pub creator_id: Uuid,
    pub assignee_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub points: i32,
    pub occurrence_type: OccurrenceType,
    pub occurrence_data: OccurrenceData,
}

/// Fields of a chore instance that has not been persisted yet.
///
/// Instances are always created in `pending` status.
#[derive(Debug, Clone)]
pub struct NewChoreInstance {
    pub chore_id: Uuid,
    pub family_id: Uuid,
    pub assignee_id: Uuid,
    pub due_date: NaiveDate,
}

/// Persistence operations for chores.
#[async_trait::async_trait]
pub trait ChoreStore: Send + Sync {
    /// Insert a chore, assigning id and timestamps.
    async fn insert(&self, new_chore: NewChore) -> Result<Chore, StoreError>;

    /// Fetch one chore by id within a family.
    async fn find_by_id(&self, id: Uuid, family_id: Uuid) -> Result<Chore, StoreError>;

    /// All chores belonging to a family.
    async fn list_by_family(&self, family_id: Uuid) -> Result<Vec<Chore>, StoreError>;

    /// All chores assigned to one family member.
    async fn list_by_assignee(
        &self,
        assignee_id: Uuid,
        family_id: Uuid,
    ) -> Result<Vec<Chore>, StoreError>;

    /// Full replace of a chore's mutable fields; bumps `updated_at`.
    async fn update(&self, chore: &Chore) -> Result<Chore, StoreError>;

    /// Delete a chore. Storage-level cascade removes its instances.
    async fn delete(&self, id: Uuid, family_id: Uuid) -> Result<(), StoreError>;

    /// Ids of every family that has at least one chore.
    async fn family_ids_with_chores(&self) -> Result<Vec<Uuid>, StoreError>;
}

/// Persistence operations for chore instances.
#[async_trait::async_trait]
pub trait ChoreInstanceStore: Send + Sync {
    /// True iff an instance exists for `(chore_id, due_date)`, regardless
    /// of status.
    async fn exists(
        &self,
        chore_id: Uuid,
        family_id: Uuid,
        due_date: NaiveDate,
    ) -> Result<bool, StoreError>;

    /// Insert a pending instance, assigning id and timestamps.
    async fn insert(&self, new_instance: NewChoreInstance) -> Result<ChoreInstance, StoreError>;

    /// Fetch one instance by id within a family.
    async fn find_by_id(&self, id: Uuid, family_id: Uuid) -> Result<ChoreInstance, StoreError>;

    /// All instances of one chore, ascending by due date.
    async fn list_by_chore(
        &self,
        chore_id: Uuid,
        family_id: Uuid,
    ) -> Result<Vec<ChoreInstance>, StoreError>;

    /// All of a family's instances due on one date.
    async fn list_by_due_date(
        &self,
        family_id: Uuid,
        due_date: NaiveDate,
    ) -> Result<Vec<ChoreInstance>, StoreError>;

    /// All instances for an assignee with due dates in `[start, end]`
    /// inclusive, ascending by due date.
    async fn list_by_assignee(
        &self,
        assignee_id: Uuid,
        family_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ChoreInstance>, StoreError>;

    /// Full replace of status, completed_at, verified_by and notes; bumps
    /// `updated_at`.
    async fn update(&self, instance: &ChoreInstance) -> Result<ChoreInstance, StoreError>;
}
