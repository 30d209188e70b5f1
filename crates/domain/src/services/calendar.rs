//! Calendar collaborator for the chore scheduling core.
//!
//! Chore instances are mirrored onto the family calendar. Every call is
//! best-effort: a calendar failure is logged by the call site and never
//! fails the primary operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// Source module tag for events created by this core.
pub const SOURCE_MODULE_CHORES: &str = "chores";

/// A calendar event mirroring one chore instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub source_module: String,
    pub source_id: Uuid,
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub assignee_id: Uuid,
    pub family_id: Uuid,
}

/// Fields of a calendar event that lifecycle transitions may change
/// (partial update).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

/// Result of a calendar call attempt.
#[derive(Debug, Clone)]
pub enum CalendarResult {
    /// The calendar applied the change.
    Applied,
    /// The calendar rejected or could not apply the change (non-blocking).
    Failed(String),
    /// No calendar is wired up; the call was a no-op.
    Skipped,
}

/// Calendar service trait for mirroring chore instances as events.
#[async_trait::async_trait]
pub trait CalendarService: Send + Sync {
    /// Create an event for a newly generated instance.
    async fn create_event(&self, event: CalendarEvent) -> CalendarResult;

    /// Apply a partial update to the event for a source record.
    async fn update_event(
        &self,
        source_module: &str,
        source_id: Uuid,
        update: CalendarEventUpdate,
    ) -> CalendarResult;

    /// Delete the event for a source record.
    async fn delete_event(&self, source_module: &str, source_id: Uuid) -> CalendarResult;
}

/// No-op calendar service for deployments without the calendar module.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCalendarService;

impl NoopCalendarService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CalendarService for NoopCalendarService {
    async fn create_event(&self, event: CalendarEvent) -> CalendarResult {
        tracing::debug!(
            source_module = %event.source_module,
            source_id = %event.source_id,
            "No calendar configured, skipping event creation"
        );
        CalendarResult::Skipped
    }

    async fn update_event(
        &self,
        source_module: &str,
        source_id: Uuid,
        _update: CalendarEventUpdate,
    ) -> CalendarResult {
        tracing::debug!(
            source_module = %source_module,
            source_id = %source_id,
            "No calendar configured, skipping event update"
        );
        CalendarResult::Skipped
    }

    async fn delete_event(&self, source_module: &str, source_id: Uuid) -> CalendarResult {
        tracing::debug!(
            source_module = %source_module,
            source_id = %source_id,
            "No calendar configured, skipping event deletion"
        );
        CalendarResult::Skipped
    }
}

/// Mock calendar service for development and testing.
///
/// Records every call so tests can assert on the event traffic.
#[derive(Debug, Default)]
pub struct MockCalendarService {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
    created: Mutex<Vec<CalendarEvent>>,
    updated: Mutex<Vec<(Uuid, CalendarEventUpdate)>>,
    deleted: Mutex<Vec<Uuid>>,
}

impl MockCalendarService {
    /// Create a new mock calendar service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that simulates failures.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Events passed to `create_event` so far.
    pub fn created_events(&self) -> Vec<CalendarEvent> {
        self.created.lock().unwrap().clone()
    }

    /// Source ids and payloads passed to `update_event` so far.
    pub fn updated_events(&self) -> Vec<(Uuid, CalendarEventUpdate)> {
        self.updated.lock().unwrap().clone()
    }

    /// Source ids passed to `delete_event` so far.
    pub fn deleted_events(&self) -> Vec<Uuid> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CalendarService for MockCalendarService {
    async fn create_event(&self, event: CalendarEvent) -> CalendarResult {
        if self.simulate_failure {
            tracing::warn!(
                source_id = %event.source_id,
                "Mock calendar service simulating failure"
            );
            return CalendarResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            source_module = %event.source_module,
            source_id = %event.source_id,
            title = %event.title,
            "Mock: Would create calendar event"
        );
        self.created.lock().unwrap().push(event);
        CalendarResult::Applied
    }

    async fn update_event(
        &self,
        source_module: &str,
        source_id: Uuid,
        update: CalendarEventUpdate,
    ) -> CalendarResult {
        if self.simulate_failure {
            tracing::warn!(
                source_id = %source_id,
                "Mock calendar service simulating failure"
            );
            return CalendarResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            source_module = %source_module,
            source_id = %source_id,
            "Mock: Would update calendar event"
        );
        self.updated.lock().unwrap().push((source_id, update));
        CalendarResult::Applied
    }

    async fn delete_event(&self, source_module: &str, source_id: Uuid) -> CalendarResult {
        if self.simulate_failure {
            tracing::warn!(
                source_id = %source_id,
                "Mock calendar service simulating failure"
            );
            return CalendarResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            source_module = %source_module,
            source_id = %source_id,
            "Mock: Would delete calendar event"
        );
        self.deleted.lock().unwrap().push(source_id);
        CalendarResult::Applied
    }
}
