//! Chore endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{ChoreInstanceRepository, ChoreRepository};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::FamilyAuth;
use crate::middleware::record_instances_generated;
use domain::models::chore::{
    ChoreResponse, CreateChoreRequest, ListChoresQuery, ListChoresResponse, UpdateChoreRequest,
};
use domain::models::chore_instance::{ChoreInstanceResponse, ListInstancesResponse};
use domain::models::chore_stats::{ChoreStats, StatsQuery};
use domain::services::{
    CalendarResult, ChoreInstanceStore, ChoreStore, GenerationSummary, InstanceGenerator,
    NewChore, StatsService, SOURCE_MODULE_CHORES,
};

/// Create a new chore.
///
/// Immediately generates instances for every due date from the chore's
/// start date through today.
///
/// POST /api/v1/chores
pub async fn create_chore(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Json(request): Json<CreateChoreRequest>,
) -> Result<(StatusCode, Json<ChoreResponse>), ApiError> {
    request.validate()?;

    let chores: Arc<dyn ChoreStore> = Arc::new(ChoreRepository::new(state.pool.clone()));
    let chore = chores
        .insert(NewChore {
            family_id: auth.family_id,
            creator_id: auth.user_id,
            assignee_id: request.assignee_id,
            name: request.name,
            description: request.description,
            points: request.points,
            occurrence_type: request.occurrence_type,
            occurrence_data: request.occurrence_data,
        })
        .await?;

    let instances: Arc<dyn ChoreInstanceStore> =
        Arc::new(ChoreInstanceRepository::new(state.pool.clone()));
    let generator = InstanceGenerator::new(chores, instances, state.calendar.clone());
    let summary = generator.generate_initial(&chore).await;
    record_instances_generated(summary.created);

    info!(
        chore_id = %chore.id,
        family_id = %chore.family_id,
        assignee_id = %chore.assignee_id,
        instances_created = summary.created,
        "Chore created"
    );

    Ok((StatusCode::CREATED, Json(chore.into())))
}

/// List chores for the caller's family.
///
/// GET /api/v1/chores?assigneeId=<uuid>
pub async fn list_chores(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Query(query): Query<ListChoresQuery>,
) -> Result<Json<ListChoresResponse>, ApiError> {
    let chore_repo: Arc<dyn ChoreStore> = Arc::new(ChoreRepository::new(state.pool.clone()));
    let items = match query.assignee_id {
        Some(assignee_id) => chore_repo.list_by_assignee(assignee_id, auth.family_id).await?,
        None => chore_repo.list_by_family(auth.family_id).await?,
    };

    let chores: Vec<ChoreResponse> = items.into_iter().map(Into::into).collect();
    let total = chores.len();

    Ok(Json(ListChoresResponse { chores, total }))
}

/// Get a single chore by ID.
///
/// GET /api/v1/chores/:chore_id
pub async fn get_chore(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Path(chore_id): Path<Uuid>,
) -> Result<Json<ChoreResponse>, ApiError> {
    let chore_repo: Arc<dyn ChoreStore> = Arc::new(ChoreRepository::new(state.pool.clone()));
    let chore = chore_repo.find_by_id(chore_id, auth.family_id).await?;

    Ok(Json(chore.into()))
}

/// Update a chore (partial update).
///
/// PATCH /api/v1/chores/:chore_id
pub async fn update_chore(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Path(chore_id): Path<Uuid>,
    Json(request): Json<UpdateChoreRequest>,
) -> Result<Json<ChoreResponse>, ApiError> {
    request.validate()?;

    let chore_repo: Arc<dyn ChoreStore> = Arc::new(ChoreRepository::new(state.pool.clone()));
    let mut chore = chore_repo.find_by_id(chore_id, auth.family_id).await?;

    if let Some(name) = request.name {
        chore.name = name;
    }
    if let Some(description) = request.description {
        chore.description = Some(description);
    }
    if let Some(assignee_id) = request.assignee_id {
        chore.assignee_id = assignee_id;
    }
    if let Some(points) = request.points {
        chore.points = points;
    }
    if let Some(occurrence_type) = request.occurrence_type {
        chore.occurrence_type = occurrence_type;
    }
    if let Some(occurrence_data) = request.occurrence_data {
        chore.occurrence_data = occurrence_data;
    }

    let chore = chore_repo.update(&chore).await?;

    info!(chore_id = %chore.id, "Chore updated");

    Ok(Json(chore.into()))
}

/// Delete a chore and all of its instances.
///
/// Calendar events of the instances are removed best-effort before the
/// storage-level cascade drops the rows.
///
/// DELETE /api/v1/chores/:chore_id
pub async fn delete_chore(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Path(chore_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let chore_repo: Arc<dyn ChoreStore> = Arc::new(ChoreRepository::new(state.pool.clone()));
    let instance_repo: Arc<dyn ChoreInstanceStore> =
        Arc::new(ChoreInstanceRepository::new(state.pool.clone()));

    // Collect instance ids before the cascade removes the rows
    let instances = instance_repo.list_by_chore(chore_id, auth.family_id).await?;

    chore_repo.delete(chore_id, auth.family_id).await?;

    for instance in &instances {
        let result = state
            .calendar
            .delete_event(SOURCE_MODULE_CHORES, instance.id)
            .await;
        if let CalendarResult::Failed(reason) = result {
            warn!(
                instance_id = %instance.id,
                reason = %reason,
                "Failed to delete calendar event for chore instance"
            );
        }
    }

    info!(
        chore_id = %chore_id,
        instances_removed = instances.len(),
        "Chore deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// List the instances of one chore.
///
/// GET /api/v1/chores/:chore_id/instances
pub async fn list_chore_instances(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Path(chore_id): Path<Uuid>,
) -> Result<Json<ListInstancesResponse>, ApiError> {
    let chore_repo: Arc<dyn ChoreStore> = Arc::new(ChoreRepository::new(state.pool.clone()));
    // 404 for a chore outside the caller's family
    chore_repo.find_by_id(chore_id, auth.family_id).await?;

    let instance_repo: Arc<dyn ChoreInstanceStore> =
        Arc::new(ChoreInstanceRepository::new(state.pool.clone()));
    let items = instance_repo.list_by_chore(chore_id, auth.family_id).await?;

    let instances: Vec<ChoreInstanceResponse> = items.into_iter().map(Into::into).collect();
    let total = instances.len();

    Ok(Json(ListInstancesResponse { instances, total }))
}

/// Completion statistics for a family member over a date range.
///
/// Defaults to the caller when no assignee is given.
///
/// GET /api/v1/chores/stats?assigneeId=<uuid>&startDate=<date>&endDate=<date>
pub async fn get_stats(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ChoreStats>, ApiError> {
    if query.end_date < query.start_date {
        return Err(ApiError::Validation(
            "endDate must not precede startDate".to_string(),
        ));
    }
    let assignee_id = query.assignee_id.unwrap_or(auth.user_id);

    let chore_repo: Arc<dyn ChoreStore> = Arc::new(ChoreRepository::new(state.pool.clone()));
    let instance_repo: Arc<dyn ChoreInstanceStore> =
        Arc::new(ChoreInstanceRepository::new(state.pool.clone()));
    let stats_service = StatsService::new(chore_repo, instance_repo);

    let stats = stats_service
        .stats_for_assignee(assignee_id, auth.family_id, query.start_date, query.end_date)
        .await?;

    Ok(Json(stats))
}

/// Run daily instance generation for the caller's family.
///
/// Administrative trigger mirroring the scheduled daily job; parent only.
///
/// POST /api/v1/chores/generate
pub async fn generate_instances(
    State(state): State<AppState>,
    auth: FamilyAuth,
) -> Result<Json<GenerationSummary>, ApiError> {
    auth.require_parent()?;

    let chores: Arc<dyn ChoreStore> = Arc::new(ChoreRepository::new(state.pool.clone()));
    let instances: Arc<dyn ChoreInstanceStore> =
        Arc::new(ChoreInstanceRepository::new(state.pool.clone()));
    let generator = InstanceGenerator::new(chores, instances, state.calendar.clone());

    let summary = generator.generate_daily(auth.family_id).await?;
    record_instances_generated(summary.created);

    info!(
        family_id = %auth.family_id,
        created = summary.created,
        skipped = summary.skipped,
        failed = summary.failed,
        "Daily generation triggered"
    );

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::chore::OccurrenceType;

    #[test]
    fn test_create_chore_request_deserialization() {
        let json = r#"{
            "name": "Take out trash",
            "assigneeId": "550e8400-e29b-41d4-a716-446655440000",
            "points": 5,
            "occurrenceType": "weekly",
            "occurrenceData": {
                "startDate": "2024-03-04",
                "daysOfWeek": ["monday", "thursday"]
            }
        }"#;

        let request: CreateChoreRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Take out trash");
        assert_eq!(request.points, 5);
        assert_eq!(request.occurrence_type, OccurrenceType::Weekly);
        assert_eq!(request.occurrence_data.days_of_week.len(), 2);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_chore_request_partial() {
        let json = r#"{"name": "Feed the cat"}"#;

        let request: UpdateChoreRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, Some("Feed the cat".to_string()));
        assert!(request.points.is_none());
        assert!(request.occurrence_data.is_none());
    }

    #[test]
    fn test_generation_summary_serialization() {
        let summary = GenerationSummary {
            created: 3,
            skipped: 1,
            failed: 0,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, "{\"created\":3,\"skipped\":1,\"failed\":0}");
    }

    #[test]
    fn test_stats_query_deserialization() {
        let query: StatsQuery = serde_json::from_str(
            r#"{"startDate": "2024-03-01", "endDate": "2024-03-31"}"#,
        )
        .unwrap();
        assert!(query.assignee_id.is_none());
        assert!(query.start_date < query.end_date);
    }
}
