//! Chore instance endpoint handlers.
//!
//! Instances move through a lifecycle: pending, completed by the assignee,
//! then verified by a parent. Listing supports a daily-board view (one due
//! date) and a per-member date-range view.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use persistence::repositories::ChoreInstanceRepository;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::FamilyAuth;
use crate::middleware::{record_instance_completed, record_instance_verified};
use domain::models::chore_instance::{
    ChoreInstanceResponse, CompleteInstanceRequest, ListInstancesQuery, ListInstancesResponse,
    VerifyInstanceRequest,
};
use domain::services::{ChoreInstanceStore, InstanceLifecycle};

/// List chore instances for the caller's family.
///
/// Accepts either `dueDate` alone, or `assigneeId` with `startDate` and
/// `endDate`. Other parameter combinations are rejected.
///
/// GET /api/v1/chore-instances
pub async fn list_instances(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Query(query): Query<ListInstancesQuery>,
) -> Result<Json<ListInstancesResponse>, ApiError> {
    let instance_repo: Arc<dyn ChoreInstanceStore> =
        Arc::new(ChoreInstanceRepository::new(state.pool.clone()));

    let items = match (query.due_date, query.assignee_id, query.start_date, query.end_date) {
        (Some(due_date), None, None, None) => {
            instance_repo.list_by_due_date(auth.family_id, due_date).await?
        }
        (None, Some(assignee_id), Some(start_date), Some(end_date)) => {
            if end_date < start_date {
                return Err(ApiError::Validation(
                    "endDate must not precede startDate".to_string(),
                ));
            }
            instance_repo
                .list_by_assignee(assignee_id, auth.family_id, start_date, end_date)
                .await?
        }
        _ => {
            return Err(ApiError::Validation(
                "Provide either dueDate, or assigneeId with startDate and endDate".to_string(),
            ));
        }
    };

    let instances: Vec<ChoreInstanceResponse> = items.into_iter().map(Into::into).collect();
    let total = instances.len();

    Ok(Json(ListInstancesResponse { instances, total }))
}

/// Get a single chore instance by ID.
///
/// GET /api/v1/chore-instances/:instance_id
pub async fn get_instance(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Path(instance_id): Path<Uuid>,
) -> Result<Json<ChoreInstanceResponse>, ApiError> {
    let instance_repo: Arc<dyn ChoreInstanceStore> =
        Arc::new(ChoreInstanceRepository::new(state.pool.clone()));
    let instance = instance_repo.find_by_id(instance_id, auth.family_id).await?;

    Ok(Json(instance.into()))
}

/// Mark a pending instance as completed.
///
/// Only the assignee may complete their own instance.
///
/// POST /api/v1/chore-instances/:instance_id/complete
pub async fn complete_instance(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Path(instance_id): Path<Uuid>,
    Json(request): Json<CompleteInstanceRequest>,
) -> Result<Json<ChoreInstanceResponse>, ApiError> {
    request.validate()?;

    let instance_repo: Arc<dyn ChoreInstanceStore> =
        Arc::new(ChoreInstanceRepository::new(state.pool.clone()));
    let lifecycle = InstanceLifecycle::new(instance_repo, state.calendar.clone());

    let instance = lifecycle
        .complete(instance_id, auth.family_id, auth.user_id, request.notes)
        .await?;
    record_instance_completed();

    info!(
        instance_id = %instance.id,
        chore_id = %instance.chore_id,
        "Chore instance completed"
    );

    Ok(Json(instance.into()))
}

/// Verify a completed instance; parent only.
///
/// POST /api/v1/chore-instances/:instance_id/verify
pub async fn verify_instance(
    State(state): State<AppState>,
    auth: FamilyAuth,
    Path(instance_id): Path<Uuid>,
    Json(request): Json<VerifyInstanceRequest>,
) -> Result<Json<ChoreInstanceResponse>, ApiError> {
    auth.require_parent()?;
    request.validate()?;

    let instance_repo: Arc<dyn ChoreInstanceStore> =
        Arc::new(ChoreInstanceRepository::new(state.pool.clone()));
    let lifecycle = InstanceLifecycle::new(instance_repo, state.calendar.clone());

    let instance = lifecycle
        .verify(instance_id, auth.family_id, auth.user_id, request.notes)
        .await?;
    record_instance_verified();

    info!(
        instance_id = %instance.id,
        chore_id = %instance.chore_id,
        verified_by = %auth.user_id,
        "Chore instance verified"
    );

    Ok(Json(instance.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use domain::models::chore_instance::InstanceStatus;

    #[test]
    fn test_complete_request_deserialization() {
        let request: CompleteInstanceRequest =
            serde_json::from_str(r#"{"notes": "done after school"}"#).unwrap();
        assert_eq!(request.notes, Some("done after school".to_string()));

        let request: CompleteInstanceRequest = serde_json::from_str("{}").unwrap();
        assert!(request.notes.is_none());
    }

    #[test]
    fn test_instance_response_serialization() {
        let response = ChoreInstanceResponse {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            chore_id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            assignee_id: Uuid::new_v4(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: InstanceStatus::Pending,
            completed_at: None,
            verified_by: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("550e8400-e29b-41d4-a716-446655440000"));
        assert!(json.contains("\"status\":\"pending\""));
        assert!(json.contains("\"dueDate\":\"2024-03-15\""));
        assert!(!json.contains("completedAt"));
    }

    #[test]
    fn test_list_instances_query_date_range_shape() {
        let query: ListInstancesQuery = serde_json::from_str(
            r#"{
                "assigneeId": "550e8400-e29b-41d4-a716-446655440000",
                "startDate": "2024-03-01",
                "endDate": "2024-03-31"
            }"#,
        )
        .unwrap();
        assert!(query.due_date.is_none());
        assert!(query.assignee_id.is_some());
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2024, 3, 31));
    }
}
