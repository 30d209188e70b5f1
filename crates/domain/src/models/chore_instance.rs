//! Chore instance domain models for the completion workflow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Status of a chore instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Pending,
    Completed,
    Verified,
    Rejected,
    Missed,
}

impl InstanceStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Pending => "pending",
            InstanceStatus::Completed => "completed",
            InstanceStatus::Verified => "verified",
            InstanceStatus::Rejected => "rejected",
            InstanceStatus::Missed => "missed",
        }
    }

    /// Parses from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InstanceStatus::Pending),
            "completed" => Some(InstanceStatus::Completed),
            "verified" => Some(InstanceStatus::Verified),
            "rejected" => Some(InstanceStatus::Rejected),
            "missed" => Some(InstanceStatus::Missed),
            _ => None,
        }
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dated occurrence of a chore assigned to a family member.
///
/// The assignee is denormalized from the chore at generation time, so
/// reassigning a chore affects future instances only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreInstance {
    pub id: Uuid,
    pub chore_id: Uuid,
    pub family_id: Uuid,
    pub assignee_id: Uuid,
    pub due_date: NaiveDate,
    pub status: InstanceStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub verified_by: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for completing a chore instance.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInstanceRequest {
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Request payload for verifying a completed chore instance.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyInstanceRequest {
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Response payload for chore instance operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreInstanceResponse {
    pub id: Uuid,
    pub chore_id: Uuid,
    pub family_id: Uuid,
    pub assignee_id: Uuid,
    pub due_date: NaiveDate,
    pub status: InstanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChoreInstance> for ChoreInstanceResponse {
    fn from(i: ChoreInstance) -> Self {
        Self {
            id: i.id,
            chore_id: i.chore_id,
            family_id: i.family_id,
            assignee_id: i.assignee_id,
            due_date: i.due_date,
            status: i.status,
            completed_at: i.completed_at,
            verified_by: i.verified_by,
            notes: i.notes,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

/// Response for listing chore instances.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInstancesResponse {
    pub instances: Vec<ChoreInstanceResponse>,
    pub total: usize,
}

/// Query parameters for listing chore instances.
///
/// Either `due_date` alone or the assignee/date-range combination is
/// expected; the handler rejects other shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInstancesQuery {
    pub due_date: Option<NaiveDate>,
    pub assignee_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_status_serialization() {
        assert_eq!(serde_json::to_string(&InstanceStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&InstanceStatus::Completed).unwrap(), "\"completed\"");
        assert_eq!(serde_json::to_string(&InstanceStatus::Verified).unwrap(), "\"verified\"");
        assert_eq!(serde_json::to_string(&InstanceStatus::Rejected).unwrap(), "\"rejected\"");
        assert_eq!(serde_json::to_string(&InstanceStatus::Missed).unwrap(), "\"missed\"");
    }

    #[test]
    fn test_instance_status_from_str() {
        assert_eq!(InstanceStatus::from_str("pending"), Some(InstanceStatus::Pending));
        assert_eq!(InstanceStatus::from_str("verified"), Some(InstanceStatus::Verified));
        assert_eq!(InstanceStatus::from_str("done"), None);
    }

    #[test]
    fn test_instance_status_display() {
        assert_eq!(InstanceStatus::Completed.to_string(), "completed");
        assert_eq!(InstanceStatus::Missed.to_string(), "missed");
    }

    #[test]
    fn test_complete_request_notes_length() {
        let request = CompleteInstanceRequest { notes: Some("a".repeat(501)) };
        assert!(request.validate().is_err());

        let request = CompleteInstanceRequest { notes: Some("done before dinner".into()) };
        assert!(request.validate().is_ok());

        let request = CompleteInstanceRequest { notes: None };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_list_instances_query_deserialization() {
        let query: ListInstancesQuery =
            serde_json::from_str(r#"{"dueDate": "2024-03-15"}"#).unwrap();
        assert_eq!(query.due_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(query.assignee_id.is_none());
    }
}
