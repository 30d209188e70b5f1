//! Chore instance entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::chore_instance::{ChoreInstance, InstanceStatus};

/// Database enum for chore_instance_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "chore_instance_status", rename_all = "lowercase")]
pub enum InstanceStatusDb {
    Pending,
    Completed,
    Verified,
    Rejected,
    Missed,
}

impl From<InstanceStatusDb> for InstanceStatus {
    fn from(db: InstanceStatusDb) -> Self {
        match db {
            InstanceStatusDb::Pending => Self::Pending,
            InstanceStatusDb::Completed => Self::Completed,
            InstanceStatusDb::Verified => Self::Verified,
            InstanceStatusDb::Rejected => Self::Rejected,
            InstanceStatusDb::Missed => Self::Missed,
        }
    }
}

impl From<InstanceStatus> for InstanceStatusDb {
    fn from(domain: InstanceStatus) -> Self {
        match domain {
            InstanceStatus::Pending => Self::Pending,
            InstanceStatus::Completed => Self::Completed,
            InstanceStatus::Verified => Self::Verified,
            InstanceStatus::Rejected => Self::Rejected,
            InstanceStatus::Missed => Self::Missed,
        }
    }
}

/// Database row mapping for the chore_instances table.
#[derive(Debug, Clone, FromRow)]
pub struct ChoreInstanceEntity {
    pub id: Uuid,
    pub chore_id: Uuid,
    pub family_id: Uuid,
    pub assignee_id: Uuid,
    pub due_date: NaiveDate,
    pub status: InstanceStatusDb,
    pub completed_at: Option<DateTime<Utc>>,
    pub verified_by: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChoreInstanceEntity> for ChoreInstance {
    fn from(entity: ChoreInstanceEntity) -> Self {
        Self {
            id: entity.id,
            chore_id: entity.chore_id,
            family_id: entity.family_id,
            assignee_id: entity.assignee_id,
            due_date: entity.due_date,
            status: entity.status.into(),
            completed_at: entity.completed_at,
            verified_by: entity.verified_by,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_instance_entity() -> ChoreInstanceEntity {
        ChoreInstanceEntity {
            id: Uuid::new_v4(),
            chore_id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            assignee_id: Uuid::new_v4(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            status: InstanceStatusDb::Pending,
            completed_at: None,
            verified_by: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_instance_entity_to_domain() {
        let entity = create_test_instance_entity();
        let instance: ChoreInstance = entity.clone().into();

        assert_eq!(instance.id, entity.id);
        assert_eq!(instance.chore_id, entity.chore_id);
        assert_eq!(instance.due_date, entity.due_date);
        assert_eq!(instance.status, InstanceStatus::Pending);
        assert!(instance.completed_at.is_none());
    }

    #[test]
    fn test_status_conversions_round_trip() {
        for status in [
            InstanceStatus::Pending,
            InstanceStatus::Completed,
            InstanceStatus::Verified,
            InstanceStatus::Rejected,
            InstanceStatus::Missed,
        ] {
            let db: InstanceStatusDb = status.into();
            assert_eq!(InstanceStatus::from(db), status);
        }
    }
}
