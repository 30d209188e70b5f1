//! Chore entity (database row mapping).

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::chore::{Chore, OccurrenceData, OccurrenceType};

/// Database enum for occurrence_type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "occurrence_type", rename_all = "lowercase")]
pub enum OccurrenceTypeDb {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl From<OccurrenceTypeDb> for OccurrenceType {
    fn from(db: OccurrenceTypeDb) -> Self {
        match db {
            OccurrenceTypeDb::Daily => Self::Daily,
            OccurrenceTypeDb::Weekly => Self::Weekly,
            OccurrenceTypeDb::Monthly => Self::Monthly,
            OccurrenceTypeDb::Custom => Self::Custom,
        }
    }
}

impl From<OccurrenceType> for OccurrenceTypeDb {
    fn from(domain: OccurrenceType) -> Self {
        match domain {
            OccurrenceType::Daily => Self::Daily,
            OccurrenceType::Weekly => Self::Weekly,
            OccurrenceType::Monthly => Self::Monthly,
            OccurrenceType::Custom => Self::Custom,
        }
    }
}

/// Database row mapping for the chores table.
#[derive(Debug, Clone, FromRow)]
pub struct ChoreEntity {
    pub id: Uuid,
    pub family_id: Uuid,
    pub creator_id: Uuid,
    pub assignee_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub points: i32,
    pub occurrence_type: OccurrenceTypeDb,
    pub occurrence_data: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ChoreEntity> for Chore {
    type Error = serde_json::Error;

    /// Fails when the stored occurrence_data JSON does not decode; a row
    /// like that must not silently become an always-due rule.
    fn try_from(entity: ChoreEntity) -> Result<Self, Self::Error> {
        let occurrence_data: OccurrenceData = serde_json::from_value(entity.occurrence_data)?;
        Ok(Self {
            id: entity.id,
            family_id: entity.family_id,
            creator_id: entity.creator_id,
            assignee_id: entity.assignee_id,
            name: entity.name,
            description: entity.description,
            points: entity.points,
            occurrence_type: entity.occurrence_type.into(),
            occurrence_data,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}
