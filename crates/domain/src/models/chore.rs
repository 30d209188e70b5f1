//! Chore domain model and recurrence rule types.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Recurrence pattern of a chore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceType {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl OccurrenceType {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrenceType::Daily => "daily",
            OccurrenceType::Weekly => "weekly",
            OccurrenceType::Monthly => "monthly",
            OccurrenceType::Custom => "custom",
        }
    }

    /// Parses from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(OccurrenceType::Daily),
            "weekly" => Some(OccurrenceType::Weekly),
            "monthly" => Some(OccurrenceType::Monthly),
            "custom" => Some(OccurrenceType::Custom),
            _ => None,
        }
    }
}

impl std::fmt::Display for OccurrenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week for weekly recurrence rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Maps a calendar weekday onto the recurrence day type.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Unit for custom recurrence intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
}

/// Recurrence rule data attached to a chore.
///
/// Which fields are meaningful depends on the occurrence type: weekly rules
/// read `days_of_week`, monthly rules read `days_of_month`, custom rules read
/// `interval` and `interval_unit`. Extra fields are ignored by evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceData {
    pub start_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub days_of_week: Vec<DayOfWeek>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_days_of_month"))]
    pub days_of_month: Vec<i16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Interval must be a positive integer"))]
    pub interval: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_unit: Option<IntervalUnit>,
}

impl OccurrenceData {
    /// Rule that recurs every day from `start_date` with no end.
    pub fn daily(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            days_of_week: Vec::new(),
            days_of_month: Vec::new(),
            interval: None,
            interval_unit: None,
        }
    }
}

/// Represents a recurring chore owned by a family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: Uuid,
    pub family_id: Uuid,
    pub creator_id: Uuid,
    pub assignee_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub points: i32,
    pub occurrence_type: OccurrenceType,
    pub occurrence_data: OccurrenceData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a chore.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoreRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub assignee_id: Uuid,

    #[validate(range(min = 0, message = "Points must be non-negative"))]
    #[serde(default)]
    pub points: i32,

    pub occurrence_type: OccurrenceType,

    #[validate(nested)]
    pub occurrence_data: OccurrenceData,
}

/// Request payload for updating a chore (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChoreRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub assignee_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Points must be non-negative"))]
    pub points: Option<i32>,

    pub occurrence_type: Option<OccurrenceType>,

    #[validate(nested)]
    pub occurrence_data: Option<OccurrenceData>,
}

/// Response payload for chore operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreResponse {
    pub id: Uuid,
    pub family_id: Uuid,
    pub creator_id: Uuid,
    pub assignee_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub points: i32,
    pub occurrence_type: OccurrenceType,
    pub occurrence_data: OccurrenceData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Chore> for ChoreResponse {
    fn from(c: Chore) -> Self {
        Self {
            id: c.id,
            family_id: c.family_id,
            creator_id: c.creator_id,
            assignee_id: c.assignee_id,
            name: c.name,
            description: c.description,
            points: c.points,
            occurrence_type: c.occurrence_type,
            occurrence_data: c.occurrence_data,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Response for listing chores.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChoresResponse {
    pub chores: Vec<ChoreResponse>,
    pub total: usize,
}

/// Query parameters for listing chores.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChoresQuery {
    pub assignee_id: Option<Uuid>,
}
