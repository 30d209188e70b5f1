//! Domain models for Family Hub.

pub mod chore;
pub mod chore_instance;
pub mod chore_stats;
pub mod family;

pub use chore::{Chore, DayOfWeek, IntervalUnit, OccurrenceData, OccurrenceType};
pub use chore_instance::{ChoreInstance, InstanceStatus};
pub use chore_stats::ChoreStats;
pub use family::FamilyRole;
