//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod chore;
pub mod chore_instance;

pub use chore::{ChoreEntity, OccurrenceTypeDb};
pub use chore_instance::{ChoreInstanceEntity, InstanceStatusDb};
