//! HTTP route handlers.

pub mod chore_instances;
pub mod chores;
pub mod health;
