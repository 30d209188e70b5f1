//! Domain layer for Family Hub backend.
//!
//! This crate contains:
//! - Domain models (Chore, ChoreInstance, ChoreStats)
//! - Business logic services (occurrence rules, instance generation, lifecycle)
//! - Domain error types

pub mod models;
pub mod services;
