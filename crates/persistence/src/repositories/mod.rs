//! Repository implementations for database operations.
//!
//! Repositories implement the domain store traits on top of Postgres.

pub mod chore;
pub mod chore_instance;

pub use chore::ChoreRepository;
pub use chore_instance::ChoreInstanceRepository;

use domain::services::store::StoreError;

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Maps a sqlx error onto the domain store error, tagging it with the
/// record that was being accessed.
fn map_store_error(context: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound(context.to_string()),
        other => {
            if let Some(db_err) = other.as_database_error() {
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                    return StoreError::Conflict(context.to_string());
                }
            }
            StoreError::Backend(other.to_string())
        }
    }
}
