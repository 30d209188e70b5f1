//! Metrics for the persistence layer.
//!
//! Every repository query is timed into the
//! `database_query_duration_seconds` histogram, tagged with a static query
//! name. Pool gauges are sampled periodically by a background job in the
//! api crate.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Samples the connection pool into gauges.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("database_connections_active").set(active as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times a single query.
///
/// Construction starts the clock; [`QueryTimer::record`] stops it and
/// emits the sample. A timer that is dropped without `record` emits
/// nothing, so error paths simply fall through.
///
/// ```ignore
/// let timer = QueryTimer::new("find_chore_by_id");
/// let result = sqlx::query_as::<_, ChoreEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    started: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            started: Instant::now(),
        }
    }

    /// Records the elapsed time under this timer's query name.
    pub fn record(self) {
        histogram!(
            "database_query_duration_seconds",
            "query" => self.query_name
        )
        .record(self.started.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_tracks_name() {
        let timer = QueryTimer::new("list_chores_by_family");
        assert_eq!(timer.query_name, "list_chores_by_family");
    }

    #[test]
    fn test_query_timer_clock_advances() {
        let timer = QueryTimer::new("insert_chore");
        assert!(timer.started.elapsed().as_secs() < 60);
    }
}
