//! Background jobs for scheduled maintenance tasks.

pub mod daily_generation;
pub mod pool_metrics;
pub mod scheduler;

pub use daily_generation::DailyGenerationJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
