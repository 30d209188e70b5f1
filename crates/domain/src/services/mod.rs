//! Domain services for Family Hub.
//!
//! Services contain business logic that operates on domain models.

pub mod calendar;
pub mod lifecycle;
pub mod memory;
pub mod occurrence;
pub mod scheduling;
pub mod stats;
pub mod store;

pub use calendar::{
    CalendarEvent, CalendarEventUpdate, CalendarResult, CalendarService, MockCalendarService,
    NoopCalendarService, SOURCE_MODULE_CHORES,
};

pub use lifecycle::{InstanceLifecycle, LifecycleError};

pub use memory::{InMemoryChoreInstanceStore, InMemoryChoreStore};

pub use occurrence::{generation_window, is_due};

pub use scheduling::{GenerationSummary, InstanceGenerator};

pub use stats::{compute_stats, StatsService};

pub use store::{ChoreInstanceStore, ChoreStore, NewChore, NewChoreInstance, StoreError};
