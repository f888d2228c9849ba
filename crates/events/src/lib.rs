//! Domain events and the activity log they feed.

pub mod activity;
pub mod event;

pub use activity::{
    ACTIVITY_LOG_CAP, ActivityKind, ActivityLog, ActivityLogEntry, ActivityNote, ActivitySource,
};
pub use event::Event;
