//! Activity log: bounded, most-recent-first record of notable domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use retaildesk_core::{LogEntryId, RecentList};

use crate::event::Event;

/// Number of entries the activity log retains.
pub const ACTIVITY_LOG_CAP: usize = 40;

/// Category of an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Inventory,
    Invoice,
    Alert,
    System,
}

/// Message + category, before it is stamped into the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityNote {
    pub kind: ActivityKind,
    pub message: String,
}

impl ActivityNote {
    pub fn new(kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Events that leave a trace in the activity log.
pub trait ActivitySource: Event {
    /// Notes to record for this event, in recording order.
    fn activity(&self) -> Vec<ActivityNote>;
}

/// One recorded entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: LogEntryId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
}

/// Append-only log capped at [`ACTIVITY_LOG_CAP`] entries (oldest evicted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: RecentList<ActivityLogEntry>,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(ACTIVITY_LOG_CAP)
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RecentList::with_capacity(capacity),
        }
    }

    /// Stamp a note and prepend it.
    pub fn record(&mut self, note: ActivityNote, at: DateTime<Utc>) {
        tracing::debug!(kind = ?note.kind, message = %note.message, "activity recorded");
        self.entries.push_front(ActivityLogEntry {
            id: LogEntryId::new(),
            message: note.message,
            timestamp: at,
            kind: note.kind,
        });
    }

    /// Record every note an event produces, stamped with its business time.
    pub fn record_event<E: ActivitySource>(&mut self, event: &E) {
        let at = event.occurred_at();
        tracing::debug!(
            event_type = event.event_type(),
            version = event.version(),
            "recording event"
        );
        for note in event.activity() {
            self.record(note, at);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&ActivityLogEntry> {
        self.entries.latest()
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &ActivityLogEntry> {
        self.entries.iter()
    }

    pub fn of_kind(&self, kind: ActivityKind) -> impl Iterator<Item = &ActivityLogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}
