//! Announcement entry models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notice_board_core::{Deadline, EntryId, NonEmptyText};

/// A stored announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique entry ID.
    pub id: EntryId,
    /// Short headline.
    pub title: String,
    /// Display deadline, e.g. `2024年01月31日`.
    pub deadline: Deadline,
    /// Announcement text.
    pub body: String,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating an entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub title: NonEmptyText,
    pub deadline: Deadline,
    pub body: NonEmptyText,
}
