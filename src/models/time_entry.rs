use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One employee's daily punch sequence.
///
/// `date` is a free-form grouping tag and is never derived from, or checked
/// against, the four timestamps. The punch order is not validated either:
/// an `exit_time` earlier than `entry_time` is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Assigned by the store on insert when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(alias = "Date")]
    pub date: String,
    pub entry_time: DateTime<FixedOffset>, // ⇔ time_entries.entry_time (RFC 3339)
    pub lunch_exit_time: DateTime<FixedOffset>,
    pub lunch_entry_time: DateTime<FixedOffset>,
    pub exit_time: DateTime<FixedOffset>,
}

impl TimeEntry {
    /// Build an entry without an id; the store generates one on insert.
    pub fn new(
        date: impl Into<String>,
        entry_time: DateTime<FixedOffset>,
        lunch_exit_time: DateTime<FixedOffset>,
        lunch_entry_time: DateTime<FixedOffset>,
        exit_time: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: None,
            date: date.into(),
            entry_time,
            lunch_exit_time,
            lunch_entry_time,
            exit_time,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Assign a random v4 id when none is set; an existing id is kept.
    pub fn ensure_id(&mut self) -> Uuid {
        *self.id.get_or_insert_with(Uuid::new_v4)
    }

    pub fn id_str(&self) -> String {
        self.id.map(|id| id.to_string()).unwrap_or_default()
    }
}
