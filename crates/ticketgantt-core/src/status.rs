//! Ticket status schema
//!
//! Statuses are open string keys (`notStarted`, `inProgress`, ...). The display
//! label of a key and whether it closes the ticket come from a `StatusTable`
//! injected at construction time. Two schemas are shipped:
//!
//! | Schema        | Keys                                              |
//! |---------------|---------------------------------------------------|
//! | `three_state` | notStarted, inProgress, completed                 |
//! | `four_state`  | notStarted, inProgress, processed, completed      |
//!
//! # Example
//!
//! ```rust
//! use ticketgantt_core::{StatusTable, TicketStatus};
//!
//! let table = StatusTable::four_state();
//! assert_eq!(table.label(&TicketStatus::new("processed")), "Processed");
//! assert_eq!(table.key_for_label("Completed"), TicketStatus::new("completed"));
//! assert!(table.is_completed(&TicketStatus::new("completed")));
//! ```

use serde::{Deserialize, Serialize};

/// Key of the initial status in both shipped schemas
pub const NOT_STARTED: &str = "notStarted";
pub const IN_PROGRESS: &str = "inProgress";
pub const PROCESSED: &str = "processed";
pub const COMPLETED: &str = "completed";

/// Status key of a ticket
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketStatus(String);

impl TicketStatus {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn not_started() -> Self {
        Self::new(NOT_STARTED)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::not_started()
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketStatus {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for TicketStatus {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// One row of the status table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDef {
    pub key: TicketStatus,
    pub label: String,
    /// Closes the ticket (never overdue)
    #[serde(default)]
    pub terminal: bool,
}

impl StatusDef {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: TicketStatus::new(key),
            label: label.into(),
            terminal: false,
        }
    }

    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }
}

/// Ordered mapping between status keys and display labels
///
/// The first entry is the initial status given to new tickets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTable {
    entries: Vec<StatusDef>,
}

impl StatusTable {
    /// Build a table from explicit entries; an empty list yields the four-state schema
    pub fn new(entries: Vec<StatusDef>) -> Self {
        if entries.is_empty() {
            return Self::four_state();
        }
        Self { entries }
    }

    pub fn three_state() -> Self {
        Self {
            entries: vec![
                StatusDef::new(NOT_STARTED, "Not Started"),
                StatusDef::new(IN_PROGRESS, "In Progress"),
                StatusDef::new(COMPLETED, "Completed").terminal(),
            ],
        }
    }

    pub fn four_state() -> Self {
        Self {
            entries: vec![
                StatusDef::new(NOT_STARTED, "Not Started"),
                StatusDef::new(IN_PROGRESS, "In Progress"),
                StatusDef::new(PROCESSED, "Processed"),
                StatusDef::new(COMPLETED, "Completed").terminal(),
            ],
        }
    }

    pub fn entries(&self) -> &[StatusDef] {
        &self.entries
    }

    /// Status given to newly created tickets
    pub fn initial(&self) -> TicketStatus {
        self.entries
            .first()
            .map(|e| e.key.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, status: &TicketStatus) -> bool {
        self.entries.iter().any(|e| &e.key == status)
    }

    /// Display label; unknown keys render as the initial status label
    pub fn label(&self, status: &TicketStatus) -> &str {
        self.entries
            .iter()
            .find(|e| &e.key == status)
            .or_else(|| self.entries.first())
            .map_or("", |e| e.label.as_str())
    }

    /// Key for a display label (or key); unknown labels map to the initial status
    pub fn key_for_label(&self, label: &str) -> TicketStatus {
        let label = label.trim();
        self.entries
            .iter()
            .find(|e| e.label == label || e.key.as_str() == label)
            .map(|e| e.key.clone())
            .unwrap_or_else(|| self.initial())
    }

    /// Strict lookup, `None` for labels outside the schema
    pub fn parse(&self, label: &str) -> Option<TicketStatus> {
        let label = label.trim();
        self.entries
            .iter()
            .find(|e| e.label.eq_ignore_ascii_case(label) || e.key.as_str() == label)
            .map(|e| e.key.clone())
    }

    pub fn is_completed(&self, status: &TicketStatus) -> bool {
        self.entries.iter().any(|e| &e.key == status && e.terminal)
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::four_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_state_has_no_processed() {
        let table = StatusTable::three_state();
        assert!(!table.contains(&TicketStatus::new(PROCESSED)));
        assert_eq!(table.entries().len(), 3);
    }

    #[test]
    fn unknown_status_renders_initial_label() {
        let table = StatusTable::three_state();
        assert_eq!(table.label(&TicketStatus::new("archived")), "Not Started");
    }

    #[test]
    fn key_for_label_accepts_keys_and_falls_back() {
        let table = StatusTable::four_state();
        assert_eq!(table.key_for_label("inProgress"), TicketStatus::new(IN_PROGRESS));
        assert_eq!(table.key_for_label(" In Progress "), TicketStatus::new(IN_PROGRESS));
        assert_eq!(table.key_for_label("???"), TicketStatus::not_started());
    }

    #[test]
    fn parse_is_strict_and_case_insensitive() {
        let table = StatusTable::four_state();
        assert_eq!(table.parse("processed"), Some(TicketStatus::new(PROCESSED)));
        assert_eq!(table.parse("COMPLETED"), Some(TicketStatus::new(COMPLETED)));
        assert_eq!(table.parse("done"), None);
    }

    #[test]
    fn only_terminal_status_is_completed() {
        let table = StatusTable::four_state();
        assert!(table.is_completed(&TicketStatus::new(COMPLETED)));
        assert!(!table.is_completed(&TicketStatus::new(PROCESSED)));
        assert!(!table.is_completed(&TicketStatus::new("archived")));
    }

    #[test]
    fn empty_table_falls_back_to_four_state() {
        assert_eq!(StatusTable::new(Vec::new()), StatusTable::four_state());
        assert_eq!(StatusTable::new(Vec::new()).initial(), TicketStatus::not_started());
    }
}
