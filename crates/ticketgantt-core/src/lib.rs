//! # ticketgantt-core
//!
//! Core domain model and traits for the ticketgantt engine.
//!
//! This crate provides:
//! - Domain types: `Ticket`, `Template`, `TicketStatus`, `ColorSettings`
//! - Derived computations: id allocation, date windows, ticket ordering
//! - Collaborator traits: `TicketSource`, `RosterSource`, `TemplateSource`,
//!   `SettingsSource`, `HolidaySource`, `IdSpace`, `TicketStore`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ticketgantt_core::{IdAllocator, Ticket, TicketId};
//!
//! let ids = IdAllocator::new().next_ids(&["T-001", "T-005", "T-003"], 2).unwrap();
//! assert_eq!(ids, vec![TicketId::new("T-006"), TicketId::new("T-007")]);
//!
//! let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
//! let parent = Ticket::parent(ids[0].clone(), "Release 1.2")
//!     .assignee("alice")
//!     .dates(start, end);
//! assert!(parent.is_parent());
//! ```

pub mod color;
pub mod dates;
pub mod ids;
pub mod memo;
pub mod memory;
pub mod order;
pub mod status;

pub use color::{Color, ColorSettings};
pub use dates::{date_range, display_window, overlaps, DateSpan};
pub use ids::{IdAllocator, ID_PREFIX};
pub use memo::extract_memo;
pub use memory::{Assignee, Holiday, MemoryStore};
pub use order::{sort_tickets, ticket_order};
pub use status::{StatusDef, StatusTable, TicketStatus};

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Ticket
// ============================================================================

/// Display identifier of a ticket (`T-001`, `T-1000`, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix, if the id has the standard prefix and a positive number
    pub fn number(&self) -> Option<u64> {
        ids::parse_number(ID_PREFIX, &self.0)
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TicketId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Role of a ticket in the hierarchy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketKind {
    /// Top-level ticket
    #[default]
    Parent,
    /// Sub-task of exactly one parent
    Child,
}

impl std::fmt::Display for TicketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketKind::Parent => write!(f, "parent"),
            TicketKind::Child => write!(f, "child"),
        }
    }
}

/// A schedulable work item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Stable identifier
    pub id: TicketId,
    /// Owning parent (children only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TicketId>,
    /// Parent or child
    pub kind: TicketKind,
    /// Ticket name
    pub name: String,
    /// Free text; a `//` line inside is the ticket's memo
    #[serde(default)]
    pub description: String,
    /// Assignee name (must resolve against the roster)
    pub assignee: String,
    /// Status key, interpreted through a `StatusTable`
    #[serde(default)]
    pub status: TicketStatus,
    /// First scheduled day (inclusive)
    pub start: NaiveDate,
    /// Last scheduled day (inclusive)
    pub end: NaiveDate,
    /// Creation timestamp (informational)
    #[serde(default)]
    pub created_at: NaiveDateTime,
}

impl Ticket {
    /// Create a parent ticket with the given id and name
    pub fn parent(id: impl Into<TicketId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            kind: TicketKind::Parent,
            name: name.into(),
            description: String::new(),
            assignee: String::new(),
            status: TicketStatus::not_started(),
            start: NaiveDate::default(),
            end: NaiveDate::default(),
            created_at: NaiveDateTime::default(),
        }
    }

    /// Create a child ticket under `parent_id`
    pub fn child(
        id: impl Into<TicketId>,
        parent_id: impl Into<TicketId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            kind: TicketKind::Child,
            ..Self::parent(id, name)
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    pub fn status(mut self, status: impl Into<TicketStatus>) -> Self {
        self.status = status.into();
        self
    }

    /// Set both scheduled dates
    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_parent(&self) -> bool {
        self.kind == TicketKind::Parent
    }

    /// The inclusive span between start and end
    pub fn span(&self) -> DateSpan {
        DateSpan::unchecked(self.start, self.end)
    }

    /// Memo line extracted from the description
    pub fn memo(&self) -> String {
        extract_memo(&self.description)
    }

    /// Not completed and the end date is strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate, statuses: &StatusTable) -> bool {
        !statuses.is_completed(&self.status) && self.end < today
    }

    /// Check the `end >= start` invariant
    pub fn validate_dates(&self) -> Result<(), TicketError> {
        DateSpan::new(self.start, self.end).map(|_| ())
    }
}

// ============================================================================
// Template
// ============================================================================

fn default_duration() -> u32 {
    1
}

/// Child-ticket blueprint, relative to the parent's start date
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Days from the parent start
    #[serde(default)]
    pub start_offset: u32,
    /// Inclusive day count (at least 1)
    #[serde(default = "default_duration")]
    pub duration: u32,
}

impl Template {
    pub fn new(name: impl Into<String>, start_offset: u32, duration: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            start_offset,
            duration,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), TicketError> {
        if self.duration < 1 {
            return Err(TicketError::InvalidTemplate {
                name: self.name.clone(),
                reason: format!("duration must be at least 1 day, got {}", self.duration),
            });
        }
        Ok(())
    }

    /// Offset of the last scheduled day from the parent start
    pub fn last_day_offset(&self) -> u64 {
        u64::from(self.start_offset) + u64::from(self.duration.max(1)) - 1
    }

    /// Child span for a parent starting on `parent_start`
    pub fn child_span(&self, parent_start: NaiveDate) -> Result<DateSpan, TicketError> {
        self.validate()?;
        let out_of_range = || TicketError::InvalidTemplate {
            name: self.name.clone(),
            reason: "schedule falls outside the supported calendar".into(),
        };
        let start = parent_start
            .checked_add_days(Days::new(u64::from(self.start_offset)))
            .ok_or_else(out_of_range)?;
        let end = start
            .checked_add_days(Days::new(u64::from(self.duration) - 1))
            .ok_or_else(out_of_range)?;
        Ok(DateSpan::unchecked(start, end))
    }
}

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Read access to stored tickets
pub trait TicketSource {
    /// Parent tickets whose span intersects `[start, end]`
    fn find_parents_in_period(&self, start: NaiveDate, end: NaiveDate) -> Vec<Ticket>;

    /// Children of the given parent, in storage order
    fn find_children(&self, parent_id: &TicketId) -> Vec<Ticket>;

    fn find_by_id(&self, id: &TicketId) -> Option<Ticket>;

    /// All parent tickets
    fn find_parents(&self) -> Vec<Ticket> {
        self.find_parents_in_period(NaiveDate::MIN, NaiveDate::MAX)
    }
}

/// Write access to stored tickets
pub trait TicketStore {
    /// Append new tickets in one batch
    fn save_all(&mut self, tickets: &[Ticket]) -> Result<(), TicketError>;

    /// Overwrite an existing ticket with the same id
    fn replace(&mut self, ticket: &Ticket) -> Result<(), TicketError>;
}

/// Known assignees
pub trait RosterSource {
    fn exists(&self, assignee: &str) -> bool;
}

/// Ordered child templates
pub trait TemplateSource {
    fn list_all(&self) -> Vec<Template>;
}

/// Color configuration
pub trait SettingsSource {
    fn settings(&self) -> ColorSettings;

    /// Color of an in-range cell for the given role and status
    fn ticket_color(&self, is_parent: bool, status: &TicketStatus) -> Color {
        self.settings().ticket_color(is_parent, status)
    }
}

impl SettingsSource for ColorSettings {
    fn settings(&self) -> ColorSettings {
        self.clone()
    }
}

/// Holiday calendar
pub trait HolidaySource {
    /// Holidays falling inside `[start, end]`
    fn holidays(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate>;
}

/// Holiday calendar without any holidays
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHolidays;

impl HolidaySource for NoHolidays {
    fn holidays(&self, _start: NaiveDate, _end: NaiveDate) -> Vec<NaiveDate> {
        Vec::new()
    }
}

impl HolidaySource for Vec<NaiveDate> {
    fn holidays(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        self.iter()
            .copied()
            .filter(|d| *d >= start && *d <= end)
            .collect()
    }
}

/// Ids currently in use
pub trait IdSpace {
    fn used_ids(&self) -> Vec<TicketId>;
}

// ============================================================================
// Errors
// ============================================================================

/// Validation and lookup failures raised by the engine
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("Assignee not found in roster: {0}")]
    UnknownAssignee(String),

    #[error("No templates configured")]
    NoTemplatesConfigured,

    #[error("End date {end} is earlier than start date {start}")]
    InvalidDateOrder { start: NaiveDate, end: NaiveDate },

    #[error("Parent ticket not found or not a parent: {0}")]
    UnknownParentReference(String),

    #[error("Ticket not found: {0}")]
    UnknownTicket(String),

    #[error("Ticket name is required")]
    EmptyName,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid template '{name}': {reason}")]
    InvalidTemplate { name: String, reason: String },

    #[error("Parent end date is required")]
    MissingEndDate,

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl TicketError {
    /// Stable kind name for callers translating errors into messages
    pub fn kind(&self) -> &'static str {
        match self {
            TicketError::UnknownAssignee(_) => "UnknownAssignee",
            TicketError::NoTemplatesConfigured => "NoTemplatesConfigured",
            TicketError::InvalidDateOrder { .. } => "InvalidDateOrder",
            TicketError::UnknownParentReference(_) => "UnknownParentReference",
            TicketError::UnknownTicket(_) => "UnknownTicket",
            TicketError::EmptyName => "EmptyName",
            TicketError::InvalidInput(_) => "InvalidInput",
            TicketError::InvalidTemplate { .. } => "InvalidTemplate",
            TicketError::MissingEndDate => "MissingEndDate",
            TicketError::InvalidColor(_) => "InvalidColor",
            TicketError::Store(_) => "Store",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
