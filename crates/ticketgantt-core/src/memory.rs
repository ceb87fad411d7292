//! In-memory collaborator
//!
//! `MemoryStore` implements every collaborator trait over plain vectors. It is
//! the serialized form of the CLI workbook and the fake used in tests.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    overlaps, HolidaySource, IdSpace, RosterSource, Template, TemplateSource, Ticket, TicketError,
    TicketId, TicketKind, TicketSource, TicketStore,
};

/// Roster entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Assignee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

/// Named public holiday
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default)]
    pub name: String,
}

/// Tickets, templates, roster and holidays held in memory
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    pub roster: Vec<Assignee>,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assignee(mut self, name: impl Into<String>) -> Self {
        self.roster.push(Assignee::new(name));
        self
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.push(template);
        self
    }

    pub fn with_holiday(mut self, date: NaiveDate, name: impl Into<String>) -> Self {
        self.holidays.push(Holiday {
            date,
            name: name.into(),
        });
        self
    }

    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.tickets.push(ticket);
        self
    }
}

impl TicketSource for MemoryStore {
    fn find_parents_in_period(&self, start: NaiveDate, end: NaiveDate) -> Vec<Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.kind == TicketKind::Parent && overlaps(t.start, t.end, start, end))
            .cloned()
            .collect()
    }

    fn find_children(&self, parent_id: &TicketId) -> Vec<Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.kind == TicketKind::Child && t.parent_id.as_ref() == Some(parent_id))
            .cloned()
            .collect()
    }

    fn find_by_id(&self, id: &TicketId) -> Option<Ticket> {
        self.tickets.iter().find(|t| &t.id == id).cloned()
    }
}

impl TicketStore for MemoryStore {
    fn save_all(&mut self, tickets: &[Ticket]) -> Result<(), TicketError> {
        let mut seen: HashSet<&TicketId> = self.tickets.iter().map(|t| &t.id).collect();
        if let Some(dup) = tickets.iter().find(|t| !seen.insert(&t.id)) {
            return Err(TicketError::Store(format!("duplicate ticket id {}", dup.id)));
        }
        self.tickets.extend_from_slice(tickets);
        Ok(())
    }

    fn replace(&mut self, ticket: &Ticket) -> Result<(), TicketError> {
        let slot = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket.id)
            .ok_or_else(|| TicketError::UnknownTicket(ticket.id.to_string()))?;
        *slot = ticket.clone();
        Ok(())
    }
}

impl RosterSource for MemoryStore {
    fn exists(&self, assignee: &str) -> bool {
        self.roster.iter().any(|a| a.name == assignee)
    }
}

impl TemplateSource for MemoryStore {
    fn list_all(&self) -> Vec<Template> {
        self.templates
            .iter()
            .filter(|t| !t.name.trim().is_empty())
            .cloned()
            .collect()
    }
}

impl HolidaySource for MemoryStore {
    fn holidays(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        self.holidays
            .iter()
            .map(|h| h.date)
            .filter(|d| *d >= start && *d <= end)
            .collect()
    }
}

impl IdSpace for MemoryStore {
    fn used_ids(&self) -> Vec<TicketId> {
        self.tickets.iter().map(|t| t.id.clone()).collect()
    }
}
