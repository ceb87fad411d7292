//! Ticket service
//!
//! Write-side operations over a ticket backend: direct creation, template
//! driven creation, batch saves and edits. Every operation validates all of
//! its input before it allocates ids or writes anything.

use chrono::{NaiveDate, NaiveDateTime};
use ticketgantt_core::{
    sort_tickets, IdAllocator, IdSpace, RosterSource, StatusTable, TemplateSource, Ticket,
    TicketError, TicketId, TicketKind, TicketSource, TicketStatus, TicketStore,
};
use tracing::{debug, info};

use crate::expand::{EndDatePolicy, Expansion, ParentSpec, TemplateExpander};
use crate::validate;

/// Everything the service needs from storage
pub trait TicketBackend: TicketSource + TicketStore + RosterSource + TemplateSource + IdSpace {}

impl<T> TicketBackend for T where
    T: TicketSource + TicketStore + RosterSource + TemplateSource + IdSpace + ?Sized
{
}

/// Request for a single ticket
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTicket {
    /// Set for a child ticket
    pub parent_id: Option<TicketId>,
    pub name: String,
    pub description: String,
    pub assignee: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl NewTicket {
    pub fn new(
        name: impl Into<String>,
        assignee: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            parent_id: None,
            name: name.into(),
            description: String::new(),
            assignee: assignee.into(),
            start,
            end,
        }
    }

    pub fn under(mut self, parent_id: impl Into<TicketId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial edit of a stored ticket
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub id: TicketId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub status: Option<TicketStatus>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TicketUpdate {
    pub fn new(id: impl Into<TicketId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: impl Into<TicketStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

/// Ticket operations over a backend
pub struct TicketService<'s, S: TicketBackend + ?Sized> {
    store: &'s mut S,
    statuses: StatusTable,
    end_policy: EndDatePolicy,
    allocator: IdAllocator,
}

impl<'s, S: TicketBackend + ?Sized> TicketService<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self {
            store,
            statuses: StatusTable::default(),
            end_policy: EndDatePolicy::default(),
            allocator: IdAllocator::new(),
        }
    }

    pub fn statuses(mut self, statuses: StatusTable) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn end_date_policy(mut self, policy: EndDatePolicy) -> Self {
        self.end_policy = policy;
        self
    }

    /// Create one parent or child ticket
    pub fn create_ticket(
        &mut self,
        input: NewTicket,
        created_at: NaiveDateTime,
    ) -> Result<Ticket, TicketError> {
        validate::ticket_name(&input.name)?;
        validate::description(&input.description)?;
        validate::assignee(&*self.store, &input.assignee)?;
        validate::date_order(input.start, input.end)?;

        if let Some(parent_id) = &input.parent_id {
            match self.store.find_by_id(parent_id) {
                Some(parent) if parent.kind == TicketKind::Parent => {}
                _ => return Err(TicketError::UnknownParentReference(parent_id.to_string())),
            }
        }

        let id = self.allocator.next_id(&self.store.used_ids())?;
        let ticket = match input.parent_id {
            Some(parent_id) => Ticket::child(id, parent_id, input.name),
            None => Ticket::parent(id, input.name),
        }
        .description(input.description)
        .assignee(input.assignee)
        .status(self.statuses.initial())
        .dates(input.start, input.end)
        .created_at(created_at);

        self.store.save_all(std::slice::from_ref(&ticket))?;
        info!(id = %ticket.id, kind = %ticket.kind, "ticket created");
        Ok(ticket)
    }

    /// Expand the configured templates under a new parent and save the batch
    pub fn create_from_templates(
        &mut self,
        spec: &ParentSpec,
        created_at: NaiveDateTime,
    ) -> Result<Expansion, TicketError> {
        let templates = self.store.list_all();
        let existing = self.store.used_ids();
        let expansion = TemplateExpander::new(&*self.store)
            .end_date_policy(self.end_policy)
            .initial_status(self.statuses.initial())
            .allocator(self.allocator.clone())
            .expand(spec, &templates, &existing, created_at)?;

        let tickets = expansion.clone().into_tickets();
        self.save_tickets(&tickets)?;
        info!(
            parent = %expansion.parent.id,
            count = expansion.ticket_count(),
            "tickets created from templates"
        );
        Ok(expansion)
    }

    /// Validate every ticket, then write the whole batch
    pub fn save_tickets(&mut self, tickets: &[Ticket]) -> Result<(), TicketError> {
        for ticket in tickets {
            validate::assignee(&*self.store, &ticket.assignee)?;
            ticket.validate_dates()?;
        }
        self.store.save_all(tickets)
    }

    /// Apply a partial edit; only the date order is re-checked
    pub fn update_ticket(&mut self, update: TicketUpdate) -> Result<Ticket, TicketError> {
        let mut ticket = self
            .store
            .find_by_id(&update.id)
            .ok_or_else(|| TicketError::UnknownTicket(update.id.to_string()))?;

        if let Some(name) = update.name {
            ticket.name = name;
        }
        if let Some(description) = update.description {
            ticket.description = description;
        }
        if let Some(assignee) = update.assignee {
            ticket.assignee = assignee;
        }
        if let Some(status) = update.status {
            ticket.status = status;
        }
        if let Some(start) = update.start {
            ticket.start = start;
        }
        if let Some(end) = update.end {
            ticket.end = end;
        }
        ticket.validate_dates()?;

        self.store.replace(&ticket)?;
        debug!(id = %ticket.id, status = %ticket.status, "ticket updated");
        Ok(ticket)
    }

    /// Sorted parents, each with its sorted children
    pub fn hierarchy(&self) -> Vec<(Ticket, Vec<Ticket>)> {
        sort_tickets(&self.store.find_parents())
            .into_iter()
            .map(|parent| {
                let children = sort_tickets(&self.store.find_children(&parent.id));
                (parent, children)
            })
            .collect()
    }

    /// Preview the next `count` ids without reserving them
    pub fn next_ids(&self, count: usize) -> Result<Vec<TicketId>, TicketError> {
        self.allocator.next_ids(&self.store.used_ids(), count)
    }
}
