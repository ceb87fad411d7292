//! Template expansion
//!
//! Turns a parent specification plus an ordered template list into one parent
//! ticket and one child per template:
//!
//! ```text
//! child_start = parent_start + start_offset
//! child_end   = child_start + duration - 1
//! ```
//!
//! Every precondition is checked before any id is allocated, so a failed
//! expansion produces nothing. Ids for the parent and all children come from
//! one allocator call over a single snapshot of the ids in use.

use chrono::{Days, NaiveDate, NaiveDateTime};
use ticketgantt_core::{
    DateSpan, IdAllocator, RosterSource, Template, Ticket, TicketError, TicketId, TicketStatus,
};
use tracing::debug;

use crate::validate;

/// How the parent's end date is chosen
///
/// A deployment picks one policy; the two are never mixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndDatePolicy {
    /// The caller supplies the end date
    #[default]
    CallerSupplied,
    /// The end of the latest-finishing child
    LatestChild,
}

/// Parent ticket request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentSpec {
    pub name: String,
    pub description: String,
    pub assignee: String,
    pub start: NaiveDate,
    /// Required under `EndDatePolicy::CallerSupplied`, ignored otherwise
    pub end: Option<NaiveDate>,
}

impl ParentSpec {
    pub fn new(name: impl Into<String>, assignee: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            assignee: assignee.into(),
            start,
            end: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }
}

/// Result of an expansion: the parent and its children in template order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    pub parent: Ticket,
    pub children: Vec<Ticket>,
}

impl Expansion {
    /// Parent first, then children
    pub fn into_tickets(self) -> Vec<Ticket> {
        std::iter::once(self.parent).chain(self.children).collect()
    }

    /// Number of tickets produced (parent included)
    pub fn ticket_count(&self) -> usize {
        1 + self.children.len()
    }
}

/// Expands parent specifications against templates
pub struct TemplateExpander<'a, R: RosterSource + ?Sized> {
    roster: &'a R,
    allocator: IdAllocator,
    end_policy: EndDatePolicy,
    initial_status: TicketStatus,
}

impl<'a, R: RosterSource + ?Sized> TemplateExpander<'a, R> {
    pub fn new(roster: &'a R) -> Self {
        Self {
            roster,
            allocator: IdAllocator::new(),
            end_policy: EndDatePolicy::default(),
            initial_status: TicketStatus::not_started(),
        }
    }

    pub fn end_date_policy(mut self, policy: EndDatePolicy) -> Self {
        self.end_policy = policy;
        self
    }

    pub fn initial_status(mut self, status: TicketStatus) -> Self {
        self.initial_status = status;
        self
    }

    pub fn allocator(mut self, allocator: IdAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Expand `spec` into a parent and one child per template
    ///
    /// `existing_ids` is the snapshot of ids in use; `created_at` is shared by
    /// every produced ticket.
    pub fn expand(
        &self,
        spec: &ParentSpec,
        templates: &[Template],
        existing_ids: &[TicketId],
        created_at: NaiveDateTime,
    ) -> Result<Expansion, TicketError> {
        validate::ticket_name(&spec.name)?;
        validate::description(&spec.description)?;
        validate::assignee(self.roster, &spec.assignee)?;
        if templates.is_empty() {
            return Err(TicketError::NoTemplatesConfigured);
        }

        let child_spans = templates
            .iter()
            .map(|t| t.child_span(spec.start))
            .collect::<Result<Vec<_>, _>>()?;
        let parent_span = self.parent_span(spec, templates)?;

        let ids = self.allocator.next_ids(existing_ids, 1 + templates.len())?;
        let (parent_id, child_ids) = ids
            .split_first()
            .ok_or_else(|| TicketError::Store("id allocation returned nothing".into()))?;

        debug!(
            parent = %parent_id,
            children = child_ids.len(),
            start = %parent_span.start,
            end = %parent_span.end,
            "expanding templates"
        );

        let parent = Ticket::parent(parent_id.clone(), spec.name.clone())
            .description(spec.description.clone())
            .assignee(spec.assignee.clone())
            .status(self.initial_status.clone())
            .dates(parent_span.start, parent_span.end)
            .created_at(created_at);

        let children = templates
            .iter()
            .zip(child_spans)
            .zip(child_ids)
            .map(|((template, span), id)| {
                Ticket::child(id.clone(), parent_id.clone(), template.name.clone())
                    .description(template.description.clone())
                    .assignee(spec.assignee.clone())
                    .status(self.initial_status.clone())
                    .dates(span.start, span.end)
                    .created_at(created_at)
            })
            .collect();

        Ok(Expansion { parent, children })
    }

    fn parent_span(&self, spec: &ParentSpec, templates: &[Template]) -> Result<DateSpan, TicketError> {
        match self.end_policy {
            EndDatePolicy::CallerSupplied => {
                let end = spec.end.ok_or(TicketError::MissingEndDate)?;
                validate::date_order(spec.start, end)
            }
            EndDatePolicy::LatestChild => {
                if spec.end.is_some() {
                    debug!("ignoring supplied end date under latest-child policy");
                }
                let last = templates.iter().map(Template::last_day_offset).max().unwrap_or(0);
                let end = spec
                    .start
                    .checked_add_days(Days::new(last))
                    .ok_or_else(|| TicketError::InvalidInput("parent end date out of range".into()))?;
                Ok(DateSpan::unchecked(spec.start, end))
            }
        }
    }
}
