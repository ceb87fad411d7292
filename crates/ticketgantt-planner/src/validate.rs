//! Input checks shared by the planner services

use chrono::NaiveDate;
use ticketgantt_core::{DateSpan, RosterSource, TicketError};

/// Longest accepted ticket name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 1000;

pub fn ticket_name(name: &str) -> Result<(), TicketError> {
    if name.trim().is_empty() {
        return Err(TicketError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(TicketError::InvalidInput(format!(
            "ticket name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn description(description: &str) -> Result<(), TicketError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(TicketError::InvalidInput(format!(
            "description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

pub fn assignee<R: RosterSource + ?Sized>(roster: &R, name: &str) -> Result<(), TicketError> {
    if !roster.exists(name) {
        return Err(TicketError::UnknownAssignee(name.to_string()));
    }
    Ok(())
}

pub fn date_order(start: NaiveDate, end: NaiveDate) -> Result<DateSpan, TicketError> {
    DateSpan::new(start, end)
}
