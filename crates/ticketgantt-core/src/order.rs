//! Deterministic ticket ordering
//!
//! Tickets sort ascending by start date, then end date, then id. The id
//! tie-break compares the parsed numeric suffix rather than the display
//! string, so `T-1000` sorts after `T-999` even though the padding widths
//! differ. Ids without a valid suffix sort after numbered ids, by string.

use std::cmp::Ordering;

use crate::Ticket;

/// Total order over tickets: `(start, end, id number, id string)`
pub fn ticket_order(a: &Ticket, b: &Ticket) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| a.end.cmp(&b.end))
        .then_with(|| match (a.id.number(), b.id.number()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.as_str().cmp(b.id.as_str()))
}

/// Sorted copy of `tickets`
pub fn sort_tickets(tickets: &[Ticket]) -> Vec<Ticket> {
    let mut sorted = tickets.to_vec();
    sorted.sort_by(ticket_order);
    sorted
}
