//! Date windows and overlap tests
//!
//! All dates are `NaiveDate` values: day granularity, no time-of-day, and
//! immutable. Every operation here returns a new value.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{Ticket, TicketError};

/// Inclusive range of calendar days
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Validated span; fails with `InvalidDateOrder` when `end < start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TicketError> {
        if end < start {
            return Err(TicketError::InvalidDateOrder { start, end });
        }
        Ok(Self { start, end })
    }

    /// Span without the ordering check (for stored tickets)
    pub fn unchecked(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// True when the spans share at least one day
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    /// Number of days covered (0 for an inverted span)
    pub fn num_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    /// Every day of the span, in order
    pub fn days(&self) -> Vec<NaiveDate> {
        date_range(self.start, self.end)
    }
}

/// Inclusive overlap test: `a_start <= b_end && a_end >= b_start`
///
/// Ranges that only touch on a boundary day overlap.
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Min start / max end over a set of tickets, `None` for an empty set
pub fn display_window<'a, I>(tickets: I) -> Option<DateSpan>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    tickets.into_iter().fold(None, |window, ticket| {
        Some(match window {
            None => DateSpan::unchecked(ticket.start, ticket.end),
            Some(w) => DateSpan::unchecked(w.start.min(ticket.start), w.end.max(ticket.end)),
        })
    })
}

/// Every calendar day from `start` to `end` inclusive (empty when `end < start`)
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn is_saturday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sat
}

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// Short month/day label used for calendar columns (`4/1`)
pub fn month_day_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Full date used in row cells (`2024/04/01`)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn span_rejects_inverted_dates() {
        let err = DateSpan::new(date(2024, 4, 10), date(2024, 4, 1)).unwrap_err();
        assert_eq!(err.kind(), "InvalidDateOrder");
        assert!(DateSpan::new(date(2024, 4, 1), date(2024, 4, 1)).is_ok());
    }

    #[test]
    fn touching_ranges_overlap() {
        assert!(overlaps(date(2024, 1, 1), date(2024, 1, 10), date(2024, 1, 10), date(2024, 1, 20)));
        assert!(!overlaps(date(2024, 1, 1), date(2024, 1, 9), date(2024, 1, 10), date(2024, 1, 20)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let days: Vec<NaiveDate> = date_range(date(2024, 1, 1), date(2024, 1, 5));
        for &a in &days {
            for &b in &days {
                for &c in &days {
                    for &d in &days {
                        assert_eq!(overlaps(a, b, c, d), overlaps(c, d, a, b));
                    }
                }
            }
        }
    }

    #[test]
    fn contained_range_overlaps() {
        let outer = DateSpan::unchecked(date(2024, 1, 1), date(2024, 1, 31));
        let inner = DateSpan::unchecked(date(2024, 1, 10), date(2024, 1, 12));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn display_window_spans_min_start_to_max_end() {
        let tickets = vec![
            Ticket::parent("T-001", "A").dates(date(2024, 4, 5), date(2024, 4, 8)),
            Ticket::parent("T-002", "B").dates(date(2024, 4, 1), date(2024, 4, 3)),
            Ticket::parent("T-003", "C").dates(date(2024, 4, 2), date(2024, 4, 20)),
        ];
        let window = display_window(&tickets).unwrap();
        assert_eq!(window, DateSpan::unchecked(date(2024, 4, 1), date(2024, 4, 20)));
        assert!(display_window(&Vec::<Ticket>::new()).is_none());
    }

    #[test]
    fn date_range_is_inclusive_and_crosses_months() {
        let days = date_range(date(2024, 2, 27), date(2024, 3, 2));
        assert_eq!(days.len(), 5);
        assert_eq!(days[2], date(2024, 2, 29));
        assert_eq!(days[4], date(2024, 3, 2));
        assert!(date_range(date(2024, 3, 2), date(2024, 3, 1)).is_empty());
    }

    #[test]
    fn weekday_checks() {
        assert!(is_saturday(date(2024, 4, 6)));
        assert!(is_sunday(date(2024, 4, 7)));
        assert!(!is_saturday(date(2024, 4, 8)));
    }

    #[test]
    fn labels() {
        assert_eq!(month_day_label(date(2024, 4, 1)), "4/1");
        assert_eq!(month_day_label(date(2024, 12, 31)), "12/31");
        assert_eq!(format_date(date(2024, 4, 1)), "2024/04/01");
    }

    #[test]
    fn span_day_count() {
        let span = DateSpan::unchecked(date(2024, 4, 1), date(2024, 4, 10));
        assert_eq!(span.num_days(), 10);
        assert_eq!(span.days().len(), 10);
    }
}
