//! Cell color rules
//!
//! A calendar cell is painted by the first rule that matches:
//!
//! ```text
//! 1. in range, overdue ticket, cell is the end date   -> overdue   (Overdue policy)
//! 2. in range                                         -> parent / status color
//!    out of range, cell is today                      -> today     (Today policy)
//! 3. out of range, holiday                            -> holiday
//! 4. out of range, Sunday                             -> sunday
//! 5. out of range, Saturday                           -> saturday
//! 6. otherwise                                        -> white
//! ```
//!
//! Header cells use the Sunday color for holidays and Sundays, the Saturday
//! color for Saturdays and the header background otherwise.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ticketgantt_core::dates::{is_saturday, is_sunday};
use ticketgantt_core::{Color, ColorSettings, SettingsSource, Ticket};

/// Which date-keyed highlight a deployment uses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightPolicy {
    /// Mark the end-date cell of overdue tickets
    #[default]
    Overdue,
    /// Mark today's column outside ticket ranges
    Today,
}

/// Role of the row a cell belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowRole {
    Parent,
    Child,
}

impl RowRole {
    pub fn is_parent(self) -> bool {
        self == RowRole::Parent
    }
}

/// Calendar facts for the display window
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarFacts {
    holidays: BTreeSet<NaiveDate>,
    today: NaiveDate,
}

impl CalendarFacts {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            holidays: BTreeSet::new(),
            today,
        }
    }

    pub fn holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

/// The rule that decided a cell's color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorRule {
    Overdue,
    Status,
    Today,
    Holiday,
    Sunday,
    Saturday,
    Background,
}

/// One calendar cell of a ticket row
#[derive(Clone, Copy, Debug)]
pub struct Cell<'t> {
    pub ticket: &'t Ticket,
    pub role: RowRole,
    pub date: NaiveDate,
    /// Ticket is not completed and ended before today
    pub overdue: bool,
}

impl Cell<'_> {
    pub fn in_range(&self) -> bool {
        self.ticket.span().contains(self.date)
    }

    pub fn is_end_date(&self) -> bool {
        self.date == self.ticket.end
    }
}

/// Resolves cell and header colors from settings and calendar facts
pub struct ColorRuleEngine<'s, S: SettingsSource + ?Sized> {
    source: &'s S,
    settings: ColorSettings,
    policy: HighlightPolicy,
}

impl<'s, S: SettingsSource + ?Sized> ColorRuleEngine<'s, S> {
    pub fn new(source: &'s S, policy: HighlightPolicy) -> Self {
        Self {
            settings: source.settings(),
            source,
            policy,
        }
    }

    pub fn policy(&self) -> HighlightPolicy {
        self.policy
    }

    pub fn settings(&self) -> &ColorSettings {
        &self.settings
    }

    /// First matching rule for a ticket cell
    pub fn classify(&self, cell: &Cell<'_>, facts: &CalendarFacts) -> ColorRule {
        if cell.in_range() {
            if self.policy == HighlightPolicy::Overdue && cell.overdue && cell.is_end_date() {
                return ColorRule::Overdue;
            }
            return ColorRule::Status;
        }
        if self.policy == HighlightPolicy::Today && cell.date == facts.today() {
            return ColorRule::Today;
        }
        if facts.is_holiday(cell.date) {
            ColorRule::Holiday
        } else if is_sunday(cell.date) {
            ColorRule::Sunday
        } else if is_saturday(cell.date) {
            ColorRule::Saturday
        } else {
            ColorRule::Background
        }
    }

    /// Color for a rule as applied to `cell`
    pub fn resolve(&self, rule: ColorRule, cell: &Cell<'_>) -> Color {
        match rule {
            ColorRule::Overdue => self.settings.overdue.clone(),
            ColorRule::Status => self
                .source
                .ticket_color(cell.role.is_parent(), &cell.ticket.status),
            ColorRule::Today => self.settings.today.clone(),
            ColorRule::Holiday => self.settings.holiday.clone(),
            ColorRule::Sunday => self.settings.sunday.clone(),
            ColorRule::Saturday => self.settings.saturday.clone(),
            ColorRule::Background => Color::white(),
        }
    }

    pub fn cell_color(&self, cell: &Cell<'_>, facts: &CalendarFacts) -> Color {
        self.resolve(self.classify(cell, facts), cell)
    }

    pub fn header_color(&self, date: NaiveDate, facts: &CalendarFacts) -> Color {
        if facts.is_holiday(date) || is_sunday(date) {
            self.settings.sunday.clone()
        } else if is_saturday(date) {
            self.settings.saturday.clone()
        } else {
            self.settings.header_background.clone()
        }
    }

    /// Background of a fixed (non-calendar) column in a data row
    pub fn fixed_cell_color(&self) -> Color {
        Color::white()
    }

    /// Background of a fixed column in the header row
    pub fn fixed_header_color(&self) -> Color {
        self.settings.header_background.clone()
    }
}
