//! Gantt layout builder
//!
//! Selects the parents overlapping a query window, sizes the calendar to the
//! selected parents, orders rows and paints every cell. The result is plain
//! data for a renderer to write out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ticketgantt_core::dates::{format_date, month_day_label};
use ticketgantt_core::{
    date_range, display_window, overlaps, sort_tickets, Color, DateSpan, HolidaySource,
    SettingsSource, StatusTable, Ticket, TicketError, TicketId, TicketSource,
};
use tracing::debug;

use crate::color::{CalendarFacts, Cell, ColorRuleEngine, HighlightPolicy, RowRole};

/// Optional fixed column between the child name and the assignee
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailColumn {
    None,
    Description,
    /// First `//` line of the description
    #[default]
    Memo,
}

impl DetailColumn {
    pub fn label(self) -> Option<&'static str> {
        match self {
            DetailColumn::None => None,
            DetailColumn::Description => Some("Description"),
            DetailColumn::Memo => Some("Memo"),
        }
    }

    fn text(self, ticket: &Ticket) -> String {
        match self {
            DetailColumn::None => String::new(),
            DetailColumn::Description => ticket.description.clone(),
            DetailColumn::Memo => ticket.memo(),
        }
    }
}

/// Labels of the fixed columns, in order
pub fn fixed_headers(detail: DetailColumn) -> Vec<String> {
    let mut headers = vec!["Parent", "Child"];
    headers.extend(detail.label());
    headers.extend(["Assignee", "Status", "Start", "End"]);
    headers.into_iter().map(String::from).collect()
}

/// One row of the layout
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowData {
    pub role: RowRole,
    pub ticket_id: TicketId,
    pub parent_name: String,
    /// Empty for parent rows
    pub child_name: String,
    /// Description or memo; empty when the detail column is off
    pub detail: String,
    pub assignee: String,
    /// Display label of the status
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip)]
    pub span: DateSpan,
    /// Overdue and highlighted as such; always false under `HighlightPolicy::Today`
    #[serde(skip)]
    pub overdue: bool,
}

impl RowData {
    /// Text of the fixed columns, matching `fixed_headers`
    pub fn fixed_cells(&self, detail: DetailColumn) -> Vec<&str> {
        let mut cells = vec![self.parent_name.as_str(), self.child_name.as_str()];
        if detail != DetailColumn::None {
            cells.push(self.detail.as_str());
        }
        cells.extend([
            self.assignee.as_str(),
            self.status.as_str(),
            self.start_date.as_str(),
            self.end_date.as_str(),
        ]);
        cells
    }
}

/// Header row, data rows and their background matrices
///
/// Every background row holds the fixed columns followed by one color per
/// display date, in the same order as `headers`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GanttLayout {
    pub headers: Vec<String>,
    pub rows: Vec<RowData>,
    pub backgrounds: Vec<Vec<Color>>,
    pub header_backgrounds: Vec<Color>,
    pub date_range: Vec<NaiveDate>,
    pub detail: DetailColumn,
}

impl GanttLayout {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn fixed_column_count(&self) -> usize {
        self.headers.len() - self.date_range.len()
    }
}

/// Builds `GanttLayout`s
#[derive(Clone, Debug)]
pub struct GanttLayoutBuilder {
    today: NaiveDate,
    statuses: StatusTable,
    detail: DetailColumn,
    highlight: HighlightPolicy,
}

impl GanttLayoutBuilder {
    /// `today` drives the overdue and today rules
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            statuses: StatusTable::default(),
            detail: DetailColumn::default(),
            highlight: HighlightPolicy::default(),
        }
    }

    pub fn statuses(mut self, statuses: StatusTable) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn detail_column(mut self, detail: DetailColumn) -> Self {
        self.detail = detail;
        self
    }

    pub fn highlight(mut self, policy: HighlightPolicy) -> Self {
        self.highlight = policy;
        self
    }

    /// Build the layout for the parents overlapping `query`
    ///
    /// Fails with `InvalidDateOrder` when `query` ends before it starts, even
    /// if the span was built with `DateSpan::unchecked`.
    pub fn build<T, S, H>(
        &self,
        query: DateSpan,
        tickets: &T,
        settings: &S,
        holidays: &H,
    ) -> Result<GanttLayout, TicketError>
    where
        T: TicketSource + ?Sized,
        S: SettingsSource + ?Sized,
        H: HolidaySource + ?Sized,
    {
        let query = DateSpan::new(query.start, query.end)?;
        let engine = ColorRuleEngine::new(settings, self.highlight);
        let fixed = fixed_headers(self.detail);
        let fixed_count = fixed.len();

        let candidates: Vec<Ticket> = tickets
            .find_parents_in_period(query.start, query.end)
            .into_iter()
            .filter(|p| overlaps(p.start, p.end, query.start, query.end))
            .collect();

        let Some(window) = display_window(&candidates) else {
            debug!(from = %query.start, to = %query.end, "no parents in period");
            return Ok(GanttLayout {
                headers: fixed,
                rows: Vec::new(),
                backgrounds: Vec::new(),
                header_backgrounds: vec![engine.fixed_header_color(); fixed_count],
                date_range: Vec::new(),
                detail: self.detail,
            });
        };

        let parents = sort_tickets(&candidates);
        let dates = date_range(window.start, window.end);
        let facts = CalendarFacts::new(self.today).holidays(holidays.holidays(window.start, window.end));

        let mut headers = fixed;
        headers.extend(dates.iter().copied().map(month_day_label));

        let header_backgrounds: Vec<Color> = std::iter::repeat(engine.fixed_header_color())
            .take(fixed_count)
            .chain(dates.iter().map(|d| engine.header_color(*d, &facts)))
            .collect();

        let mut rows = Vec::new();
        let mut backgrounds = Vec::new();
        for parent in &parents {
            let children = sort_tickets(&tickets.find_children(&parent.id));
            let parent_row = std::iter::once((parent, RowRole::Parent));
            let child_rows = children.iter().map(|child| (child, RowRole::Child));

            for (ticket, role) in parent_row.chain(child_rows) {
                let row = self.row(ticket, &parent.name, role);
                let colors: Vec<Color> = std::iter::repeat(engine.fixed_cell_color())
                    .take(fixed_count)
                    .chain(dates.iter().map(|date| {
                        let cell = Cell {
                            ticket,
                            role,
                            date: *date,
                            overdue: row.overdue,
                        };
                        engine.cell_color(&cell, &facts)
                    }))
                    .collect();
                rows.push(row);
                backgrounds.push(colors);
            }
        }

        debug!(
            parents = parents.len(),
            rows = rows.len(),
            start = %window.start,
            end = %window.end,
            "gantt layout built"
        );

        Ok(GanttLayout {
            headers,
            rows,
            backgrounds,
            header_backgrounds,
            date_range: dates,
            detail: self.detail,
        })
    }

    fn row(&self, ticket: &Ticket, parent_name: &str, role: RowRole) -> RowData {
        RowData {
            role,
            ticket_id: ticket.id.clone(),
            parent_name: parent_name.to_string(),
            child_name: match role {
                RowRole::Parent => String::new(),
                RowRole::Child => ticket.name.clone(),
            },
            detail: self.detail.text(ticket),
            assignee: ticket.assignee.clone(),
            status: self.statuses.label(&ticket.status).to_string(),
            start_date: format_date(ticket.start),
            end_date: format_date(ticket.end),
            span: ticket.span(),
            overdue: self.highlight == HighlightPolicy::Overdue
                && ticket.is_overdue(self.today, &self.statuses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketgantt_core::{ColorSettings, MemoryStore, NoHolidays};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn fixed_headers_follow_detail_column() {
        assert_eq!(
            fixed_headers(DetailColumn::None),
            vec!["Parent", "Child", "Assignee", "Status", "Start", "End"]
        );
        assert_eq!(fixed_headers(DetailColumn::Memo)[2], "Memo");
        assert_eq!(fixed_headers(DetailColumn::Description).len(), 7);
    }

    #[test]
    fn memo_column_shows_marker_line() {
        let store = MemoryStore::new().with_ticket(
            Ticket::parent("T-001", "Release")
                .description("ship it\n  // waiting on QA  \nmore")
                .dates(date(2024, 4, 1), date(2024, 4, 2)),
        );
        let layout = GanttLayoutBuilder::new(date(2024, 4, 1)).build(
            DateSpan::unchecked(date(2024, 4, 1), date(2024, 4, 30)),
            &store,
            &ColorSettings::default(),
            &NoHolidays,
        ).unwrap();

        assert_eq!(layout.rows[0].detail, "waiting on QA");
        assert_eq!(layout.fixed_column_count(), 7);
    }

    #[test]
    fn window_can_exceed_query() {
        let store = MemoryStore::new().with_ticket(
            Ticket::parent("T-001", "Long").dates(date(2024, 3, 25), date(2024, 4, 5)),
        );
        let layout = GanttLayoutBuilder::new(date(2024, 4, 1)).build(
            DateSpan::unchecked(date(2024, 4, 1), date(2024, 4, 2)),
            &store,
            &ColorSettings::default(),
            &NoHolidays,
        ).unwrap();

        assert_eq!(layout.date_range.first(), Some(&date(2024, 3, 25)));
        assert_eq!(layout.date_range.last(), Some(&date(2024, 4, 5)));
    }
}
