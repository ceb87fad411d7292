//! Integration tests for the Gantt layout builder
//!
//! Covers the template round trip, empty periods, row ordering and the
//! cell/header color matrices.

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use ticketgantt_core::{
    Color, ColorSettings, DateSpan, MemoryStore, NoHolidays, StatusTable, Template, Ticket,
};
use ticketgantt_planner::{ParentSpec, TicketService};
use ticketgantt_render::{DetailColumn, GanttLayoutBuilder, HighlightPolicy, RowRole};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn april() -> DateSpan {
    DateSpan::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap()
}

fn white() -> Color {
    Color::white()
}

/// Test: expand three templates, save, and lay out the first ten days of April
#[test]
fn template_round_trip() {
    let mut store = MemoryStore::new()
        .with_assignee("alice")
        .with_template(Template::new("Design", 0, 3))
        .with_template(Template::new("Implement", 3, 5))
        .with_template(Template::new("Review", 8, 2));

    TicketService::new(&mut store)
        .create_from_templates(
            &ParentSpec::new("Login page", "alice", date(2024, 4, 1)).end(date(2024, 4, 10)),
            NaiveDateTime::default(),
        )
        .unwrap();

    let layout = GanttLayoutBuilder::new(date(2024, 4, 1)).build(
        DateSpan::new(date(2024, 4, 1), date(2024, 4, 10)).unwrap(),
        &store,
        &ColorSettings::default(),
        &NoHolidays,
    ).unwrap();

    let roles: Vec<(RowRole, &str, &str)> = layout
        .rows
        .iter()
        .map(|r| (r.role, r.parent_name.as_str(), r.child_name.as_str()))
        .collect();
    assert_eq!(
        roles,
        vec![
            (RowRole::Parent, "Login page", ""),
            (RowRole::Child, "Login page", "Design"),
            (RowRole::Child, "Login page", "Implement"),
            (RowRole::Child, "Login page", "Review"),
        ]
    );

    let fixed = layout.fixed_column_count();
    let date_headers: Vec<&str> = layout.headers[fixed..].iter().map(String::as_str).collect();
    assert_eq!(
        date_headers,
        vec!["4/1", "4/2", "4/3", "4/4", "4/5", "4/6", "4/7", "4/8", "4/9", "4/10"]
    );
    assert_eq!(layout.backgrounds.len(), 4);
    assert!(layout
        .backgrounds
        .iter()
        .all(|row| row.len() == layout.headers.len()));
}

#[test]
fn empty_period_keeps_fixed_headers() {
    let store = MemoryStore::new().with_ticket(
        Ticket::parent("T-001", "March").dates(date(2024, 3, 1), date(2024, 3, 31)),
    );
    let layout = GanttLayoutBuilder::new(date(2024, 4, 1))
        .detail_column(DetailColumn::None)
        .build(april(), &store, &ColorSettings::default(), &NoHolidays)
        .unwrap();

    assert!(layout.is_empty());
    assert!(layout.backgrounds.is_empty());
    assert!(layout.date_range.is_empty());
    assert_eq!(
        layout.headers,
        vec!["Parent", "Child", "Assignee", "Status", "Start", "End"]
    );
    assert_eq!(
        layout.header_backgrounds,
        vec![ColorSettings::default().header_background; 6]
    );
}

#[test]
fn parents_with_equal_dates_sort_by_id() {
    let span = (date(2024, 4, 1), date(2024, 4, 5));
    let store = MemoryStore::new()
        .with_ticket(Ticket::parent("T-003", "C").dates(span.0, span.1))
        .with_ticket(Ticket::parent("T-001", "A").dates(span.0, span.1))
        .with_ticket(Ticket::parent("T-002", "B").dates(span.0, span.1));

    let layout = GanttLayoutBuilder::new(date(2024, 4, 1)).build(
        april(),
        &store,
        &ColorSettings::default(),
        &NoHolidays,
    ).unwrap();

    let ids: Vec<&str> = layout.rows.iter().map(|r| r.ticket_id.as_str()).collect();
    assert_eq!(ids, vec!["T-001", "T-002", "T-003"]);
}

#[test]
fn numeric_ids_sort_past_padding_width() {
    let span = (date(2024, 4, 1), date(2024, 4, 5));
    let store = MemoryStore::new()
        .with_ticket(Ticket::parent("T-1000", "Late id").dates(span.0, span.1))
        .with_ticket(Ticket::parent("T-002", "Early id").dates(span.0, span.1));

    let layout = GanttLayoutBuilder::new(date(2024, 4, 1)).build(
        april(),
        &store,
        &ColorSettings::default(),
        &NoHolidays,
    ).unwrap();

    let ids: Vec<&str> = layout.rows.iter().map(|r| r.ticket_id.as_str()).collect();
    assert_eq!(ids, vec!["T-002", "T-1000"]);
}

#[test]
fn children_sorted_by_start_under_their_parent() {
    let store = MemoryStore::new()
        .with_ticket(Ticket::parent("T-001", "Release").dates(date(2024, 4, 1), date(2024, 4, 9)))
        .with_ticket(
            Ticket::child("T-002", "T-001", "Second").dates(date(2024, 4, 5), date(2024, 4, 9)),
        )
        .with_ticket(
            Ticket::child("T-003", "T-001", "First").dates(date(2024, 4, 1), date(2024, 4, 4)),
        );

    let layout = GanttLayoutBuilder::new(date(2024, 4, 1)).build(
        april(),
        &store,
        &ColorSettings::default(),
        &NoHolidays,
    ).unwrap();

    let names: Vec<&str> = layout.rows.iter().map(|r| r.child_name.as_str()).collect();
    assert_eq!(names, vec!["", "First", "Second"]);
}

/// Test: in-progress child over a weekend, overdue only on its end date
#[test]
fn cell_color_priorities() {
    let settings = ColorSettings::default();
    let store = MemoryStore::new()
        .with_ticket(Ticket::parent("T-001", "Release").dates(date(2024, 4, 4), date(2024, 4, 9)))
        .with_ticket(
            Ticket::child("T-002", "T-001", "Build")
                .status("inProgress")
                .dates(date(2024, 4, 5), date(2024, 4, 8)),
        );

    let layout = GanttLayoutBuilder::new(date(2024, 4, 20))
        .detail_column(DetailColumn::None)
        .build(april(), &store, &settings, &NoHolidays)
        .unwrap();

    let fixed = layout.fixed_column_count();
    let child = &layout.backgrounds[1];
    assert!(child[..fixed].iter().all(|c| *c == white()));

    let in_progress = Color::new("#4389c5");
    // 4/4 Thu .. 4/9 Tue
    assert_eq!(
        child[fixed..].to_vec(),
        vec![
            white(),
            in_progress.clone(),
            in_progress.clone(),
            in_progress,
            settings.overdue.clone(),
            white(),
        ]
    );

    let parent = &layout.backgrounds[0];
    assert_eq!(parent[fixed + 5], settings.overdue);
    assert_eq!(parent[fixed], settings.parent);
}

#[test]
fn completed_ticket_is_never_overdue() {
    let settings = ColorSettings::default();
    let store = MemoryStore::new().with_ticket(
        Ticket::parent("T-001", "Done")
            .status("completed")
            .dates(date(2024, 4, 1), date(2024, 4, 2)),
    );

    let layout = GanttLayoutBuilder::new(date(2024, 4, 20)).build(
        april(),
        &store,
        &settings,
        &NoHolidays,
    ).unwrap();

    let fixed = layout.fixed_column_count();
    assert_eq!(layout.backgrounds[0][fixed + 1], settings.parent);
    assert_eq!(layout.rows[0].status, "Completed");
}

#[test]
fn holidays_color_headers_and_empty_cells() {
    let settings = ColorSettings::default();
    let store = MemoryStore::new()
        .with_holiday(date(2024, 4, 29), "Showa Day")
        .with_ticket(Ticket::parent("T-001", "Release").dates(date(2024, 4, 26), date(2024, 4, 30)))
        .with_ticket(
            Ticket::child("T-002", "T-001", "Ship").dates(date(2024, 4, 30), date(2024, 4, 30)),
        );

    let layout = GanttLayoutBuilder::new(date(2024, 4, 1))
        .detail_column(DetailColumn::None)
        .build(april(), &store, &settings, &store)
        .unwrap();

    let fixed = layout.fixed_column_count();
    // 4/26 Fri, 4/27 Sat, 4/28 Sun, 4/29 holiday, 4/30 Tue
    assert_eq!(
        layout.header_backgrounds[fixed..].to_vec(),
        vec![
            settings.header_background.clone(),
            settings.saturday.clone(),
            settings.sunday.clone(),
            settings.sunday.clone(),
            settings.header_background.clone(),
        ]
    );
    assert_eq!(
        layout.backgrounds[1][fixed..].to_vec(),
        vec![
            white(),
            settings.saturday.clone(),
            settings.sunday.clone(),
            settings.holiday.clone(),
            Color::new("#ee7f77"),
        ]
    );
}

#[test]
fn today_policy_highlights_todays_column() {
    let settings = ColorSettings::default();
    let store = MemoryStore::new()
        .with_ticket(Ticket::parent("T-001", "Release").dates(date(2024, 4, 1), date(2024, 4, 3)))
        .with_ticket(
            Ticket::child("T-002", "T-001", "Early").dates(date(2024, 4, 1), date(2024, 4, 1)),
        );

    let layout = GanttLayoutBuilder::new(date(2024, 4, 2))
        .highlight(HighlightPolicy::Today)
        .build(april(), &store, &settings, &NoHolidays)
        .unwrap();

    let fixed = layout.fixed_column_count();
    // the child ended yesterday: no overdue mark, today's cell is highlighted
    assert_eq!(
        layout.backgrounds[1][fixed..].to_vec(),
        vec![Color::new("#ee7f77"), settings.today.clone(), white()]
    );
}

#[test]
fn three_state_labels_and_unknown_status() {
    let store = MemoryStore::new()
        .with_ticket(
            Ticket::parent("T-001", "Release")
                .status("inProgress")
                .dates(date(2024, 4, 1), date(2024, 4, 3)),
        )
        .with_ticket(
            Ticket::child("T-002", "T-001", "Legacy")
                .status("archived")
                .dates(date(2024, 4, 1), date(2024, 4, 1)),
        );

    let layout = GanttLayoutBuilder::new(date(2024, 4, 1))
        .statuses(StatusTable::three_state())
        .build(april(), &store, &ColorSettings::default(), &NoHolidays)
        .unwrap();

    assert_eq!(layout.rows[0].status, "In Progress");
    assert_eq!(layout.rows[1].status, "Not Started");
    let fixed = layout.fixed_column_count();
    assert_eq!(layout.backgrounds[1][fixed], Color::new("#ee7f77"));
}

#[test]
fn layout_serializes_frozen_field_names() {
    let store = MemoryStore::new().with_ticket(
        Ticket::parent("T-001", "Release")
            .assignee("alice")
            .dates(date(2024, 4, 1), date(2024, 4, 1)),
    );
    let layout = GanttLayoutBuilder::new(date(2024, 4, 1)).build(
        april(),
        &store,
        &ColorSettings::default(),
        &NoHolidays,
    ).unwrap();

    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["date_range"], serde_json::json!(["2024-04-01"]));
    assert_eq!(json["rows"][0]["start_date"], "2024/04/01");
    assert_eq!(json["rows"][0]["role"], "parent");
    assert_eq!(json["header_backgrounds"].as_array().unwrap().len(), 8);
}

#[test]
fn reversed_query_window_is_rejected() {
    let store = MemoryStore::new().with_ticket(
        Ticket::parent("T-001", "Release").dates(date(2024, 4, 1), date(2024, 4, 10)),
    );
    let err = GanttLayoutBuilder::new(date(2024, 4, 1))
        .build(
            DateSpan::unchecked(date(2024, 4, 30), date(2024, 4, 1)),
            &store,
            &ColorSettings::default(),
            &NoHolidays,
        )
        .unwrap_err();

    assert_eq!(err.kind(), "InvalidDateOrder");
}
