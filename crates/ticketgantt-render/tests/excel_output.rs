//! Integration tests for the Excel renderer

use chrono::NaiveDate;
use ticketgantt_core::{ColorSettings, DateSpan, MemoryStore, NoHolidays, Ticket};
use ticketgantt_render::{DetailColumn, ExcelRenderer, GanttLayoutBuilder, LayoutRenderer};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn store() -> MemoryStore {
    MemoryStore::new()
        .with_ticket(
            Ticket::parent("T-001", "Release")
                .assignee("alice")
                .description("// needs sign-off")
                .dates(date(2024, 4, 1), date(2024, 4, 14)),
        )
        .with_ticket(
            Ticket::child("T-002", "T-001", "Build")
                .assignee("alice")
                .status("processed")
                .dates(date(2024, 4, 3), date(2024, 4, 9)),
        )
}

#[test]
fn workbook_is_a_zip_container() {
    let layout = GanttLayoutBuilder::new(date(2024, 4, 1)).build(
        DateSpan::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap(),
        &store(),
        &ColorSettings::default(),
        &NoHolidays,
    ).unwrap();

    let bytes = ExcelRenderer::new().render(&layout).unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert!(bytes.len() > 1000);
}

#[test]
fn renders_every_detail_column_mode() {
    for detail in [DetailColumn::None, DetailColumn::Description, DetailColumn::Memo] {
        let layout = GanttLayoutBuilder::new(date(2024, 4, 1))
            .detail_column(detail)
            .build(
                DateSpan::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap(),
                &store(),
                &ColorSettings::default(),
                &NoHolidays,
            )
            .unwrap();

        let bytes = ExcelRenderer::new()
            .sheet_name("April")
            .no_borders()
            .render_to_bytes(&layout)
            .unwrap();
        assert!(bytes.starts_with(b"PK"), "{detail:?} produced no workbook");
    }
}

#[test]
fn invalid_sheet_name_is_a_format_error() {
    let layout = GanttLayoutBuilder::new(date(2024, 4, 1)).build(
        DateSpan::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap(),
        &store(),
        &ColorSettings::default(),
        &NoHolidays,
    ).unwrap();

    let err = ExcelRenderer::new()
        .sheet_name("bad[name]")
        .render(&layout)
        .unwrap_err();
    assert!(err.to_string().starts_with("Format error"));
}
