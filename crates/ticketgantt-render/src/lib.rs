//! # ticketgantt-render
//!
//! Gantt layout and output backends for ticketgantt.
//!
//! This crate provides:
//! - Cell and header color rules (`ColorRuleEngine`)
//! - The layout builder: filtered, ordered rows plus background matrices
//! - Plain text output for the console
//! - Excel output with the computed cell fills
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ticketgantt_core::{ColorSettings, DateSpan, MemoryStore, NoHolidays, Ticket};
//! use ticketgantt_render::{GanttLayoutBuilder, LayoutRenderer, TextRenderer};
//!
//! let date = |d| NaiveDate::from_ymd_opt(2024, 4, d).unwrap();
//! let store = MemoryStore::new()
//!     .with_ticket(Ticket::parent("T-001", "Release").dates(date(1), date(3)));
//!
//! let layout = GanttLayoutBuilder::new(date(1)).build(
//!     DateSpan::new(date(1), date(30)).unwrap(),
//!     &store,
//!     &ColorSettings::default(),
//!     &NoHolidays,
//! ).unwrap();
//! assert_eq!(layout.date_range.len(), 3);
//!
//! let text = TextRenderer::new().render(&layout).unwrap();
//! assert!(text.contains("Release"));
//! ```

pub mod color;
pub mod excel;
pub mod layout;
pub mod text;

pub use color::{CalendarFacts, Cell, ColorRule, ColorRuleEngine, HighlightPolicy, RowRole};
pub use excel::ExcelRenderer;
pub use layout::{fixed_headers, DetailColumn, GanttLayout, GanttLayoutBuilder, RowData};
pub use text::TextRenderer;

use thiserror::Error;

/// Writes a finished layout in some output format
pub trait LayoutRenderer {
    type Output;

    fn render(&self, layout: &GanttLayout) -> Result<Self::Output, RenderError>;
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}
