//! Plain text grid for console output
//!
//! Each calendar column is as wide as its `M/D` label. In-range days are
//! drawn with `#`, the end date of an overdue ticket with `!`, and colored
//! out-of-range days (weekends, holidays, today) with `.`.

use ticketgantt_core::Color;

use crate::layout::GanttLayout;
use crate::{LayoutRenderer, RenderError};

/// Plain text renderer
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Column separator
    pub separator: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            separator: " | ".into(),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    fn fixed_widths(&self, layout: &GanttLayout) -> Vec<usize> {
        let fixed = layout.fixed_column_count();
        let mut widths: Vec<usize> = layout.headers[..fixed]
            .iter()
            .map(|h| h.chars().count())
            .collect();
        for row in &layout.rows {
            for (width, cell) in widths.iter_mut().zip(row.fixed_cells(layout.detail)) {
                *width = (*width).max(first_line(cell).chars().count());
            }
        }
        widths
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

impl LayoutRenderer for TextRenderer {
    type Output = String;

    fn render(&self, layout: &GanttLayout) -> Result<String, RenderError> {
        let fixed = layout.fixed_column_count();
        let widths = self.fixed_widths(layout);
        let date_headers = &layout.headers[fixed..];
        let white = Color::white();

        let mut out = String::new();

        let header: Vec<String> = layout.headers[..fixed]
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .chain(date_headers.iter().cloned())
            .collect();
        out.push_str(header.join(&self.separator).trim_end());
        out.push('\n');

        for (row, colors) in layout.rows.iter().zip(&layout.backgrounds) {
            let mut cells: Vec<String> = row
                .fixed_cells(layout.detail)
                .into_iter()
                .zip(&widths)
                .map(|(c, w)| pad(first_line(c), *w))
                .collect();

            for ((date, label), color) in layout
                .date_range
                .iter()
                .zip(date_headers)
                .zip(&colors[fixed..])
            {
                let mark = if row.overdue && *date == row.span.end {
                    '!'
                } else if row.span.contains(*date) {
                    '#'
                } else if *color != white {
                    '.'
                } else {
                    ' '
                };
                cells.push(std::iter::repeat(mark).take(label.chars().count()).collect());
            }
            while cells.len() > fixed && cells.last().is_some_and(|c| c.trim().is_empty()) {
                cells.pop();
            }

            out.push_str(cells.join(&self.separator).trim_end());
            out.push('\n');
        }

        Ok(out)
    }
}
