//! Excel Gantt sheet renderer
//!
//! Writes a `GanttLayout` to a single worksheet: the header row, one row per
//! layout row, and the computed background of every cell. Calendar cells are
//! left blank and carry only their fill.

use std::collections::HashMap;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use ticketgantt_core::Color;
use tracing::debug;

use crate::layout::GanttLayout;
use crate::{LayoutRenderer, RenderError};

const WHITE_RGB: u32 = 0xFFFFFF;

/// Excel renderer configuration
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Worksheet name
    pub sheet_name: String,
    /// Draw thin borders around every cell
    pub borders: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            sheet_name: "Gantt".into(),
            borders: true,
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    pub fn no_borders(mut self) -> Self {
        self.borders = false;
        self
    }

    /// Generate workbook bytes
    pub fn render_to_bytes(&self, layout: &GanttLayout) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let mut formats = FormatCache::new(self.borders);

        let sheet = workbook.add_worksheet();
        sheet
            .set_name(&self.sheet_name)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        self.write_header(sheet, layout, &mut formats)?;
        self.write_rows(sheet, layout, &mut formats)?;

        debug!(
            rows = layout.rows.len(),
            columns = layout.headers.len(),
            formats = formats.len(),
            "excel sheet written"
        );

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    fn write_header(
        &self,
        sheet: &mut Worksheet,
        layout: &GanttLayout,
        formats: &mut FormatCache,
    ) -> Result<(), RenderError> {
        for (col, (label, color)) in layout
            .headers
            .iter()
            .zip(&layout.header_backgrounds)
            .enumerate()
        {
            let format = formats.header(color);
            sheet
                .write_with_format(0, column(col)?, label.as_str(), format)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }
        Ok(())
    }

    fn write_rows(
        &self,
        sheet: &mut Worksheet,
        layout: &GanttLayout,
        formats: &mut FormatCache,
    ) -> Result<(), RenderError> {
        let fixed = layout.fixed_column_count();
        for (index, (row, colors)) in layout.rows.iter().zip(&layout.backgrounds).enumerate() {
            let row_num = u32::try_from(index + 1)
                .map_err(|_| RenderError::Format("too many rows for a worksheet".into()))?;

            for (col, (text, color)) in row
                .fixed_cells(layout.detail)
                .into_iter()
                .zip(&colors[..fixed])
                .enumerate()
            {
                sheet
                    .write_with_format(row_num, column(col)?, text, formats.cell(color))
                    .map_err(|e| RenderError::Format(e.to_string()))?;
            }

            for (offset, color) in colors[fixed..].iter().enumerate() {
                sheet
                    .write_blank(row_num, column(fixed + offset)?, formats.cell(color))
                    .map_err(|e| RenderError::Format(e.to_string()))?;
            }
        }
        Ok(())
    }
}

impl LayoutRenderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, layout: &GanttLayout) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(layout)
    }
}

fn column(index: usize) -> Result<u16, RenderError> {
    u16::try_from(index).map_err(|_| RenderError::Format("too many columns for a worksheet".into()))
}

/// One `Format` per (role, fill) pair
struct FormatCache {
    borders: bool,
    headers: HashMap<u32, Format>,
    cells: HashMap<u32, Format>,
}

impl FormatCache {
    fn new(borders: bool) -> Self {
        Self {
            borders,
            headers: HashMap::new(),
            cells: HashMap::new(),
        }
    }

    fn len(&self) -> usize {
        self.headers.len() + self.cells.len()
    }

    fn base(&self, rgb: u32) -> Format {
        let format = Format::new().set_background_color(rgb);
        if self.borders {
            format.set_border(FormatBorder::Thin)
        } else {
            format
        }
    }

    fn header(&mut self, color: &Color) -> &Format {
        let rgb = color.to_rgb().unwrap_or(WHITE_RGB);
        let base = self.base(rgb);
        self.headers
            .entry(rgb)
            .or_insert_with(|| base.set_bold().set_align(FormatAlign::Center))
    }

    fn cell(&mut self, color: &Color) -> &Format {
        let rgb = color.to_rgb().unwrap_or(WHITE_RGB);
        let base = self.base(rgb);
        self.cells.entry(rgb).or_insert(base)
    }
}
