use crate::colour::colours;
use crate::font::FontStyle;
use crate::layout::{column_widths, wrap_text, Canvas};
use crate::rect::Rect;
use crate::report::{LayoutConfig, Report, Signature};
use crate::table::{CellAlign, Row, Table, TableAlign};
use crate::units::Pt;
use crate::PDFError;
use std::path::Path;

/// Images are measured in pixels at 96 DPI
const POINTS_PER_PIXEL: f32 = 0.75;

/// Signature images are scaled down to at most this wide
pub const SIGNATURE_MAX_WIDTH: Pt = Pt(150.0);

/// Room left under the signature image for its three lines of text
const SIGNATURE_TEXT_HEIGHT: Pt = Pt(33.0);

/// What the flow engine produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSummary {
    /// Number of physical pages started on the canvas
    pub pages: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// A page has been started but nothing has been drawn on it yet
    AtTopOfPage,
    /// Rows have been drawn on the current page
    MidTable,
    /// The current page is full, or no page has been started at all
    NeedsNewPage,
}

/// Where the engine is: the baseline of the next row on the current page
#[derive(Debug, Clone, Copy, PartialEq)]
struct FlowState {
    cursor: Pt,
    pages: usize,
    phase: Phase,
}

struct PageFlow<'a, C: Canvas + ?Sized> {
    config: &'a LayoutConfig,
    canvas: &'a mut C,
    state: FlowState,
}

/// Lay out every table of the report onto `canvas`, breaking onto new pages as the
/// current one fills up, then draw the signature block if there is one.
///
/// Logical pages without any tables are skipped entirely. Column widths for every
/// table are solved before drawing it; a table whose columns can't fit the usable
/// width fails the whole layout with [PDFError::Layout].
pub fn lay_out_report<C: Canvas + ?Sized>(
    report: &Report,
    canvas: &mut C,
) -> Result<FlowSummary, PDFError> {
    let mut flow = PageFlow {
        config: &report.config,
        canvas,
        state: FlowState {
            cursor: Pt(0.0),
            pages: 0,
            phase: Phase::NeedsNewPage,
        },
    };

    for tables in report.pages.iter().filter(|tables| !tables.is_empty()) {
        flow.start_logical_page(report.header_image.as_deref())?;
        for table in tables.iter() {
            flow.table(table)?;
        }
    }

    if let Some(signature) = &report.signature {
        flow.signature(signature)?;
    }

    Ok(FlowSummary {
        pages: flow.state.pages,
    })
}

impl<'a, C: Canvas + ?Sized> PageFlow<'a, C> {
    fn page_height(&self) -> Pt {
        self.config.page_size.1
    }

    /// Rows stop flowing once their baseline reaches this height
    fn bottom_limit(&self) -> Pt {
        self.config.margins.bottom / 2.0
    }

    fn top_of_page(&self) -> Pt {
        self.page_height() - self.config.margins.top
    }

    fn open_page(&mut self, cursor: Pt) {
        self.canvas.new_page(self.config.page_size);
        self.state = FlowState {
            cursor,
            pages: self.state.pages + 1,
            phase: Phase::AtTopOfPage,
        };
        log::debug!("started page {} at {:?}", self.state.pages, cursor);
    }

    fn start_logical_page(&mut self, header: Option<&Path>) -> Result<(), PDFError> {
        self.open_page(self.top_of_page());
        if let Some(header) = header {
            let image_bottom = self.header(header)?;
            self.state.cursor = image_bottom - self.config.font_size * 2.0;
        }
        Ok(())
    }

    /// Draw the header image centred at the top of the page, returning its bottom edge
    fn header(&mut self, path: &Path) -> Result<Pt, PDFError> {
        let (mut width, mut height) = self.image_size(path)?;
        let usable = self.config.usable_width();
        if width > usable {
            let scale = usable.0 / width.0;
            width *= scale;
            height *= scale;
        }

        let left = (self.config.page_size.0 - width) / 2.0;
        let top = self.page_height() - self.config.margins.top / 2.0;
        let bottom = top - height;
        self.canvas
            .draw_image(path, Rect::from_edges(left, bottom, left + width, top))?;
        Ok(bottom)
    }

    fn image_size(&mut self, path: &Path) -> Result<(Pt, Pt), PDFError> {
        let (width, height) = self.canvas.measure_image(path)?;
        Ok((
            Pt(width as f32 * POINTS_PER_PIXEL),
            Pt(height as f32 * POINTS_PER_PIXEL),
        ))
    }

    fn table(&mut self, table: &Table) -> Result<(), PDFError> {
        let usable = self.config.usable_width();
        let widths = column_widths(table, &*self.canvas, usable)?;
        let table_width: Pt = widths.iter().copied().sum();

        if table.options.no_wrap
            && self.state.phase == Phase::MidTable
            && table.height() > self.state.cursor - self.bottom_limit()
        {
            log::debug!(
                "moving unbreakable table of height {:?} to a new page",
                table.height()
            );
            self.open_page(self.top_of_page());
        }

        let left = match table.options.align {
            TableAlign::Center => (usable - table_width).max(Pt(0.0)) / 2.0,
            TableAlign::Left | TableAlign::Justify => Pt(0.0),
        };
        let left = self.config.margins.left + left;

        for row in table.rows.iter() {
            if self.state.cursor <= self.bottom_limit() {
                self.state.phase = Phase::NeedsNewPage;
            }
            if self.state.phase == Phase::NeedsNewPage {
                self.open_page(self.top_of_page());
            }
            self.row(table, row, &widths, left);
        }

        Ok(())
    }

    /// Draw one row at the cursor, with `widths` holding a width for every slot of the
    /// table's grid.
    ///
    /// Centred and right-aligned cells are placed using the width of each wrapped line
    /// rather than the width of the cell's whole text, so every line of a wrapped cell
    /// sits inside its column.
    fn row(&mut self, table: &Table, row: &Row, widths: &[Pt], left: Pt) {
        let row_height = row.height();
        let cursor = self.state.cursor;
        let mut x = left;
        let mut line_count = 0usize;

        for (cell, slot) in row.slots(table.column_count()) {
            let options = &cell.options;
            let style = options.style();
            let size = options.effective_size();
            let width: Pt = slot.slots().filter_map(|i| widths.get(i)).copied().sum();

            let lines = wrap_text(&cell.text, width, &*self.canvas, style, size);
            line_count = line_count.max(lines.len());

            self.canvas
                .set_fill_colour(options.color.unwrap_or(colours::BLACK));
            self.canvas.set_font(style, size);

            if let Some(colour) = options.border_right {
                self.canvas.set_line_colour(colour);
                self.canvas
                    .draw_line((x + width, cursor + size), (x + width, cursor));
            }

            if table.options.debug {
                for i in 0..lines.len() {
                    let baseline = cursor - row_height * i as f32;
                    self.canvas.draw_rectangle_stroke(Rect::from_edges(
                        x,
                        baseline,
                        x + width,
                        baseline + row_height,
                    ));
                }
            }

            if row.options.underline {
                let y = cursor - Pt(2.0);
                self.canvas.draw_line((x, y), (x + width, y));
            }

            for (i, line) in lines.iter().enumerate() {
                let line_width = self.canvas.text_width(style, size, line);
                let start = match options.align {
                    CellAlign::Left => x,
                    CellAlign::Center => x + (width - line_width) / 2.0,
                    CellAlign::Right => x + width - line_width,
                };
                self.canvas.draw_text(
                    line,
                    start + options.indent_left,
                    cursor - row_height * i as f32,
                );
            }

            x += width;
        }

        self.state.cursor -= row_height * line_count.max(1) as f32;
        self.state.phase = Phase::MidTable;
    }

    fn signature(&mut self, signature: &Signature) -> Result<(), PDFError> {
        if self.state.pages == 0 {
            self.open_page(self.top_of_page());
        }

        let (mut width, mut height) = self.image_size(&signature.image)?;
        if width > SIGNATURE_MAX_WIDTH {
            let scale = SIGNATURE_MAX_WIDTH.0 / width.0;
            width *= scale;
            height *= scale;
        }

        // keep the signature block together
        if self.state.cursor - (height + SIGNATURE_TEXT_HEIGHT) < self.bottom_limit() {
            log::debug!("moving signature to a new page");
            self.open_page(self.page_height() - self.config.margins.top / 2.0);
        }

        let x = self.config.margins.left;
        let top = self.state.cursor - Pt(5.0);
        let bottom = top - height;
        self.canvas
            .draw_image(&signature.image, Rect::from_edges(x, bottom, x + width, top))?;

        let font_size = self.config.font_size;
        self.canvas.set_fill_colour(colours::BLACK);
        self.canvas.set_font(FontStyle::Regular, font_size);
        self.canvas.draw_text(&signature.name, x, bottom - font_size);
        self.canvas
            .draw_text(&signature.date, x, bottom - Pt(1.0) - font_size * 2.0);
        let caption_baseline = bottom - Pt(1.0) - font_size * 3.0;
        self.canvas.draw_text(&signature.caption, x, caption_baseline);

        self.state.cursor = caption_baseline;
        self.state.phase = Phase::MidTable;
        Ok(())
    }
}
