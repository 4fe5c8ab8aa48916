use crate::canvas::PdfCanvas;
use crate::font::FontFamily;
use crate::info::Info;
use crate::layout::{self, Canvas, FlowSummary, Margins};
use crate::pagesize::{self, PageSize};
use crate::table::{Table, TableOptions};
use crate::units::Pt;
use crate::PDFError;
use std::path::{Path, PathBuf};

/// Caption printed under the signer's name and date when none is given
pub const DEFAULT_SIGNATURE_CAPTION: &str = "Electronic Signature";

/// Page geometry and the base font size used to lay out a [Report]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    pub margins: Margins,
    /// Size of the signature block's text, and the gap left under the header image
    pub font_size: Pt,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page_size: pagesize::A4,
            margins: Margins::symmetric(Pt(54.0), Pt(36.0)),
            font_size: Pt(10.0),
        }
    }
}

impl LayoutConfig {
    /// The horizontal space available to tables, between the left and right margins
    pub fn usable_width(&self) -> Pt {
        self.page_size.0 - self.margins.horizontal()
    }
}

/// A signature image along with the signer's name, the date it was signed and a
/// caption, drawn after the last table of the report
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub image: PathBuf,
    pub name: String,
    pub date: String,
    pub caption: String,
}

impl Signature {
    pub fn new<P: Into<PathBuf>, N: Into<String>, D: Into<String>>(
        image: P,
        name: N,
        date: D,
    ) -> Signature {
        Signature {
            image: image.into(),
            name: name.into(),
            date: date.into(),
            caption: DEFAULT_SIGNATURE_CAPTION.to_string(),
        }
    }

    /// A signature stamped with `date`, written as `YYYY-MM-DD`
    pub fn dated<P: Into<PathBuf>, N: Into<String>>(
        image: P,
        name: N,
        date: chrono::NaiveDate,
    ) -> Signature {
        Signature::new(image, name, date.format("%Y-%m-%d").to_string())
    }

    pub fn caption<S: Into<String>>(mut self, caption: S) -> Signature {
        self.caption = caption.into();
        self
    }
}

/// A report is a series of logical pages, each holding a series of tables. Tables
/// flow down the page and onto as many physical pages as they need; every logical
/// page starts on a fresh physical page.
///
/// Reports are built up first and then laid out with [Report::render] (onto any
/// [Canvas]) or [Report::build] (straight into a PDF file).
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub pages: Vec<Vec<Table>>,
    pub config: LayoutConfig,
    /// Image drawn centred at the top of the first physical page of every logical page
    pub header_image: Option<PathBuf>,
    pub signature: Option<Signature>,
    pub info: Option<Info>,
}

impl Default for Report {
    fn default() -> Self {
        Report::new()
    }
}

impl Report {
    /// Create an empty report with a single, empty logical page
    pub fn new() -> Report {
        Report {
            pages: vec![Vec::new()],
            config: LayoutConfig::default(),
            header_image: None,
            signature: None,
            info: None,
        }
    }

    /// Start a new logical page; tables added after this land on it
    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    /// Append a new table to the last logical page, returning it so rows can be added
    pub fn add_table(&mut self, options: TableOptions) -> &mut Table {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        let page = &mut self.pages[last];
        page.push(Table::new(options));
        let table = page.len() - 1;
        &mut page[table]
    }

    pub fn set_header_image<P: Into<PathBuf>>(&mut self, path: P) {
        self.header_image = Some(path.into());
    }

    pub fn set_signature(&mut self, signature: Signature) {
        self.signature = Some(signature);
    }

    pub fn set_font_size<P: Into<Pt>>(&mut self, size: P) {
        self.config.font_size = size.into();
    }

    pub fn set_paper_size(&mut self, size: PageSize) {
        self.config.page_size = size;
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.config.margins = margins;
    }

    /// Sets the document information written into the PDF. If not provided, no
    /// information block will be written
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Lay the report out onto `canvas`
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<FlowSummary, PDFError> {
        layout::lay_out_report(self, canvas)
    }

    /// Lay the report out in the given fonts and save it as a PDF at `path`
    pub fn build<P: AsRef<Path>>(
        &self,
        fonts: FontFamily,
        path: P,
    ) -> Result<FlowSummary, PDFError> {
        let mut canvas = PdfCanvas::new(fonts);
        if let Some(info) = &self.info {
            canvas.set_info(info.clone());
        }
        let summary = self.render(&mut canvas)?;
        canvas.save(path)?;
        log::info!("wrote {} pages", summary.pages);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellOptions, RowOptions};
    use pretty_assertions::assert_eq;

    #[test]
    fn reports_start_with_one_empty_page() {
        let report = Report::new();
        assert_eq!(report.pages.len(), 1);
        assert!(report.pages[0].is_empty());
        assert_eq!(report.config.page_size, pagesize::A4);
        assert_eq!(report.config.font_size, Pt(10.0));
    }

    #[test]
    fn tables_go_on_the_last_page() {
        let mut report = Report::new();
        report.add_table(TableOptions::default());
        report.add_page();
        report
            .add_table(TableOptions::default())
            .add_row(RowOptions::default())
            .add_col("hi", CellOptions::default());
        report.add_table(TableOptions::default());

        assert_eq!(report.pages[0].len(), 1);
        assert_eq!(report.pages[1].len(), 2);
        assert_eq!(report.pages[1][0].row_count(), 1);
    }

    #[test]
    fn usable_width_excludes_the_margins() {
        let config = LayoutConfig {
            page_size: (Pt(600.0), Pt(800.0)),
            margins: Margins::trbl(Pt(10.0), Pt(20.0), Pt(10.0), Pt(30.0)),
            font_size: Pt(10.0),
        };
        assert_eq!(config.usable_width(), Pt(550.0));
    }

    #[test]
    fn reports_can_be_shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Report>();
    }

    #[test]
    fn dated_signatures_use_iso_dates() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let signature = Signature::dated("sig.png", "Dr. Jane Doe", date);
        assert_eq!(signature.date, "2024-03-07");
        assert_eq!(signature.caption, DEFAULT_SIGNATURE_CAPTION);
        assert_eq!(signature.caption("Signed").caption, "Signed");
    }
}
