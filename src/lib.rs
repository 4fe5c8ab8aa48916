//! Lays out tables of text onto fixed-size pages and writes them out as PDFs.
//!
//! A [Report] is built up from logical pages of [Table]s; each table is a list of
//! [Row]s of text cells which may span several columns. Laying the report out sizes
//! every table's columns to fit the page, wraps cell text onto as many lines as it
//! needs and flows the rows down the page, starting new pages as they fill up.
//!
//! ```no_run
//! use pdf_tables::{CellOptions, FontFamily, Report, RowOptions, TableOptions};
//!
//! let fonts = FontFamily::load(
//!     std::fs::read("fonts/Regular.ttf").unwrap(),
//!     std::fs::read("fonts/Bold.ttf").unwrap(),
//! )
//! .unwrap();
//!
//! let mut report = Report::new();
//! report
//!     .add_table(TableOptions::default())
//!     .add_row(RowOptions::default())
//!     .add_col("Patient", CellOptions::default().bold())
//!     .add_col("Jane Doe", CellOptions::default());
//! report.build(fonts, "report.pdf").unwrap();
//! ```

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Column sizing, text wrapping and pagination of tables onto a [layout::Canvas]
pub mod layout;

mod page;
pub use page::*;

/// Standard paper sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod report;
pub use report::*;

mod table;
pub use table::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
