//! Table layout: sizing columns, wrapping cell text and flowing rows onto pages.
//!
//! Layout works against the [Canvas] trait rather than a PDF directly, so the
//! same report can be drawn into a PDF with [PdfCanvas](crate::PdfCanvas) or
//! into anything else that can measure text and draw lines, text and images.
//!
//! # Layout Functions
//!
//! - [`column_widths`](crate::layout::column_widths) - solve every column's width so the table fits
//!   the page
//! - [`wrap_text`](crate::layout::wrap_text) - break a cell's text into lines that fit its column
//! - [`lay_out_report`](crate::layout::lay_out_report) - paginate a whole report onto a canvas
//!
//! # Example
//!
//! ```
//! use pdf_tables::{FontStyle, Pt};
//! use pdf_tables::layout::{wrap_text, GlyphMetrics};
//!
//! struct Monospace;
//!
//! impl GlyphMetrics for Monospace {
//!     fn text_width(&self, _style: FontStyle, size: Pt, text: &str) -> Pt {
//!         Pt(text.chars().count() as f32 * size.0 * 0.5)
//!     }
//! }
//!
//! let lines = wrap_text(
//!     "the quick brown fox",
//!     Pt(50.0),
//!     &Monospace,
//!     FontStyle::Regular,
//!     Pt(10.0),
//! );
//! assert_eq!(lines, vec!["the quick", "brown fox"]);
//! ```

mod canvas;
pub use canvas::*;

mod columns;
pub use columns::*;

mod flow;
pub use flow::*;

mod margins;
pub use margins::*;

mod text;
pub use text::*;
