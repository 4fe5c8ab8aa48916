use crate::units::Pt;
use thiserror::Error;

/// Failures of the layout engine itself. These describe tables that cannot be
/// laid out at all, as opposed to I/O or parsing problems.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The table's columns could not be shrunk to fit within the available width,
    /// usually because there are more columns than the page can hold
    #[error("layout impossible: columns totalling {total_width:?} still exceed {max_width:?} after {passes} shrink passes")]
    Unsatisfiable {
        passes: usize,
        total_width: Pt,
        max_width: Pt,
    },
}

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// The report could not be laid out
    Layout(#[from] LayoutError),

    #[error("page missing from the document")]
    /// A page referenced by the page order no longer exists in the document
    PageMissing,
}
