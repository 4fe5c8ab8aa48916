use crate::colour::Colour;
use crate::font::FontStyle;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;
use std::path::Path;

/// Measures how wide a run of text will be once rendered
pub trait GlyphMetrics {
    /// The rendered width of `text` set in the given style at `size`
    fn text_width(&self, style: FontStyle, size: Pt, text: &str) -> Pt;
}

/// Something the layout engine can draw onto. Calls arrive in drawing order
/// (left to right, top to bottom) and always target the most recently started
/// page; later calls may paint over earlier ones.
///
/// Coordinates are in PDF user space: the origin is the bottom-left corner of
/// the page and y grows upwards. Text is positioned by its baseline.
pub trait Canvas: GlyphMetrics {
    /// Start a new page; all further drawing goes to it
    fn new_page(&mut self, size: PageSize);

    /// The intrinsic size of the image at `path`, in pixels
    fn measure_image(&mut self, path: &Path) -> Result<(u32, u32), PDFError>;

    /// Draw the image at `path`, stretched to fill `position`
    fn draw_image(&mut self, path: &Path, position: Rect) -> Result<(), PDFError>;

    /// Set the colour used to fill text
    fn set_fill_colour(&mut self, colour: Colour);

    /// Set the colour used to stroke lines and rectangles
    fn set_line_colour(&mut self, colour: Colour);

    /// Set the font that following text is drawn in
    fn set_font(&mut self, style: FontStyle, size: Pt);

    fn draw_text(&mut self, text: &str, x: Pt, y: Pt);

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt));

    /// Stroke the outline of `rect` without filling it
    fn draw_rectangle_stroke(&mut self, rect: Rect);
}
