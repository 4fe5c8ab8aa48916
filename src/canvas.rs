use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::{FontFamily, FontStyle};
use crate::image::Image;
use crate::info::Info;
use crate::layout::{Canvas, GlyphMetrics};
use crate::page::{ImageLayout, Page, ShapeLayout, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;
use id_arena::Id;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A [Canvas] that draws into a PDF [Document], measuring text with the document's fonts.
///
/// Images are loaded from disk the first time they are used and embedded once, no
/// matter how many pages draw them.
pub struct PdfCanvas {
    document: Document,
    page: Option<Page>,
    fill_colour: Colour,
    line_colour: Colour,
    font: SpanFont,
    images: HashMap<PathBuf, Id<Image>>,
}

impl PdfCanvas {
    pub fn new(fonts: FontFamily) -> PdfCanvas {
        PdfCanvas {
            document: Document::new(fonts),
            page: None,
            fill_colour: colours::BLACK,
            line_colour: colours::BLACK,
            font: SpanFont {
                style: FontStyle::Regular,
                size: Pt(10.0),
            },
            images: HashMap::new(),
        }
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    /// Number of pages started so far
    pub fn page_count(&self) -> usize {
        self.document.page_count() + usize::from(self.page.is_some())
    }

    /// Finish the page being drawn and hand back the whole document
    pub fn into_document(mut self) -> Document {
        if let Some(page) = self.page.take() {
            self.document.add_page(page);
        }
        self.document
    }

    /// Write the PDF to `w`
    pub fn write<W: Write>(self, w: W) -> Result<(), PDFError> {
        self.into_document().write(w)
    }

    /// Write the PDF to a file at `path`, replacing it if it already exists
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<(), PDFError> {
        let file = File::create(path.as_ref())?;
        let mut w = BufWriter::new(file);
        self.write(&mut w)?;
        w.flush()?;
        Ok(())
    }

    fn image(&mut self, path: &Path) -> Result<Id<Image>, PDFError> {
        if let Some(id) = self.images.get(path) {
            return Ok(*id);
        }
        let image = Image::new_from_disk(path)?;
        log::debug!(
            "loaded {}x{} image from {}",
            image.width,
            image.height,
            path.display()
        );
        let id = self.document.add_image(image);
        self.images.insert(path.to_path_buf(), id);
        Ok(id)
    }

    fn current_page(&mut self) -> Option<&mut Page> {
        if self.page.is_none() {
            log::warn!("drawing before any page was started; ignoring");
        }
        self.page.as_mut()
    }
}

impl GlyphMetrics for PdfCanvas {
    fn text_width(&self, style: FontStyle, size: Pt, text: &str) -> Pt {
        self.document.fonts.text_width(style, size, text)
    }
}

impl Canvas for PdfCanvas {
    fn new_page(&mut self, size: PageSize) {
        if let Some(page) = self.page.replace(Page::new(size)) {
            self.document.add_page(page);
        }
    }

    fn measure_image(&mut self, path: &Path) -> Result<(u32, u32), PDFError> {
        let id = self.image(path)?;
        let image = &self.document.images[id];
        Ok((image.width, image.height))
    }

    fn draw_image(&mut self, path: &Path, position: Rect) -> Result<(), PDFError> {
        let image_id = self.image(path)?;
        let page = self.page.as_mut().ok_or(PDFError::PageMissing)?;
        page.add_image(ImageLayout { image_id, position });
        Ok(())
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.fill_colour = colour;
    }

    fn set_line_colour(&mut self, colour: Colour) {
        self.line_colour = colour;
    }

    fn set_font(&mut self, style: FontStyle, size: Pt) {
        self.font = SpanFont { style, size };
    }

    fn draw_text(&mut self, text: &str, x: Pt, y: Pt) {
        let span = SpanLayout {
            text: text.to_string(),
            font: self.font,
            colour: self.fill_colour,
            coords: (x, y),
        };
        if let Some(page) = self.current_page() {
            page.add_span(span);
        }
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt)) {
        let colour = self.line_colour;
        if let Some(page) = self.current_page() {
            page.add_shape(ShapeLayout::Line { from, to, colour });
        }
    }

    fn draw_rectangle_stroke(&mut self, rect: Rect) {
        let colour = self.line_colour;
        if let Some(page) = self.current_page() {
            page.add_shape(ShapeLayout::RectangleStroke { rect, colour });
        }
    }
}
