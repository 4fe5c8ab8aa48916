#![allow(dead_code)]

use pdf_tables::layout::{Canvas, GlyphMetrics, Margins};
use pdf_tables::pagesize::PageSize;
use pdf_tables::{Colour, FontStyle, LayoutConfig, PDFError, Pt, Rect};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Everything the layout engine asked the canvas to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    NewPage(PageSize),
    Image(PathBuf, Rect),
    FillColour(Colour),
    LineColour(Colour),
    Font(FontStyle, Pt),
    Text(String, Pt, Pt),
    Line((Pt, Pt), (Pt, Pt)),
    Rectangle(Rect),
}

/// A canvas that records its calls. Every character is half the font size wide,
/// whatever the style.
#[derive(Default)]
pub struct RecordingCanvas {
    pub calls: Vec<Call>,
    pub images: HashMap<PathBuf, (u32, u32)>,
}

impl RecordingCanvas {
    pub fn new() -> RecordingCanvas {
        RecordingCanvas::default()
    }

    pub fn with_image<P: Into<PathBuf>>(mut self, path: P, width: u32, height: u32) -> Self {
        self.images.insert(path.into(), (width, height));
        self
    }

    pub fn page_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::NewPage(_)))
            .count()
    }

    /// Every piece of text drawn along with the page (counting from 1) it landed on
    pub fn texts(&self) -> Vec<(usize, String, Pt, Pt)> {
        let mut page = 0;
        let mut texts = Vec::new();
        for call in self.calls.iter() {
            match call {
                Call::NewPage(_) => page += 1,
                Call::Text(text, x, y) => texts.push((page, text.clone(), *x, *y)),
                _ => {}
            }
        }
        texts
    }

    /// The first drawn text exactly matching `text`
    pub fn text(&self, text: &str) -> (usize, Pt, Pt) {
        self.texts()
            .into_iter()
            .find(|(_, t, _, _)| t == text)
            .map(|(page, _, x, y)| (page, x, y))
            .unwrap_or_else(|| panic!("`{text}` was never drawn"))
    }

    pub fn lines(&self) -> Vec<((Pt, Pt), (Pt, Pt))> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Line(from, to) => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn rectangles(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Rectangle(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn drawn_images(&self) -> Vec<(usize, PathBuf, Rect)> {
        let mut page = 0;
        let mut images = Vec::new();
        for call in self.calls.iter() {
            match call {
                Call::NewPage(_) => page += 1,
                Call::Image(path, rect) => images.push((page, path.clone(), *rect)),
                _ => {}
            }
        }
        images
    }
}

impl GlyphMetrics for RecordingCanvas {
    fn text_width(&self, _style: FontStyle, size: Pt, text: &str) -> Pt {
        Pt(text.chars().count() as f32 * size.0 * 0.5)
    }
}

impl Canvas for RecordingCanvas {
    fn new_page(&mut self, size: PageSize) {
        self.calls.push(Call::NewPage(size));
    }

    fn measure_image(&mut self, path: &Path) -> Result<(u32, u32), PDFError> {
        self.images.get(path).copied().ok_or_else(|| {
            PDFError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                path.display().to_string(),
            ))
        })
    }

    fn draw_image(&mut self, path: &Path, position: Rect) -> Result<(), PDFError> {
        self.calls.push(Call::Image(path.to_path_buf(), position));
        Ok(())
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.calls.push(Call::FillColour(colour));
    }

    fn set_line_colour(&mut self, colour: Colour) {
        self.calls.push(Call::LineColour(colour));
    }

    fn set_font(&mut self, style: FontStyle, size: Pt) {
        self.calls.push(Call::Font(style, size));
    }

    fn draw_text(&mut self, text: &str, x: Pt, y: Pt) {
        self.calls.push(Call::Text(text.to_string(), x, y));
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt)) {
        self.calls.push(Call::Line(from, to));
    }

    fn draw_rectangle_stroke(&mut self, rect: Rect) {
        self.calls.push(Call::Rectangle(rect));
    }
}

/// A 600 x 400 page with 50pt margins all round: tables get 500pt of width, the first
/// row sits at y = 350 and rows stop flowing at y = 25
pub fn small_page() -> LayoutConfig {
    LayoutConfig {
        page_size: (Pt(600.0), Pt(400.0)),
        margins: Margins::all(Pt(50.0)),
        font_size: Pt(10.0),
    }
}

#[track_caller]
pub fn assert_close(actual: Pt, expected: f32) {
    assert!(
        (actual.0 - expected).abs() < 1e-3,
        "expected {expected}, got {}",
        actual.0
    );
}
