use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::{FontFamily, FontStyle};
use crate::image::Image;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::PDFError;
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf, Ref};

/// Which face of the document's [FontFamily] a span is set in, and how big
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub style: FontStyle,
    pub size: Pt,
}

/// A run of text placed with its baseline starting at `coords`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// A stroked line or rectangle outline
#[derive(Clone, PartialEq, Debug)]
pub enum ShapeLayout {
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        colour: Colour,
    },
    RectangleStroke {
        rect: Rect,
        colour: Colour,
    },
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    Shape(ShapeLayout),
}

/// A single physical page and everything drawn on it, in drawing order
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: size.0,
                y2: size.1,
            },
            contents: Vec::default(),
        }
    }

    /// Add a span of text. Consecutive spans are grouped together so they share
    /// font and colour state when rendered
    pub fn add_span(&mut self, span: SpanLayout) {
        match self.contents.last_mut() {
            Some(PageContents::Text(spans)) => spans.push(span),
            _ => self.contents.push(PageContents::Text(vec![span])),
        }
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_shape(&mut self, shape: ShapeLayout) {
        self.contents.push(PageContents::Shape(shape));
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        id: Ref,
        fonts: &FontFamily,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let parent = refs.get(RefType::PageTree).ok_or(PDFError::PageMissing)?;

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for style in FontStyle::ALL {
            let i = style.resource_index();
            if let Some(font_ref) = refs.get(RefType::Font(i)) {
                resource_fonts.pair(Name(format!("F{i}").as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects.pair(
                    Name(format!("I{}", image_id.index()).as_bytes()),
                    image_ref,
                );
            }
        }
        resource_xobjects.finish();
        resources.finish();

        let content_id = refs.gen(RefType::ContentForPage(page_index));
        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed =
            compress_to_vec_zlib(rendered.as_slice(), CompressionLevel::DefaultLevel as u8);
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::pagesize;
    use pretty_assertions::assert_eq;

    fn span(text: &str) -> SpanLayout {
        SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                style: FontStyle::Regular,
                size: Pt(10.0),
            },
            colour: colours::BLACK,
            coords: (Pt(0.0), Pt(0.0)),
        }
    }

    #[test]
    fn consecutive_spans_are_grouped() {
        let mut page = Page::new(pagesize::A4);
        page.add_span(span("a"));
        page.add_span(span("b"));
        page.add_shape(ShapeLayout::Line {
            from: (Pt(0.0), Pt(0.0)),
            to: (Pt(10.0), Pt(0.0)),
            colour: colours::BLACK,
        });
        page.add_span(span("c"));

        assert_eq!(page.contents.len(), 3);
        assert_eq!(
            page.contents[0],
            PageContents::Text(vec![span("a"), span("b")])
        );
    }

    #[test]
    fn media_box_matches_the_page_size() {
        let page = Page::new(pagesize::LETTER);
        assert_eq!(page.media_box.width(), Pt(8.5 * 72.0));
        assert_eq!(page.media_box.height(), Pt(11.0 * 72.0));
    }
}
