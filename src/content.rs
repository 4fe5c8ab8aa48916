//! Turns a page's contents into the operators of a PDF content stream.

use crate::colour::Colour;
use crate::font::FontFamily;
use crate::page::{PageContents, ShapeLayout, SpanFont, SpanLayout};
use std::io::Write;

/// Width of every stroked line and rectangle outline, in points
const STROKE_WIDTH: f32 = 1.0;

#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &FontFamily,
) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    image.position.width(),
                    image.position.height(),
                    image.position.x1,
                    image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Shape(shape) => {
                render_shape(&mut content, shape)?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &FontFamily,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write_font(content, current_font)?;
    write_fill_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write_font(content, current_font)?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_fill_colour(content, current_colour)?;
        }

        let face = fonts.face(current_font.style);
        // characters missing from the font fall back to its replacement glyph, or .notdef
        let fallback = face.replacement_glyph_id().unwrap_or(0);

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        for ch in span.text.chars() {
            write!(content, "{:04x}", face.glyph_id(ch).unwrap_or(fallback))?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_shape(content: &mut Vec<u8>, shape: &ShapeLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write!(content, "{STROKE_WIDTH} w\n")?;
    match shape {
        ShapeLayout::Line { from, to, colour } => {
            write_stroke_colour(content, *colour)?;
            write!(content, "{} {} m\n", from.0, from.1)?;
            write!(content, "{} {} l\n", to.0, to.1)?;
        }
        ShapeLayout::RectangleStroke { rect, colour } => {
            write_stroke_colour(content, *colour)?;
            write!(
                content,
                "{} {} {} {} re\n",
                rect.x1,
                rect.y1,
                rect.width(),
                rect.height()
            )?;
        }
    }
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    write!(content, "/F{} {} Tf\n", font.style.resource_index(), font.size)
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}
