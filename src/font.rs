use crate::{
    layout::GlyphMetrics,
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A parsed TrueType / OpenType font. Fonts are embedded in their entirety in the
/// generated PDF, so large fonts will dramatically increase the size of the output.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// Obtain the full name of the font, falling back to the family name and then to
    /// a generic name if the font has neither
    pub fn name(&self) -> String {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
            .or_else(|| self.family())
            .unwrap_or_else(|| "Unnamed".to_string())
    }

    /// Obtain the family name of the font
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    fn name_entry(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    /// Calculate the width of a string set in this font. Characters without a glyph
    /// in the font don't take up any space.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .filter_map(|ch| self.face().glyph_index(ch))
            .map(|gid| scaling * self.face().glyph_hor_advance(gid).unwrap_or_default() as f32)
            .sum()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    /// Every unicode-mapped glyph in the font along with the first character that maps to it
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map: BTreeMap<u16, char> = BTreeMap::new();

        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    /// Horizontal advance of every mapped glyph, in PDF glyph space (1000 units per em)
    fn glyph_widths(&self) -> BTreeMap<u16, f32> {
        let scaling = 1000.0 / self.face().units_per_em() as f32;
        self.glyph_chars()
            .keys()
            .filter_map(|&gid| {
                self.face()
                    .glyph_hor_advance(GlyphId(gid))
                    .map(|advance| (gid, advance as f32 * scaling))
            })
            .collect()
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));
        let data = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            data,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );

        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), data.len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_id = self.write_font_data(refs, font_index, writer);
        let widths = self.glyph_widths();

        let max_width = widths.values().copied().fold(0.0_f32, f32::max);
        let avg_width = if widths.is_empty() {
            0.0
        } else {
            widths.values().sum::<f32>() / widths.len() as f32
        };

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let bbox = face.global_bounding_box();

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let name = self.name().replace(' ', "");
        let family = self.family().unwrap_or_else(|| name.clone());

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face
            .capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(face.ascender() as f32 * scaling);
        descriptor.cap_height(cap_height);
        descriptor.x_height(
            face.x_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(cap_height),
        );
        // TrueType fonts don't record a stem width; 80 is the usual stand-in for regular weights
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.missing_width(max_width);
        descriptor.font_file2(font_data_id);

        id
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);
        cid_font.default_width(1000.0);

        // group the widths into runs of consecutive glyph ids
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for (gid, width) in self.glyph_widths() {
            match runs.last_mut() {
                Some((start, run)) if *start as usize + run.len() == gid as usize => {
                    run.push(width)
                }
                _ => runs.push((gid, vec![width])),
            }
        }

        let mut widths = cid_font.widths();
        for (start, run) in runs {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries each
        let glyphs: Vec<(u16, char)> = self.glyph_chars().into_iter().collect();
        for block in glyphs.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let encoded: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{encoded}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

/// Which face of a [FontFamily] a piece of text is set in
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
}

impl FontStyle {
    pub const ALL: [FontStyle; 2] = [FontStyle::Regular, FontStyle::Bold];

    /// Index of the face in the document's font resources, i.e. `/F0` for regular text
    pub(crate) fn resource_index(self) -> usize {
        match self {
            FontStyle::Regular => 0,
            FontStyle::Bold => 1,
        }
    }
}

/// The pair of faces tables are set in: one for regular text and one for bold text
pub struct FontFamily {
    pub regular: Font,
    pub bold: Font,
}

impl FontFamily {
    /// Load both faces of the family from raw font file bytes
    pub fn load(regular: Vec<u8>, bold: Vec<u8>) -> Result<FontFamily, PDFError> {
        Ok(FontFamily {
            regular: Font::load(regular)?,
            bold: Font::load(bold)?,
        })
    }

    pub fn face(&self, style: FontStyle) -> &Font {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }
}

impl GlyphMetrics for FontFamily {
    fn text_width(&self, style: FontStyle, size: Pt, text: &str) -> Pt {
        self.face(style).width_of_text(text, size)
    }
}
