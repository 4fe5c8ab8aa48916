use crate::font::FontStyle;
use crate::layout::GlyphMetrics;
use crate::units::Pt;

const TABSIZE: usize = 4;

/// Wraps `text` into lines that fit within `width` when set in the given style and size.
///
/// Rather than fitting glyph by glyph, this estimates how many characters fit on a line
/// from the string's average character width, then wraps at word boundaries on that
/// character count. With proportional fonts lines can come out slightly longer or
/// shorter than `width` (by around one average character); words longer than a whole
/// line are never split.
///
/// Embedded newlines always start a new line and tabs count as four spaces. Empty text,
/// or text whose characters have no width in the font, produces no lines at all.
pub fn wrap_text<M: GlyphMetrics + ?Sized>(
    text: &str,
    width: Pt,
    metrics: &M,
    style: FontStyle,
    size: Pt,
) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    // replace tabs with spaces
    let text = text.replace('\t', &" ".repeat(TABSIZE));
    // normalize newlines
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let length = text.chars().count();
    let total = metrics.text_width(style, size, &text);
    let average = total.0 / length as f32;
    if !average.is_finite() || average <= 0.0 {
        return Vec::new();
    }

    let wrap_column = if total > width {
        (width.0 / average).round() as usize
    } else {
        length
    };

    text.split('\n')
        .flat_map(|paragraph| wrap_words(paragraph, wrap_column))
        .collect()
}

/// Greedily packs space-separated words into lines of at most `column` characters.
/// Spaces between words on the same line are kept as they were; the space a line is
/// broken at is dropped.
fn wrap_words(paragraph: &str, column: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_length = 0usize;

    for (i, word) in paragraph.split(' ').enumerate() {
        let word_length = word.chars().count();
        if i == 0 {
            line.push_str(word);
            line_length = word_length;
        } else if line_length + 1 + word_length > column && line_length > 0 {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_length = word_length;
        } else {
            line.push(' ');
            line.push_str(word);
            line_length += 1 + word_length;
        }
    }

    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Every character is `size / 2` wide, bold ones slightly wider
    struct Monospace;

    impl GlyphMetrics for Monospace {
        fn text_width(&self, style: FontStyle, size: Pt, text: &str) -> Pt {
            let factor = match style {
                FontStyle::Regular => 0.5,
                FontStyle::Bold => 0.6,
            };
            Pt(text.chars().count() as f32 * size.0 * factor)
        }
    }

    /// A font with no advances at all
    struct Invisible;

    impl GlyphMetrics for Invisible {
        fn text_width(&self, _style: FontStyle, _size: Pt, _text: &str) -> Pt {
            Pt(0.0)
        }
    }

    fn wrap(text: &str, width: f32) -> Vec<String> {
        wrap_text(text, Pt(width), &Monospace, FontStyle::Regular, Pt(10.0))
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("", 100.0).is_empty());
        assert!(wrap("", 0.0).is_empty());
        assert!(wrap_text("", Pt(50.0), &Monospace, FontStyle::Bold, Pt(72.0)).is_empty());
    }

    #[test]
    fn zero_width_fonts_produce_no_lines() {
        assert!(wrap_text("hello", Pt(10.0), &Invisible, FontStyle::Regular, Pt(10.0)).is_empty());
    }

    #[test]
    fn text_that_fits_is_a_single_line() {
        assert_eq!(wrap("hello world", 100.0), vec!["hello world"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        // 5pt per character, 30pt wide => 6 characters per line
        assert_eq!(wrap("aaa bbb ccc", 30.0), vec!["aaa", "bbb", "ccc"]);
        assert_eq!(wrap("aa bb cc dd", 30.0), vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn long_words_are_not_split() {
        assert_eq!(wrap("a extraordinarily b", 20.0), vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn newlines_are_hard_breaks() {
        assert_eq!(wrap("one\ntwo\r\nthree", 500.0), vec!["one", "two", "three"]);
    }

    #[test]
    fn thousand_characters_at_ten_per_line() {
        // average character width 5, target 50 => wrap every 10 characters
        let text = "abcd ".repeat(200);
        assert_eq!(text.chars().count(), 1000);
        let lines = wrap(&text, 50.0);
        assert_eq!(lines.len(), 100);
        assert!(lines.iter().all(|line| line.trim_end() == "abcd abcd"));
    }

    #[test]
    fn lines_stay_within_one_average_character_of_the_width() {
        let text = lipsum::lipsum(120);
        for width in [100.0, 123.0, 260.0, 400.0] {
            let average = Monospace
                .text_width(FontStyle::Regular, Pt(10.0), &text)
                .0
                / text.chars().count() as f32;
            for line in wrap(&text, width) {
                // lipsum words are all shorter than the narrowest line
                let measured = Monospace.text_width(FontStyle::Regular, Pt(10.0), &line);
                assert!(
                    measured.0 <= width + average,
                    "`{line}` is {measured:?} wide, more than {width} + {average}"
                );
            }
        }
    }
}
