use crate::error::LayoutError;
use crate::layout::GlyphMetrics;
use crate::table::{Table, TableAlign};
use crate::units::Pt;

/// Breathing room added to every measured cell
pub const COLUMN_PADDING: Pt = Pt(5.0);

/// How many times the shrink pass may run before the table is declared impossible to lay out
pub const MAX_SHRINK_PASSES: usize = 1000;

/// Calculates the width of every slot of the table's grid so that the table fits within
/// `max_width`.
///
/// Each slot starts out as wide as the widest cell occupying it (plus padding), so columns
/// grow to fit their content. Cells spanning several slots share their width evenly
/// between them, but only in tables of more than two rows; in smaller tables the whole
/// width goes to the first slot the cell covers.
///
/// When the columns add up to more than `max_width`, the wide columns are repeatedly
/// shaved down by an even share of the excess, leaving columns narrower than an even
/// share of the page alone. If that still hasn't fit the table after
/// [MAX_SHRINK_PASSES] passes, [LayoutError::Unsatisfiable] is returned.
///
/// Justified tables then grow every column evenly so the table fills `max_width` exactly.
///
/// The result always holds exactly [Table::column_count] widths.
pub fn column_widths<M: GlyphMetrics + ?Sized>(
    table: &Table,
    metrics: &M,
    max_width: Pt,
) -> Result<Vec<Pt>, LayoutError> {
    let column_count = table.column_count();
    let mut widths: Vec<Option<Pt>> = vec![None; column_count];
    let share_spans = table.row_count() > 2;

    for row in table.rows.iter() {
        for (cell, slot) in row.slots(column_count) {
            let options = &cell.options;
            let measured = metrics
                .text_width(options.style(), options.size, &cell.text)
                .floor()
                + options.indent_left;

            if slot.span > 1 && share_spans {
                let part = (measured / slot.span as f32).floor() + COLUMN_PADDING;
                for index in slot.slots() {
                    grow(&mut widths, index, part);
                }
            } else {
                grow(&mut widths, slot.start, measured + COLUMN_PADDING);
            }
        }
    }

    let mut widths: Vec<Pt> = widths
        .into_iter()
        .map(|width| width.unwrap_or_default())
        .collect();

    shrink_to_fit(&mut widths, max_width)?;

    if table.options.align == TableAlign::Justify {
        justify(&mut widths, max_width);
    }

    log::debug!("solved {} column widths: {:?}", widths.len(), widths);
    Ok(widths)
}

fn grow(widths: &mut [Option<Pt>], index: usize, width: Pt) {
    if let Some(slot) = widths.get_mut(index) {
        if slot.map_or(true, |current| current < width) {
            *slot = Some(width);
        }
    }
}

/// Shave the widest columns down until they fit within `max_width`
fn shrink_to_fit(widths: &mut [Pt], max_width: Pt) -> Result<(), LayoutError> {
    let count = widths.len();
    if count == 0 {
        return Ok(());
    }

    let share = (max_width / count as f32).floor();
    let mut total: Pt = widths.iter().copied().sum();
    let mut passes = 0usize;

    while total > max_width {
        if passes >= MAX_SHRINK_PASSES {
            log::warn!(
                "giving up on fitting {count} columns totalling {total:?} into {max_width:?}"
            );
            return Err(LayoutError::Unsatisfiable {
                passes,
                total_width: total,
                max_width,
            });
        }
        passes += 1;

        let mut excess = ((total - max_width) / count as f32).floor();
        // an excess smaller than the column count would otherwise round away to nothing
        if excess <= Pt(0.0) {
            excess = Pt(1.0);
        }

        for width in widths.iter_mut().filter(|width| **width > share) {
            *width -= excess;
        }
        total = widths.iter().copied().sum();
        log::trace!("shrink pass {passes}: {total:?} of {max_width:?}");
    }

    Ok(())
}

/// Spread whatever width is left over evenly across all columns so they fill `max_width`
fn justify(widths: &mut [Pt], max_width: Pt) {
    let count = widths.len();
    if count == 0 {
        return;
    }

    let total: Pt = widths.iter().copied().sum();
    let slack = max_width - total;
    if slack <= Pt(0.0) {
        return;
    }

    let each = (slack / count as f32).round();
    for width in widths.iter_mut() {
        *width += each;
    }
    // soak up the rounding so the table is exactly as wide as the space
    widths[count - 1] += slack - each * count as f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontStyle;
    use crate::table::{CellOptions, RowOptions, TableOptions};
    use pretty_assertions::assert_eq;

    /// One point per character, whatever the size or style
    struct PerChar;

    impl GlyphMetrics for PerChar {
        fn text_width(&self, _style: FontStyle, _size: Pt, text: &str) -> Pt {
            Pt(text.chars().count() as f32)
        }
    }

    /// Bold text is twice as wide as regular text
    struct HeavyBold;

    impl GlyphMetrics for HeavyBold {
        fn text_width(&self, style: FontStyle, size: Pt, text: &str) -> Pt {
            let factor = if style == FontStyle::Bold { 1.0 } else { 0.5 };
            Pt(text.chars().count() as f32 * size.0 * factor)
        }
    }

    fn text(width: usize) -> String {
        "x".repeat(width)
    }

    fn table(align: TableAlign, rows: &[&[usize]]) -> Table {
        let mut table = Table::new(TableOptions {
            align,
            ..Default::default()
        });
        for cells in rows {
            let row = table.add_row(RowOptions::default());
            for &width in cells.iter() {
                row.add_col(text(width), CellOptions::default());
            }
        }
        table
    }

    fn total(widths: &[Pt]) -> Pt {
        widths.iter().copied().sum()
    }

    #[test]
    fn columns_grow_to_their_widest_cell() {
        let table = table(TableAlign::Left, &[&[10, 3], &[4, 20], &[1]]);
        let widths = column_widths(&table, &PerChar, Pt(500.0)).unwrap();
        assert_eq!(widths, vec![Pt(15.0), Pt(25.0)]);
    }

    #[test]
    fn indent_and_padding_count_towards_empty_cells() {
        let mut table = Table::default();
        table
            .add_row(RowOptions::default())
            .add_col("", CellOptions::default().indent_left(Pt(12.0)));
        let widths = column_widths(&table, &PerChar, Pt(500.0)).unwrap();
        assert_eq!(widths, vec![Pt(17.0)]);
    }

    #[test]
    fn bold_cells_are_measured_in_the_bold_face() {
        let mut table = Table::default();
        table
            .add_row(RowOptions::default())
            .add_col("abcd", CellOptions::default())
            .add_col("abcd", CellOptions::default().bold());
        let widths = column_widths(&table, &HeavyBold, Pt(500.0)).unwrap();
        assert_eq!(widths, vec![Pt(25.0), Pt(45.0)]);
    }

    #[test]
    fn justify_pads_every_column_evenly() {
        // a 1-row, 2-column table measuring 100 and 50 on a 200 wide page
        let table = table(TableAlign::Justify, &[&[95, 45]]);
        let widths = column_widths(&table, &PerChar, Pt(200.0)).unwrap();
        assert_eq!(widths, vec![Pt(125.0), Pt(75.0)]);
        assert_eq!(total(&widths), Pt(200.0));
    }

    #[test]
    fn justify_fills_the_width_exactly_despite_rounding() {
        let table = table(TableAlign::Justify, &[&[10, 10, 10]]);
        let widths = column_widths(&table, &PerChar, Pt(100.0)).unwrap();
        assert_eq!(total(&widths), Pt(100.0));
        assert_eq!(widths[0], widths[1]);
    }

    #[test]
    fn shrinking_keeps_the_table_within_the_width() {
        let table = table(TableAlign::Left, &[&[300, 20, 150], &[10, 10, 400]]);
        let widths = column_widths(&table, &PerChar, Pt(300.0)).unwrap();
        assert!(total(&widths) <= Pt(300.0), "{widths:?}");
        // the narrow column is left alone
        assert_eq!(widths[1], Pt(25.0));
    }

    #[test]
    fn small_overruns_still_shrink() {
        // 525 wide into 523 with 3 columns: the even excess rounds down to zero
        let table = table(TableAlign::Left, &[&[170, 170, 170]]);
        let widths = column_widths(&table, &PerChar, Pt(523.0)).unwrap();
        assert!(total(&widths) <= Pt(523.0), "{widths:?}");
    }

    #[test]
    fn shrinking_holds_for_many_shapes() {
        for max in [50.0, 120.0, 333.0] {
            for rows in [
                &[&[80usize, 90, 5][..], &[200, 1, 1][..]][..],
                &[&[500usize][..]][..],
                &[&[30usize, 30, 30, 30][..], &[7, 300][..]][..],
            ] {
                let table = table(TableAlign::Left, rows);
                let widths = column_widths(&table, &PerChar, Pt(max)).unwrap();
                assert!(total(&widths) <= Pt(max), "{widths:?} within {max}");
            }
        }
    }

    #[test]
    fn impossible_tables_are_reported() {
        // one enormous column among hundreds of narrow ones only sheds a sliver of
        // the excess each pass
        let mut cells: Vec<usize> = vec![0; 300];
        cells[0] = 30_000;
        let table = table(TableAlign::Left, &[&cells[..]]);
        let result = column_widths(&table, &PerChar, Pt(1500.0));
        assert!(matches!(
            result,
            Err(LayoutError::Unsatisfiable {
                passes: MAX_SHRINK_PASSES,
                ..
            })
        ));
    }

    #[test]
    fn spanned_cells_share_their_width() {
        let mut table = Table::default();
        for _ in 0..2 {
            table
                .add_row(RowOptions::default())
                .add_col(text(10), CellOptions::default())
                .add_col(text(10), CellOptions::default());
        }
        table
            .add_row(RowOptions::default())
            .add_col(text(61), CellOptions::default().colspan(2));
        table
            .add_row(RowOptions::default())
            .add_col(text(4), CellOptions::default())
            .add_col(text(4), CellOptions::default());

        let widths = column_widths(&table, &PerChar, Pt(500.0)).unwrap();
        // 61 / 2 rounds down to 30, plus padding, beats the 15 of the other rows
        assert_eq!(widths, vec![Pt(35.0), Pt(35.0)]);
    }

    #[test]
    fn narrow_spans_do_not_shrink_columns() {
        let mut table = table(TableAlign::Left, &[&[40, 40], &[40, 40], &[40, 40]]);
        table
            .add_row(RowOptions::default())
            .add_col(text(10), CellOptions::default().colspan(2));
        let widths = column_widths(&table, &PerChar, Pt(500.0)).unwrap();
        assert_eq!(widths, vec![Pt(45.0), Pt(45.0)]);
    }

    #[test]
    fn small_tables_give_spans_to_their_first_slot() {
        let mut table = Table::default();
        table
            .add_row(RowOptions::default())
            .add_col(text(60), CellOptions::default().colspan(2));
        table
            .add_row(RowOptions::default())
            .add_col(text(10), CellOptions::default())
            .add_col(text(10), CellOptions::default());
        let widths = column_widths(&table, &PerChar, Pt(500.0)).unwrap();
        assert_eq!(widths, vec![Pt(65.0), Pt(15.0)]);
    }

    #[test]
    fn huge_colspans_match_the_column_count() {
        let build = |colspan: usize| {
            let mut table = table(TableAlign::Left, &[&[5, 5, 5], &[5, 5, 5], &[5, 5, 5]]);
            table
                .add_row(RowOptions::default())
                .add_col(text(90), CellOptions::default().colspan(colspan));
            table
        };
        assert_eq!(
            column_widths(&build(999), &PerChar, Pt(500.0)).unwrap(),
            column_widths(&build(3), &PerChar, Pt(500.0)).unwrap()
        );
    }

    #[test]
    fn ragged_rows_get_one_width_per_slot() {
        let mut table = Table::default();
        table
            .add_row(RowOptions::default())
            .add_col(text(1), CellOptions::default())
            .add_col(text(1), CellOptions::default());
        table
            .add_row(RowOptions::default())
            .add_col(text(4), CellOptions::default().colspan(5))
            .add_col(text(5), CellOptions::default());

        let widths = column_widths(&table, &PerChar, Pt(500.0)).unwrap();
        assert_eq!(widths.len(), table.column_count());
        assert_eq!(widths, vec![Pt(9.0), Pt(6.0), Pt(10.0)]);
    }

    #[test]
    fn empty_tables_have_no_widths() {
        let widths = column_widths(&Table::default(), &PerChar, Pt(100.0)).unwrap();
        assert!(widths.is_empty());
    }
}
