//! The table model: [Table]s hold [Row]s which hold [Cell]s.
//!
//! Every option has a typed field with a default that is applied when the
//! option set is created, so the layout engine never has to check whether an
//! option was given.
//!
//! ```
//! use pdf_tables::{Report, TableOptions, TableAlign, RowOptions, CellOptions, CellAlign};
//!
//! let mut report = Report::new();
//! let table = report.add_table(TableOptions {
//!     align: TableAlign::Justify,
//!     ..Default::default()
//! });
//! table.add_spacer_row();
//! table
//!     .add_row(RowOptions::default())
//!     .add_col("Evaluation", CellOptions::default().bold().colspan(7).align(CellAlign::Center));
//! table
//!     .add_row(RowOptions::default())
//!     .add_col("Right Carotid", CellOptions::default().bold().colspan(3))
//!     .add_col(" ", CellOptions::default())
//!     .add_col("Left Carotid", CellOptions::default().bold().colspan(3));
//! assert_eq!(table.column_count(), 7);
//! ```

use crate::colour::Colour;
use crate::font::FontStyle;
use crate::units::Pt;

/// Font size given to cells that don't ask for one
pub const DEFAULT_CELL_SIZE: Pt = Pt(10.0);

/// Row heights are the largest font size in the row scaled by this factor
pub const ROW_HEIGHT_FACTOR: f32 = 1.1;

/// How a table is positioned horizontally between the page margins
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum TableAlign {
    #[default]
    Left,
    /// Centre the table between the margins
    Center,
    /// Widen every column so the table fills the usable width
    Justify,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableOptions {
    pub align: TableAlign,
    /// Never split the table across pages; it moves to a new page instead
    pub no_wrap: bool,
    /// Outline every line of every cell, to see where things ended up
    pub debug: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RowOptions {
    /// Draw a line under each cell of the row
    pub underline: bool,
}

/// Horizontal alignment of text within its cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum CellAlign {
    #[default]
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellOptions {
    pub align: CellAlign,
    pub bold: bool,
    /// Font size of the cell's text; also drives the height of the row
    pub size: Pt,
    /// Scale the font size when drawing, i.e. `1.2` draws slightly larger text
    pub font_multiplier: Option<f32>,
    /// Space before the text, counted as part of the cell's width
    pub indent_left: Pt,
    /// Colour of a line drawn along the right edge of the cell
    pub border_right: Option<Colour>,
    /// Colour of the text; black when not given
    pub color: Option<Colour>,
    /// Number of columns the cell spans, like HTML's `colspan`
    pub colspan: Option<usize>,
}

impl Default for CellOptions {
    fn default() -> Self {
        CellOptions {
            align: CellAlign::Left,
            bold: false,
            size: DEFAULT_CELL_SIZE,
            font_multiplier: None,
            indent_left: Pt(0.0),
            border_right: None,
            color: None,
            colspan: None,
        }
    }
}

impl CellOptions {
    pub fn align(mut self, align: CellAlign) -> Self {
        self.align = align;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size<P: Into<Pt>>(mut self, size: P) -> Self {
        self.size = size.into();
        self
    }

    pub fn font_multiplier(mut self, multiplier: f32) -> Self {
        self.font_multiplier = Some(multiplier);
        self
    }

    pub fn indent_left<P: Into<Pt>>(mut self, indent: P) -> Self {
        self.indent_left = indent.into();
        self
    }

    pub fn border_right<C: Into<Colour>>(mut self, colour: C) -> Self {
        self.border_right = Some(colour.into());
        self
    }

    pub fn color<C: Into<Colour>>(mut self, colour: C) -> Self {
        self.color = Some(colour.into());
        self
    }

    /// Zero is treated as a span of one
    pub fn colspan(mut self, colspan: usize) -> Self {
        self.colspan = Some(colspan.max(1));
        self
    }

    pub fn style(&self) -> FontStyle {
        if self.bold {
            FontStyle::Bold
        } else {
            FontStyle::Regular
        }
    }

    /// The size text is actually drawn at, after applying any multiplier
    pub fn effective_size(&self) -> Pt {
        match self.font_multiplier {
            Some(multiplier) => self.size * multiplier,
            None => self.size,
        }
    }
}

/// A single cell of text
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub options: CellOptions,
}

/// The slots of the table's grid that a cell occupies
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SlotSpan {
    /// Index of the first slot
    pub start: usize,
    /// Number of slots covered, always at least one
    pub span: usize,
}

impl SlotSpan {
    pub fn slots(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.span
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub options: RowOptions,
}

impl Row {
    pub fn new(options: RowOptions) -> Row {
        Row {
            cells: Vec::new(),
            options,
        }
    }

    /// Append a cell to the row, returning the row so calls can be chained
    pub fn add_col<S: Into<String>>(&mut self, text: S, options: CellOptions) -> &mut Row {
        self.cells.push(Cell {
            text: text.into(),
            options,
        });
        self
    }

    /// The vertical space one line of this row takes up: its largest font size,
    /// scaled by [ROW_HEIGHT_FACTOR]. Empty rows take no space.
    pub fn height(&self) -> Pt {
        self.cells
            .iter()
            .map(|cell| cell.options.size)
            .fold(Pt(0.0), Pt::max)
            * ROW_HEIGHT_FACTOR
    }

    /// Walk the cells in order along with the grid slots each one occupies in a table
    /// of `column_count` slots. Spans are clamped so that every cell after this one
    /// still gets a slot of its own. As long as `column_count` is at least the number
    /// of cells, every slot handed out lies inside the grid.
    ///
    /// Both column sizing and drawing go through here with [Table::column_count] so
    /// they always agree on which slot a cell sits in.
    pub fn slots(&self, column_count: usize) -> impl Iterator<Item = (&Cell, SlotSpan)> + '_ {
        let cell_count = self.cells.len();
        let mut next = 0usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let start = next;
            let following = cell_count - i - 1;
            let available = column_count
                .saturating_sub(start)
                .saturating_sub(following)
                .max(1);
            let span = cell.options.colspan.unwrap_or(1).clamp(1, available);
            next += span;
            (cell, SlotSpan { start, span })
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
    pub options: TableOptions,
}

impl Table {
    pub fn new(options: TableOptions) -> Table {
        Table {
            rows: Vec::new(),
            options,
        }
    }

    /// Append a new, empty row and return it so cells can be added to it
    pub fn add_row(&mut self, options: RowOptions) -> &mut Row {
        self.rows.push(Row::new(options));
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Append a row with a single empty cell, leaving a blank line in the table
    pub fn add_spacer_row(&mut self) {
        self.add_row(RowOptions::default())
            .add_col("", CellOptions::default());
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The most cells held by any single row
    pub fn max_cells(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    }

    /// Number of slots in the table's grid. Each row needs one slot per cell plus the
    /// extra slots its spans cover, where no span is counted wider than the widest
    /// row; the grid is as wide as the row needing the most. It is never less than
    /// [Table::max_cells], so [Row::slots] keeps every cell inside it.
    pub fn column_count(&self) -> usize {
        let widest = self.max_cells();
        self.rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| cell.options.colspan.unwrap_or(1).clamp(1, widest.max(1)))
                    .sum::<usize>()
            })
            .max()
            .unwrap_or(0)
    }

    /// The height of the whole table if each row held a single line of text
    pub fn height(&self) -> Pt {
        self.rows.iter().map(Row::height).sum()
    }
}
