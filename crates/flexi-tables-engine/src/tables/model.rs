//! The finished, immutable table handed to rendering.

use super::layout::ColumnLayout;

/// One cell, anchored in the first row it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub start_column: usize,
    pub col_span: usize,
    pub row_span: usize,
    /// Raw text accumulated during assembly, not yet block-parsed.
    pub raw_lines: Vec<String>,
    pub is_header: bool,
}

impl Cell {
    #[must_use]
    pub fn new(start_column: usize, col_span: usize, raw_lines: Vec<String>) -> Self {
        Self {
            start_column,
            col_span,
            row_span: 1,
            raw_lines,
            is_header: false,
        }
    }
}

/// A position in a row: either the anchor of a cell or a cell from an
/// earlier row that spans down into this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSlot {
    Anchor(Cell),
    Continuation {
        start_column: usize,
        col_span: usize,
        /// Index of the anchor's row in [`TableModel::rows`] order.
        anchor_row: usize,
    },
}

impl RowSlot {
    #[must_use]
    pub fn start_column(&self) -> usize {
        match self {
            RowSlot::Anchor(cell) => cell.start_column,
            RowSlot::Continuation { start_column, .. } => *start_column,
        }
    }

    #[must_use]
    pub fn col_span(&self) -> usize {
        match self {
            RowSlot::Anchor(cell) => cell.col_span,
            RowSlot::Continuation { col_span, .. } => *col_span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub slots: Vec<RowSlot>,
    pub is_header_row: bool,
    /// A delimiter-shaped row inside a pipe table body; cells render as rules.
    pub is_separator: bool,
}

impl Row {
    #[must_use]
    pub fn new(slots: Vec<RowSlot>) -> Self {
        Self {
            slots,
            ..Self::default()
        }
    }

    /// Cells anchored in this row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.slots.iter().filter_map(|slot| match slot {
            RowSlot::Anchor(cell) => Some(cell),
            RowSlot::Continuation { .. } => None,
        })
    }

    /// Marks the row and its anchored cells as header content.
    pub(crate) fn promote_to_header(&mut self) {
        self.is_header_row = true;
        for slot in &mut self.slots {
            if let RowSlot::Anchor(cell) = slot {
                cell.is_header = true;
            }
        }
    }
}

/// How cell text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    /// One line of inline markdown (pipe tables).
    Inline,
    /// A fragment of block markdown (grid tables).
    Blocks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    layout: ColumnLayout,
    header_rows: Vec<Row>,
    body_rows: Vec<Row>,
    content: CellContent,
}

impl TableModel {
    /// Builds a model, checking that every row partitions the columns.
    ///
    /// # Panics
    /// Panics when the rows violate the partition or span invariants: that
    /// is an assembler bug, never a property of the input text.
    #[must_use]
    pub fn new(
        layout: ColumnLayout,
        header_rows: Vec<Row>,
        body_rows: Vec<Row>,
        content: CellContent,
    ) -> Self {
        let model = Self {
            layout,
            header_rows,
            body_rows,
            content,
        };
        if let Err(msg) = model.check() {
            panic!("table model invariant violated: {msg}");
        }
        model
    }

    #[must_use]
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    #[must_use]
    pub fn header_rows(&self) -> &[Row] {
        &self.header_rows
    }

    #[must_use]
    pub fn body_rows(&self) -> &[Row] {
        &self.body_rows
    }

    #[must_use]
    pub fn content(&self) -> CellContent {
        self.content
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        !self.header_rows.is_empty()
    }

    /// Header rows followed by body rows.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.header_rows.iter().chain(&self.body_rows)
    }

    /// Row by index in [`TableModel::rows`] order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        match index.checked_sub(self.header_rows.len()) {
            None => self.header_rows.get(index),
            Some(body) => self.body_rows.get(body),
        }
    }

    /// The header cell covering `column` in the last header row, following
    /// continuations back to their anchor.
    #[must_use]
    pub fn header_cell_at(&self, column: usize) -> Option<&Cell> {
        let row = self.header_rows.last()?;
        let slot = row.slots.iter().find(|slot| {
            let start = slot.start_column();
            (start..start + slot.col_span()).contains(&column)
        })?;
        match slot {
            RowSlot::Anchor(cell) => Some(cell),
            RowSlot::Continuation {
                start_column,
                anchor_row,
                ..
            } => self
                .row(*anchor_row)?
                .cells()
                .find(|cell| cell.start_column == *start_column),
        }
    }

    /// Validates the structural invariants.
    ///
    /// - every row's slots, in order, tile `[0, column_count)` exactly;
    /// - every span is at least 1;
    /// - a continuation points at an earlier anchor with the same columns
    ///   whose `row_span` reaches this row.
    pub fn check(&self) -> Result<(), String> {
        let columns = self.layout.column_count();
        for (index, row) in self.rows().enumerate() {
            let mut next = 0usize;
            for slot in &row.slots {
                if slot.col_span() == 0 {
                    return Err(format!("row {index}: zero col_span"));
                }
                if slot.start_column() != next {
                    return Err(format!(
                        "row {index}: slot starts at column {} but {next} is next",
                        slot.start_column()
                    ));
                }
                next += slot.col_span();
                match slot {
                    RowSlot::Anchor(cell) if cell.row_span == 0 => {
                        return Err(format!("row {index}: zero row_span"));
                    }
                    RowSlot::Anchor(_) => {}
                    RowSlot::Continuation {
                        start_column,
                        col_span,
                        anchor_row,
                    } => {
                        let anchor = (*anchor_row < index)
                            .then(|| self.row(*anchor_row))
                            .flatten()
                            .and_then(|r| r.cells().find(|c| c.start_column == *start_column));
                        match anchor {
                            Some(cell)
                                if cell.col_span == *col_span
                                    && anchor_row + cell.row_span > index => {}
                            _ => {
                                return Err(format!(
                                    "row {index}: continuation at column {start_column} has no anchor"
                                ));
                            }
                        }
                    }
                }
            }
            if next != columns {
                return Err(format!("row {index}: covers {next} of {columns} columns"));
            }
        }
        Ok(())
    }
}
