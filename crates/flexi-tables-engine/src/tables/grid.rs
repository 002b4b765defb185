//! Grid table assembly.
//!
//! ```text
//! +-------+-------+      <- first border: column corners + alignment
//! | a     | b     |
//! +=======+=======+      <- header/body split
//! | spans both    |      <- no `|` at a corner: column span
//! +-------+-------+
//! | c     | d     |
//! +-------+       +      <- blank fill: `d` continues below (row span)
//! | e     |       |
//! +-------+-------+
//! ```
//!
//! Lines between two border lines form a row group. The `|` positions of a
//! group's content lines decide which columns each cell covers; the fills of
//! the closing border decide which cells end there and which continue into
//! the next group.

use log::debug;

use crate::parsing::rope::LineRef;

use super::{
    assembler::{Outcome, Step, TableAssembler},
    classify::{BorderLine, ContentLine, Fill, LineClass, TableLineClassifier},
    layout::{Alignment, ColumnLayout},
    model::{Cell, CellContent, Row, RowSlot, TableModel},
};

/// Columns `[start, end)` of one cell in a row group.
type Segment = (usize, usize);

/// A cell that continues across the last border into the next row group.
#[derive(Debug)]
struct Pending {
    segment: Segment,
    /// `(row, slot)` of the anchor cell.
    anchor: (usize, usize),
    /// Border fill passed through as content when the border is a repeated
    /// header separator.
    carry: Option<String>,
}

/// Content lines seen since the last border.
#[derive(Debug)]
struct RowGroup {
    segments: Vec<Segment>,
    texts: Vec<Vec<String>>,
}

#[derive(Debug)]
struct GridTable {
    layout: ColumnLayout,
    bounds: Vec<usize>,
    borders: usize,
    rows: Vec<Row>,
    /// Number of leading header rows, once a `=` border committed the split.
    header_rows: Option<usize>,
    pending: Vec<Pending>,
    group: Option<RowGroup>,
    lines: Vec<LineRef>,
}

impl GridTable {
    /// Opens a table from its first border. Every column must be filled.
    fn open(border: &BorderLine) -> Option<Self> {
        let bounds = border.corners().to_vec();
        let alignments = bounds
            .windows(2)
            .map(|w| match border.fill(w[0], w[1]) {
                Fill::Plain | Fill::Header => Some(Alignment::from_fill(&border.text(w[0], w[1]))),
                Fill::Blank | Fill::Mixed => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            layout: ColumnLayout::grid(bounds.clone(), alignments),
            bounds,
            borders: 1,
            rows: Vec::new(),
            header_rows: None,
            pending: Vec::new(),
            group: None,
            lines: Vec::new(),
        })
    }

    fn columns(&self) -> usize {
        self.layout.column_count()
    }

    /// Splits a content line into cells at the corners holding `|`.
    fn segments(&self, content: &ContentLine) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut start = 0;
        for column in 1..self.columns() {
            if content.is_separator(self.bounds[column]) {
                segments.push((start, column));
                start = column;
            }
        }
        segments.push((start, self.columns()));
        segments
    }

    fn add_content(&mut self, content: &ContentLine) -> Result<(), &'static str> {
        let segments = self.segments(content);
        match &self.group {
            Some(group) if group.segments != segments => {
                return Err("content line splits cells differently from the line above");
            }
            Some(_) => {}
            None => {
                if self.pending.iter().any(|p| !segments.contains(&p.segment)) {
                    return Err("content line splits a row-spanning cell");
                }
            }
        }

        let group = self.group.get_or_insert_with(|| RowGroup {
            texts: vec![Vec::new(); segments.len()],
            segments,
        });
        for (texts, (start, end)) in group.texts.iter_mut().zip(&group.segments) {
            texts.push(content.text(self.bounds[*start], self.bounds[*end]));
        }
        Ok(())
    }

    /// Turns the open row group into a row, merging continuations into
    /// their anchors. Returns each segment with the anchor it belongs to.
    fn close_group(&mut self) -> Option<Vec<(Segment, (usize, usize))>> {
        let group = self.group.take()?;
        let row_index = self.rows.len();
        let mut slots = Vec::with_capacity(group.segments.len());
        let mut anchors = Vec::with_capacity(group.segments.len());

        for (segment, texts) in group.segments.into_iter().zip(group.texts) {
            let (start, end) = segment;
            let continued = self.pending.iter().find(|p| p.segment == segment);
            match continued {
                Some(pending) => {
                    let anchor = pending.anchor;
                    let carry = pending.carry.clone();
                    if let RowSlot::Anchor(cell) = &mut self.rows[anchor.0].slots[anchor.1] {
                        cell.row_span += 1;
                        cell.raw_lines.extend(carry);
                        cell.raw_lines.extend(texts);
                    }
                    slots.push(RowSlot::Continuation {
                        start_column: start,
                        col_span: end - start,
                        anchor_row: anchor.0,
                    });
                    anchors.push((segment, anchor));
                }
                None => {
                    anchors.push((segment, (row_index, slots.len())));
                    slots.push(RowSlot::Anchor(Cell::new(start, end - start, texts)));
                }
            }
        }

        self.rows.push(Row::new(slots));
        self.pending.clear();
        Some(anchors)
    }

    /// Applies a border line. Returns whether it committed the header split.
    fn add_border(&mut self, border: &BorderLine) -> Result<bool, &'static str> {
        if Some(border.width()) != self.layout.width() {
            return Err("border width differs from the first border");
        }
        if !border.corners().iter().all(|c| self.bounds.contains(c)) {
            return Err("border corners are not a subset of the column boundaries");
        }
        let fills: Vec<Fill> = self
            .bounds
            .windows(2)
            .map(|w| border.fill(w[0], w[1]))
            .collect();
        if fills.contains(&Fill::Mixed) {
            return Err("border mixes fill characters within a column");
        }
        let header_border = fills.contains(&Fill::Header);
        let splits_header = header_border && self.header_rows.is_none();

        let mut pending = Vec::new();
        match self.close_group() {
            None if fills.contains(&Fill::Blank) => {
                return Err("blank border fill without a row above it");
            }
            None => {}
            Some(anchors) => {
                for ((start, end), anchor) in anchors {
                    let fill = fills[start];
                    if fills[start..end].iter().any(|f| *f != fill) {
                        return Err("border fill changes within one cell");
                    }
                    match fill {
                        Fill::Blank => {
                            if (start + 1..end).any(|c| border.has_corner(self.bounds[c])) {
                                return Err("corner inside a row-spanning cell");
                            }
                            pending.push(Pending {
                                segment: (start, end),
                                anchor,
                                carry: None,
                            });
                        }
                        Fill::Header if !splits_header => {
                            pending.push(Pending {
                                segment: (start, end),
                                anchor,
                                carry: Some(border.text(self.bounds[start], self.bounds[end])),
                            });
                        }
                        _ => {}
                    }
                }
            }
        }

        if splits_header {
            if !pending.is_empty() {
                return Err("row span across the header separator");
            }
            self.header_rows = Some(self.rows.len());
            for row in &mut self.rows {
                row.promote_to_header();
            }
        }
        self.pending = pending;
        self.borders += 1;
        Ok(splits_header)
    }

    fn conclude(mut self) -> Result<TableModel, Vec<LineRef>> {
        if self.borders < 2 {
            debug!("grid table needs two borders, rejecting {} lines", self.lines.len());
            return Err(self.lines);
        }
        self.close_group();
        if self.rows.is_empty() {
            debug!("grid table has no rows, rejecting {} lines", self.lines.len());
            return Err(self.lines);
        }
        let body = self.rows.split_off(self.header_rows.unwrap_or(0));
        debug!(
            "grid table finalized: {} columns, {} header rows, {} body rows",
            self.columns(),
            self.rows.len(),
            body.len()
        );
        Ok(TableModel::new(
            self.layout,
            self.rows,
            body,
            CellContent::Blocks,
        ))
    }
}

#[derive(Debug)]
enum GridState {
    Empty,
    /// One border seen; the layout is still tentative.
    FirstBorderSeen(GridTable),
    /// Content lines are accumulating into a row group.
    RowOpen(GridTable),
    /// A border just closed a row group.
    ColumnsOpen(GridTable),
    /// A border just committed the header/body split.
    HeaderClosed(GridTable),
    Terminated,
}

enum Applied {
    Content,
    Border,
    HeaderSplit,
}

/// Line-at-a-time grid table state machine.
#[derive(Debug)]
pub struct GridAssembler {
    state: GridState,
    classifier: TableLineClassifier,
}

impl Default for GridAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl GridAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: GridState::Empty,
            classifier: TableLineClassifier,
        }
    }

    /// Whether `line` can open a grid table.
    #[must_use]
    pub fn sniff(line: &str) -> bool {
        matches!(
            TableLineClassifier.classify(line, None),
            LineClass::GridBorderLine(_)
        )
    }

    fn extend(&mut self, mut table: GridTable, line: LineRef) -> Step {
        let applied = match self.classifier.classify(line.content(), Some(&table.layout)) {
            LineClass::GridContentLine(content) => table.add_content(&content).map(|()| Applied::Content),
            LineClass::GridBorderLine(border) => table.add_border(&border).map(|split| {
                if split {
                    Applied::HeaderSplit
                } else {
                    Applied::Border
                }
            }),
            _ => return Self::terminate(table, line),
        };

        match applied {
            Ok(applied) => {
                table.lines.push(line);
                self.state = match applied {
                    Applied::Content => GridState::RowOpen(table),
                    Applied::Border => GridState::ColumnsOpen(table),
                    Applied::HeaderSplit => GridState::HeaderClosed(table),
                };
                Step::Consumed
            }
            Err(reason) => {
                debug!("not a grid table: {reason}");
                let mut lines = table.lines;
                lines.push(line);
                Step::Rejected(lines)
            }
        }
    }

    fn terminate(table: GridTable, rest: LineRef) -> Step {
        match table.conclude() {
            Ok(table) => Step::Finished { table, rest },
            Err(mut lines) => {
                lines.push(rest);
                Step::Rejected(lines)
            }
        }
    }
}

impl TableAssembler for GridAssembler {
    fn push(&mut self, line: LineRef) -> Step {
        match std::mem::replace(&mut self.state, GridState::Terminated) {
            GridState::Empty => match self.classifier.classify(line.content(), None) {
                LineClass::GridBorderLine(border) => match GridTable::open(&border) {
                    Some(mut table) => {
                        table.lines.push(line);
                        self.state = GridState::FirstBorderSeen(table);
                        Step::Consumed
                    }
                    None => Step::Rejected(vec![line]),
                },
                _ => Step::Rejected(vec![line]),
            },
            GridState::FirstBorderSeen(table)
            | GridState::RowOpen(table)
            | GridState::ColumnsOpen(table)
            | GridState::HeaderClosed(table) => self.extend(table, line),
            GridState::Terminated => Step::Rejected(vec![line]),
        }
    }

    fn finish(self: Box<Self>) -> Outcome {
        match self.state {
            GridState::FirstBorderSeen(table)
            | GridState::RowOpen(table)
            | GridState::ColumnsOpen(table)
            | GridState::HeaderClosed(table) => match table.conclude() {
                Ok(table) => Outcome::Table(table),
                Err(lines) => Outcome::Rejected(lines),
            },
            GridState::Empty | GridState::Terminated => Outcome::Rejected(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rope::lines_with_spans;
    use pretty_assertions::assert_eq;
    use xi_rope::Rope;

    fn run(text: &str) -> (Vec<Step>, Option<Outcome>) {
        let mut assembler = Box::new(GridAssembler::new());
        let mut steps = Vec::new();
        for line in lines_with_spans(&Rope::from(text)) {
            let step = assembler.push(line);
            let done = matches!(step, Step::Finished { .. } | Step::Rejected(_));
            steps.push(step);
            if done {
                return (steps, None);
            }
        }
        (steps, Some(assembler.finish()))
    }

    fn table(text: &str) -> TableModel {
        match run(text) {
            (_, Some(Outcome::Table(table))) => table,
            (mut steps, None) => match steps.pop() {
                Some(Step::Finished { table, .. }) => table,
                other => panic!("expected a table, got {other:?}"),
            },
            other => panic!("expected a table, got {other:?}"),
        }
    }

    fn rejected_count(text: &str) -> usize {
        match run(text) {
            (_, Some(Outcome::Rejected(lines))) => lines.len(),
            (mut steps, None) => match steps.pop() {
                Some(Step::Rejected(lines)) => lines.len(),
                other => panic!("expected rejection, got {other:?}"),
            },
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    fn spans(row: &Row) -> Vec<(usize, usize, usize)> {
        row.cells()
            .map(|c| (c.start_column, c.col_span, c.row_span))
            .collect()
    }

    #[test]
    fn header_split_on_equals_border() {
        let t = table(
            "+---+---+\n\
             | a | b |\n\
             +===+===+\n\
             | 0 | 1 |\n\
             +---+---+\n",
        );
        assert_eq!(t.header_rows().len(), 1);
        assert_eq!(t.body_rows().len(), 1);
        assert!(t.header_rows()[0].is_header_row);
        let header: Vec<_> = t.header_rows()[0].cells().map(|c| c.raw_lines.clone()).collect();
        assert_eq!(header, [vec![" a ".to_string()], vec![" b ".to_string()]]);
        assert!(t.body_rows()[0].cells().all(|c| !c.is_header));
        assert_eq!(t.content(), CellContent::Blocks);
    }

    #[test]
    fn missing_corner_spans_columns() {
        let t = table(
            "+---+---+\n\
             | a | b |\n\
             +---+---+\n\
             | merged|\n\
             +-------+\n",
        );
        assert!(!t.has_header());
        assert_eq!(spans(&t.body_rows()[0]), [(0, 1, 1), (1, 1, 1)]);
        assert_eq!(spans(&t.body_rows()[1]), [(0, 2, 1)]);
    }

    #[test]
    fn blank_fill_spans_rows() {
        let t = table(
            "+---+---+\n\
             | a | b |\n\
             +---+   +\n\
             | c | d |\n\
             +---+---+\n",
        );
        let rows = t.body_rows();
        assert_eq!(spans(&rows[0]), [(0, 1, 1), (1, 1, 2)]);
        assert_eq!(spans(&rows[1]), [(0, 1, 1)]);
        assert_eq!(
            rows[1].slots[1],
            RowSlot::Continuation {
                start_column: 1,
                col_span: 1,
                anchor_row: 0
            }
        );
        let tall = rows[0].cells().nth(1).unwrap();
        assert_eq!(tall.raw_lines, [" b ", " d "]);
    }

    #[test]
    fn row_span_over_several_groups() {
        let t = table(
            "+---+---+\n\
             | a | b |\n\
             +---+   +\n\
             | c |   |\n\
             +---+   +\n\
             | e |   |\n\
             +---+---+\n",
        );
        assert_eq!(t.body_rows().len(), 3);
        assert_eq!(spans(&t.body_rows()[0]), [(0, 1, 1), (1, 1, 3)]);
        assert!(t.check().is_ok());
    }

    #[test]
    fn multi_line_cells_accumulate() {
        let t = table(
            "+-------+\n\
             | one   |\n\
             | two   |\n\
             +-------+\n",
        );
        let cell = t.body_rows()[0].cells().next().unwrap();
        assert_eq!(cell.raw_lines, [" one   ", " two   "]);
    }

    #[test]
    fn alignment_from_first_border() {
        let t = table(
            "+:--+--:+:-:+---+\n\
             | a | b | c | d |\n\
             +---+---+---+---+\n",
        );
        assert_eq!(
            t.layout().alignments(),
            [
                Alignment::Start,
                Alignment::End,
                Alignment::Center,
                Alignment::None
            ]
        );
    }

    #[test]
    fn may_end_without_closing_border() {
        let t = table(
            "+---+\n\
             | a |\n\
             +---+\n\
             | b |\n",
        );
        assert_eq!(t.body_rows().len(), 2);
    }

    #[test]
    fn non_table_line_finishes_table() {
        let (steps, _) = run("+---+\n| a |\n+---+\nafter\n");
        match steps.last() {
            Some(Step::Finished { table, rest }) => {
                assert_eq!(table.body_rows().len(), 1);
                assert_eq!(rest.content(), "after");
            }
            other => panic!("expected finished table, got {other:?}"),
        }
    }

    #[test]
    fn narrower_content_line_finishes_table() {
        let (steps, _) = run("+---+\n| a |\n+---+\n| b  |\n");
        assert!(matches!(steps.last(), Some(Step::Finished { rest, .. }) if rest.content() == "| b  |"));
    }

    #[test]
    fn single_border_is_not_a_table() {
        assert_eq!(rejected_count("+---+\n| a |\nafter\n"), 3);
        assert_eq!(rejected_count("+---+\n| a |\n"), 2);
    }

    #[test]
    fn shifted_corners_reject_the_table() {
        assert_eq!(
            rejected_count(
                "+---+---+\n\
                 | a | b |\n\
                 +----+--+\n"
            ),
            3
        );
    }

    #[test]
    fn changed_border_width_rejects_the_table() {
        assert_eq!(rejected_count("+---+\n| a |\n+---+--+\n"), 3);
    }

    #[test]
    fn blank_first_border_is_not_a_table() {
        assert_eq!(rejected_count("+---+   +\n"), 1);
    }

    #[test]
    fn corner_inside_row_span_rejects() {
        assert_eq!(
            rejected_count(
                "+---+---+\n\
                 |   a   |\n\
                 +   +   +\n"
            ),
            3
        );
    }

    #[test]
    fn splitting_a_row_span_rejects() {
        assert_eq!(
            rejected_count(
                "+---+---+\n\
                 |  wide |\n\
                 +       +\n\
                 | x | y |\n"
            ),
            4
        );
    }

    #[test]
    fn row_span_across_header_separator_rejects() {
        assert_eq!(
            rejected_count(
                "+---+---+\n\
                 | a | b |\n\
                 +===+   +\n"
            ),
            3
        );
    }

    #[test]
    fn repeated_header_border_passes_fill_through() {
        let t = table(
            "+-----+\n\
             | a   |\n\
             +=====+\n\
             | b   |\n\
             +=====+\n\
             | c   |\n\
             +-----+\n",
        );
        assert_eq!(t.header_rows().len(), 1);
        assert_eq!(t.body_rows().len(), 2);
        let merged = t.body_rows()[0].cells().next().unwrap();
        assert_eq!(merged.row_span, 2);
        assert_eq!(merged.raw_lines, [" b   ", "=====", " c   "]);
    }

    #[test]
    fn consecutive_borders_add_no_row() {
        let t = table(
            "+---+\n\
             +---+\n\
             | a |\n\
             +---+\n",
        );
        assert_eq!(t.body_rows().len(), 1);
    }

    #[test]
    fn border_only_table_is_rejected() {
        assert_eq!(rejected_count("+---+\n+---+\n"), 2);
    }

    #[test]
    fn sniffs_borders_only() {
        assert!(GridAssembler::sniff("+---+---+"));
        assert!(!GridAssembler::sniff("| a |"));
        assert!(!GridAssembler::sniff("+ not a border"));
    }
}
