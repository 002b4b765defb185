//! Pipe table assembly.
//!
//! ```text
//! | a | b |        <- header row (optional)
//! |:--|--:|        <- delimiter row: column count + alignment
//! | 0 | 1 |        <- body rows
//! ```

use log::debug;

use crate::parsing::rope::LineRef;

use super::{
    assembler::{Outcome, Step, TableAssembler},
    classify::{LineClass, PipeDelimiter, TableLineClassifier, split_pipe_row},
    layout::ColumnLayout,
    model::{Cell, CellContent, Row, RowSlot, TableModel},
    options::SeparatorRowRule,
};

#[derive(Debug)]
struct PipeTable {
    layout: ColumnLayout,
    /// Trimmed text of the delimiter row that established the layout.
    delimiter: String,
    header: Option<Row>,
    body: Vec<Row>,
    lines: Vec<LineRef>,
}

impl PipeTable {
    fn open(delimiter: PipeDelimiter, line: &LineRef, header: Option<Row>) -> Self {
        Self {
            layout: ColumnLayout::pipe(delimiter.alignments),
            delimiter: line.content().trim().to_string(),
            header,
            body: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Finalizes the table, or hands its lines back when it holds no rows.
    fn conclude(self) -> Result<TableModel, Vec<LineRef>> {
        if self.header.is_none() && self.body.is_empty() {
            debug!("pipe table has no rows, rejecting {} lines", self.lines.len());
            return Err(self.lines);
        }
        debug!(
            "pipe table finalized: {} columns, {} body rows",
            self.layout.column_count(),
            self.body.len()
        );
        Ok(TableModel::new(
            self.layout,
            self.header.into_iter().collect(),
            self.body,
            CellContent::Inline,
        ))
    }
}

#[derive(Debug)]
enum PipeState {
    Empty,
    /// A candidate header row waits for its delimiter.
    AwaitingDelimiter { stash: LineRef, cells: Vec<String> },
    /// Layout known, no body row yet.
    HeaderEstablished(PipeTable),
    Body(PipeTable),
    Terminated,
}

/// Line-at-a-time pipe table state machine.
#[derive(Debug)]
pub struct PipeAssembler {
    state: PipeState,
    separator_rows: SeparatorRowRule,
    classifier: TableLineClassifier,
}

impl PipeAssembler {
    #[must_use]
    pub fn new(separator_rows: SeparatorRowRule) -> Self {
        Self {
            state: PipeState::Empty,
            separator_rows,
            classifier: TableLineClassifier,
        }
    }

    /// Whether `line` can open a pipe table.
    #[must_use]
    pub fn sniff(line: &str) -> bool {
        matches!(
            TableLineClassifier.classify(line, None),
            LineClass::PipeRow(_) | LineClass::PipeDelimiterLine(_)
        )
    }

    fn extend(&mut self, mut table: PipeTable, line: LineRef) -> Step {
        if line.is_blank() {
            return Self::terminate(table, line);
        }
        match self.classifier.classify(line.content(), Some(&table.layout)) {
            LineClass::PipeRow(row) => {
                table.body.push(plain_row(row.cells));
            }
            LineClass::PipeDelimiterLine(delimiter) => match self.separator_rows {
                SeparatorRowRule::AnyDelimiter => {
                    table.body.push(separator_row(delimiter.cells));
                }
                SeparatorRowRule::MatchHeaderDelimiter
                    if line.content().trim() == table.delimiter =>
                {
                    table.body.push(separator_row(delimiter.cells));
                }
                SeparatorRowRule::MatchHeaderDelimiter => {
                    table.body.push(plain_row(delimiter.cells));
                }
                SeparatorRowRule::Terminate => return Self::terminate(table, line),
            },
            _ if split_pipe_row(line.content()).is_some() => {
                debug!(
                    "pipe row does not have {} cells, rejecting table",
                    table.layout.column_count()
                );
                let mut lines = table.lines;
                lines.push(line);
                return Step::Rejected(lines);
            }
            _ => return Self::terminate(table, line),
        }
        table.lines.push(line);
        self.state = PipeState::Body(table);
        Step::Consumed
    }

    fn terminate(table: PipeTable, rest: LineRef) -> Step {
        match table.conclude() {
            Ok(table) => Step::Finished { table, rest },
            Err(mut lines) => {
                lines.push(rest);
                Step::Rejected(lines)
            }
        }
    }
}

impl TableAssembler for PipeAssembler {
    fn push(&mut self, line: LineRef) -> Step {
        match std::mem::replace(&mut self.state, PipeState::Terminated) {
            PipeState::Empty => match self.classifier.classify(line.content(), None) {
                LineClass::PipeDelimiterLine(delimiter) => {
                    let mut table = PipeTable::open(delimiter, &line, None);
                    table.lines.push(line);
                    self.state = PipeState::HeaderEstablished(table);
                    Step::Consumed
                }
                LineClass::PipeRow(row) => {
                    self.state = PipeState::AwaitingDelimiter {
                        stash: line,
                        cells: row.cells,
                    };
                    Step::Consumed
                }
                _ => Step::Rejected(vec![line]),
            },
            PipeState::AwaitingDelimiter { stash, cells } => {
                match self.classifier.classify(line.content(), None) {
                    LineClass::PipeDelimiterLine(delimiter)
                        if delimiter.alignments.len() == cells.len() =>
                    {
                        let mut header = plain_row(cells);
                        header.promote_to_header();
                        let mut table = PipeTable::open(delimiter, &line, Some(header));
                        table.lines.extend([stash, line]);
                        self.state = PipeState::HeaderEstablished(table);
                        Step::Consumed
                    }
                    LineClass::PipeDelimiterLine(delimiter) => {
                        debug!(
                            "header has {} cells but delimiter has {}, opening headerless table",
                            cells.len(),
                            delimiter.alignments.len()
                        );
                        let mut table = PipeTable::open(delimiter, &line, None);
                        table.lines.push(line);
                        self.state = PipeState::HeaderEstablished(table);
                        Step::Released(vec![stash])
                    }
                    _ => Step::Rejected(vec![stash, line]),
                }
            }
            PipeState::HeaderEstablished(table) | PipeState::Body(table) => {
                self.extend(table, line)
            }
            PipeState::Terminated => Step::Rejected(vec![line]),
        }
    }

    fn finish(self: Box<Self>) -> Outcome {
        match self.state {
            PipeState::HeaderEstablished(table) | PipeState::Body(table) => {
                match table.conclude() {
                    Ok(table) => Outcome::Table(table),
                    Err(lines) => Outcome::Rejected(lines),
                }
            }
            PipeState::AwaitingDelimiter { stash, .. } => Outcome::Rejected(vec![stash]),
            PipeState::Empty | PipeState::Terminated => Outcome::Rejected(vec![]),
        }
    }
}

fn plain_row(cells: Vec<String>) -> Row {
    Row::new(
        cells
            .into_iter()
            .enumerate()
            .map(|(column, text)| RowSlot::Anchor(Cell::new(column, 1, vec![text])))
            .collect(),
    )
}

fn separator_row(cells: Vec<String>) -> Row {
    Row {
        is_separator: true,
        ..plain_row(cells)
    }
}
