use crate::parsing::rope::LineRef;

use super::model::TableModel;

/// Result of feeding one line to a [`TableAssembler`].
#[derive(Debug)]
pub enum Step {
    /// The line was absorbed into the table.
    Consumed,
    /// The line was absorbed, but these earlier lines turned out not to be
    /// part of the table. They precede it and are ordinary content.
    Released(Vec<LineRef>),
    /// The table is complete. `rest` was not consumed and must be handled by
    /// the host as if the table had never seen it.
    Finished { table: TableModel, rest: LineRef },
    /// The buffered lines, the current one included, do not form a table.
    Rejected(Vec<LineRef>),
}

/// Result of ending the document while a table is open.
#[derive(Debug)]
pub enum Outcome {
    Table(TableModel),
    Rejected(Vec<LineRef>),
}

/// A line-at-a-time table state machine.
///
/// Once `push` returns [`Step::Finished`] or [`Step::Rejected`] the
/// assembler is spent and must be dropped.
pub trait TableAssembler {
    fn push(&mut self, line: LineRef) -> Step;

    /// Ends the table at end of document.
    fn finish(self: Box<Self>) -> Outcome;
}
