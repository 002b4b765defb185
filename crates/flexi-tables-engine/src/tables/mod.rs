//! # Tables
//!
//! Recognition and rendering of pipe and grid tables.
//!
//! ## Flow
//!
//! 1. **Sniffing**: the host asks each registered [`TableBlockType`] whether a
//!    line at a block start can open its table.
//! 2. **Assembly**: the matching [`TableAssembler`] is fed one line at a
//!    time. Each line is classified against the table's [`ColumnLayout`]
//!    ([`classify`]) and either extends the table, finishes it, or rejects
//!    the whole attempt so the host can replay the lines as plain content.
//! 3. **Rendering**: a finished [`TableModel`] plus resolved
//!    [`TableOptions`] becomes an HTML element tree ([`render`]).
//!
//! ## Modules
//!
//! - **`classify`**: per-line classification (`LineClass`)
//! - **`layout`**: column count, alignment and grid boundaries
//! - **`model`**: the finished, immutable table grid
//! - **`pipe`** / **`grid`**: the two assembler state machines
//! - **`options`**: layered option resolution and extension settings
//! - **`render`**: HTML output for the three render modes

pub mod assembler;
pub mod classify;
pub mod grid;
pub mod layout;
pub mod model;
pub mod options;
pub mod pipe;
pub mod render;

pub use assembler::{Outcome, Step, TableAssembler};
pub use classify::{LineClass, TableLineClassifier};
pub use grid::GridAssembler;
pub use layout::{Alignment, ColumnLayout};
pub use model::{Cell, CellContent, Row, RowSlot, TableModel};
pub use options::{
    OptionsError, RenderMode, SeparatorRowRule, TableOptions, TableOptionsOverride,
    TablesExtension,
};
pub use pipe::PipeAssembler;
pub use render::{CellRenderer, PulldownCellRenderer, TableRenderer, render_table};

use crate::parsing::blocks::{BlockRegistry, TableBlockType};

pub const GRID: TableBlockType = TableBlockType {
    name: "grid",
    sniff: GridAssembler::sniff,
    open: |_| Box::new(GridAssembler::new()),
};

pub const PIPE: TableBlockType = TableBlockType {
    name: "pipe",
    sniff: PipeAssembler::sniff,
    open: |extension| Box::new(PipeAssembler::new(extension.separator_rows)),
};

/// Registers the table block types enabled in `extension`.
pub fn register(registry: &mut BlockRegistry, extension: &TablesExtension) {
    if extension.grid {
        registry.register(GRID);
    }
    if extension.pipe {
        registry.register(PIPE);
    }
}
