//! # FlexiTables
//!
//! Pipe and grid table blocks for line-oriented markdown documents.
//!
//! A document is read line by line from an `xi_rope::Rope`. Lines at a block
//! start are offered to the registered table block types; a table that fails
//! to validate hands its lines back and they render as ordinary markdown.
//! Finished tables render to HTML in one of three shapes (cards,
//! unresponsive, fixed titles), and everything else goes through
//! pulldown-cmark.
//!
//! ```
//! use flexi_tables_engine::{TablesExtension, render_markdown};
//!
//! let html = render_markdown("| a |\n|---|\n| 1 |\n", &TablesExtension::default());
//! assert!(html.contains("<div class=\"flexi-table__header\">a</div>"));
//! assert!(!html.contains("<table"));
//! ```

pub mod parsing;
pub mod render;
pub mod tables;

// Re-export key types for easier usage
pub use parsing::{
    ParsedDoc,
    blocks::{BlockKind, BlockNode, BlockRegistry, TableBlock, TableBlockType},
    parse_document,
};
pub use render::{render_document, render_markdown};
pub use tables::{
    Alignment, CellRenderer, ColumnLayout, PulldownCellRenderer, RenderMode, SeparatorRowRule,
    TableModel, TableOptions, TableOptionsOverride, TablesExtension,
};
