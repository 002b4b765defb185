//! # Block Parsing
//!
//! Two-phase block parsing over the lines of a rope.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (blank status, fence detection)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` tracks the open leaf block
//!    and emits `BlockNode`s as blocks open and close. Table lines are handed to the
//!    assembler of the table type that sniffed the table's first line
//!
//! ## Modules
//!
//! - **`types`**: Core types (`BlockNode`, `BlockKind`, `TableBlock`)
//! - **`kinds`**: Block-specific syntax with owned delimiters (CodeFence, OptionsBlock)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`registry`**: `BlockRegistry` of table block types
//! - **`open`**: `try_open_leaf` dispatch for detecting block openers
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: no table recognition inside
//! - Tables and options blocks open only at a block start
//! - Lines of a rejected table are replayed, so they render exactly as they
//!   would with table recognition disabled
//! - All block nodes store byte spans into the rope

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;
pub mod registry;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use registry::{BlockRegistry, TableBlockType};
pub use types::{BlockKind, BlockNode, TableBlock};
