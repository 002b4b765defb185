use crate::{
    parsing::rope::span::Span,
    tables::{TableModel, TableOptions},
};

use super::kinds::FenceKind;

/// A finished table and the options it renders with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    /// Name of the block type that recognized it (`pipe` or `grid`).
    pub block_type: &'static str,
    pub model: TableModel,
    pub options: TableOptions,
}

/// The kind of a leaf block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A paragraph block (default when no other block opener matches).
    Paragraph,
    /// A fenced code block (``` or ~~~).
    FencedCode {
        /// Whether backticks or tildes were used.
        kind: FenceKind,
    },
    /// An `o{...}` options block for the table after it.
    Options,
    Table(TableBlock),
}

/// A parsed block node with its kind and spans.
#[derive(Debug, Clone)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// Full byte span of the block including delimiters.
    pub span: Span,
    /// Content span handed to rendering.
    pub content_span: Span,
}
