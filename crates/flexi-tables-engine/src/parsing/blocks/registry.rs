use crate::tables::{TableAssembler, TablesExtension};

/// A table block type: how to recognize its first line and how to build its
/// assembler.
#[derive(Clone, Copy)]
pub struct TableBlockType {
    pub name: &'static str,
    pub sniff: fn(&str) -> bool,
    pub open: fn(&TablesExtension) -> Box<dyn TableAssembler>,
}

impl std::fmt::Debug for TableBlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableBlockType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Table block types known to the block builder, tried in registration
/// order.
#[derive(Debug, Default, Clone)]
pub struct BlockRegistry {
    tables: Vec<TableBlockType>,
}

impl BlockRegistry {
    /// A registry with the table types enabled in `extension`.
    pub fn with_tables(extension: &TablesExtension) -> Self {
        let mut registry = Self::default();
        crate::tables::register(&mut registry, extension);
        registry
    }

    pub fn register(&mut self, block: TableBlockType) {
        self.tables.push(block);
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tables.iter().map(|t| t.name)
    }

    /// The first table type whose sniffer accepts `line`.
    pub fn sniff(&self, line: &str) -> Option<TableBlockType> {
        self.tables.iter().copied().find(|t| (t.sniff)(line))
    }
}
