pub mod code_fence;
pub mod options_block;

pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use options_block::{BraceScanner, OptionsBlock};
