/// Fence character of a code fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// A fence-shaped line: its character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
}

/// Code fence syntax knowledge.
pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    pub fn sig(text: &str) -> Option<FenceSig> {
        let t = text.trim_end_matches(['\r', '\n']);
        let kind = match t.chars().next()? {
            '`' => FenceKind::Backticks,
            '~' => FenceKind::Tildes,
            _ => return None,
        };
        let fence_char = Self::char_of(kind);
        let len = t.chars().take_while(|c| *c == fence_char).count();
        (len >= Self::MIN_LEN).then_some(FenceSig { kind, len })
    }

    fn char_of(kind: FenceKind) -> char {
        match kind {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }

    /// Whether `text` closes a fence opened by `open`: same character, at
    /// least as long, nothing but whitespace after the run.
    pub fn closes(open: FenceSig, text: &str) -> bool {
        let Some(sig) = Self::sig(text) else {
            return false;
        };
        let rest = &text.trim_end_matches(['\r', '\n'])[sig.len..];
        sig.kind == open.kind && sig.len >= open.len && rest.trim().is_empty()
    }
}
