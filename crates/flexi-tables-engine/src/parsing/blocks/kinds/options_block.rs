/// Options block syntax: `o{ ... }` holding a JSON object, possibly over
/// several lines.
pub struct OptionsBlock;

impl OptionsBlock {
    pub const OPENER: &'static str = "o{";

    pub fn opens(text: &str) -> bool {
        text.starts_with(Self::OPENER)
    }

    /// The JSON object of an options block's accumulated text.
    pub fn json(text: &str) -> &str {
        text.strip_prefix('o').unwrap_or(text).trim()
    }
}

/// Tracks `{`/`}` nesting across lines, ignoring braces in JSON strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BraceScanner {
    depth: usize,
    in_string: bool,
    escaped: bool,
    closed: bool,
}

impl BraceScanner {
    pub fn scan(&mut self, text: &str) {
        for c in text.chars() {
            if self.closed {
                return;
            }
            if self.in_string {
                match c {
                    _ if self.escaped => self.escaped = false,
                    '\\' => self.escaped = true,
                    '"' => self.in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => self.in_string = true,
                '{' => self.depth += 1,
                '}' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.closed = self.depth == 0;
                }
                _ => {}
            }
        }
    }

    /// Whether the outermost object has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
