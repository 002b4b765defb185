use std::sync::OnceLock;

use regex::Regex;

use super::layout::{Alignment, ColumnLayout};

/// Classification of one raw line relative to the table being assembled.
///
/// Produced by [`TableLineClassifier::classify`], which is a pure function of
/// the line and the current layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Every pipe-separated segment looks like `:?-+:?`.
    PipeDelimiterLine(PipeDelimiter),
    /// A pipe-separated row with the expected number of segments.
    PipeRow(PipeRow),
    /// A `+---+===+   +` style border.
    GridBorderLine(BorderLine),
    /// A `| text | text |` line as wide as the grid's borders.
    GridContentLine(ContentLine),
    NotTable,
}

/// Trimmed cell texts of a pipe row, escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeRow {
    pub cells: Vec<String>,
}

/// A delimiter row: per-column alignment plus the raw segment texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeDelimiter {
    pub alignments: Vec<Alignment>,
    pub cells: Vec<String>,
}

/// What fills a border line between two adjacent corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// `-` with optional `:` markers: closes the cell above.
    Plain,
    /// `=` with optional `:` markers: header/body split.
    Header,
    /// Spaces only: the cell above continues below.
    Blank,
    /// Anything else, e.g. `-- ` or `-=-`.
    Mixed,
}

/// A grid border line, kept as chars so offsets are char columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderLine {
    chars: Vec<char>,
    corners: Vec<usize>,
}

impl BorderLine {
    #[must_use]
    pub fn width(&self) -> usize {
        self.chars.len()
    }

    /// Offsets of every `+` on the line.
    #[must_use]
    pub fn corners(&self) -> &[usize] {
        &self.corners
    }

    #[must_use]
    pub fn has_corner(&self, offset: usize) -> bool {
        self.chars.get(offset) == Some(&'+')
    }

    /// Fill between corner offsets `from` and `to`, both exclusive.
    #[must_use]
    pub fn fill(&self, from: usize, to: usize) -> Fill {
        let run = self.between(from, to);
        if run.is_empty() {
            return Fill::Mixed;
        }
        if run.iter().all(|c| *c == ' ') {
            Fill::Blank
        } else if run.iter().all(|c| matches!(c, '-' | ':')) && run.contains(&'-') {
            Fill::Plain
        } else if run.iter().all(|c| matches!(c, '=' | ':')) && run.contains(&'=') {
            Fill::Header
        } else {
            Fill::Mixed
        }
    }

    /// Raw text between `from` and `to`, both exclusive.
    #[must_use]
    pub fn text(&self, from: usize, to: usize) -> String {
        self.between(from, to).iter().collect()
    }

    fn between(&self, from: usize, to: usize) -> &[char] {
        let end = to.min(self.chars.len());
        let start = (from + 1).min(end);
        &self.chars[start..end]
    }
}

/// A grid content line, kept as chars so offsets are char columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    chars: Vec<char>,
}

impl ContentLine {
    /// Whether a `|` cell separator sits at `offset`.
    #[must_use]
    pub fn is_separator(&self, offset: usize) -> bool {
        self.chars.get(offset) == Some(&'|')
    }

    /// Cell text between separator offsets `from` and `to`, both exclusive.
    #[must_use]
    pub fn text(&self, from: usize, to: usize) -> String {
        let end = to.min(self.chars.len());
        let start = (from + 1).min(end);
        self.chars[start..end].iter().collect()
    }
}

/// Classifies lines for pipe and grid table assembly.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableLineClassifier;

impl TableLineClassifier {
    /// Classifies `line` against the layout of the table being assembled.
    ///
    /// Without a layout every syntax is tried (borders first, then
    /// delimiters, then rows). With a layout only that layout's syntax is
    /// considered, and pipe rows must have exactly `column_count` segments.
    pub fn classify(&self, line: &str, layout: Option<&ColumnLayout>) -> LineClass {
        let line = line.trim_end_matches(['\r', '\n']);
        match layout {
            None => {
                if let Some(border) = border_line(line) {
                    return LineClass::GridBorderLine(border);
                }
                match split_pipe_row(line) {
                    Some(cells) => match delimiter(&cells) {
                        Some(alignments) => {
                            LineClass::PipeDelimiterLine(PipeDelimiter { alignments, cells })
                        }
                        None => LineClass::PipeRow(PipeRow { cells }),
                    },
                    None => LineClass::NotTable,
                }
            }
            Some(layout) if layout.is_grid() => {
                if let Some(border) = border_line(line) {
                    return LineClass::GridBorderLine(border);
                }
                let trimmed = line.trim_end();
                let width = trimmed.chars().count();
                if Some(width) == layout.width()
                    && trimmed.starts_with('|')
                    && trimmed.ends_with('|')
                {
                    LineClass::GridContentLine(ContentLine {
                        chars: trimmed.chars().collect(),
                    })
                } else {
                    LineClass::NotTable
                }
            }
            Some(layout) => match split_pipe_row(line) {
                Some(cells) if cells.len() == layout.column_count() => match delimiter(&cells) {
                    Some(alignments) => {
                        LineClass::PipeDelimiterLine(PipeDelimiter { alignments, cells })
                    }
                    None => LineClass::PipeRow(PipeRow { cells }),
                },
                _ => LineClass::NotTable,
            },
        }
    }
}

/// Splits a pipe row on unescaped `|`.
///
/// `\|` becomes a literal `|` inside the cell. One leading and one trailing
/// empty segment produced by edge pipes are dropped and every cell is
/// trimmed. Returns `None` when the line has no unescaped pipe or no cells.
pub fn split_pipe_row(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut pipes = 0usize;
    let mut ends_with_pipe = false;

    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        ends_with_pipe = false;
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                current.push('|');
            }
            '|' => {
                pipes += 1;
                ends_with_pipe = true;
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    cells.push(current);

    if pipes == 0 {
        return None;
    }
    if trimmed.starts_with('|') {
        cells.remove(0);
    }
    if ends_with_pipe {
        cells.pop();
    }
    if cells.is_empty() {
        return None;
    }
    Some(cells.into_iter().map(|c| c.trim().to_string()).collect())
}

fn delimiter(cells: &[String]) -> Option<Vec<Alignment>> {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    let re = DELIMITER.get_or_init(|| Regex::new(r"^:?-+:?$").expect("Invalid delimiter regex"));
    cells
        .iter()
        .map(|c| re.is_match(c).then(|| Alignment::from_fill(c)))
        .collect()
}

fn border_line(line: &str) -> Option<BorderLine> {
    static BORDER: OnceLock<Regex> = OnceLock::new();
    let re = BORDER.get_or_init(|| Regex::new(r"^(\+[-= :]+)+\+$").expect("Invalid border regex"));
    let trimmed = line.trim_end();
    if !re.is_match(trimmed) {
        return None;
    }
    let chars: Vec<char> = trimmed.chars().collect();
    let corners = chars
        .iter()
        .enumerate()
        .filter_map(|(i, c)| (*c == '+').then_some(i))
        .collect();
    Some(BorderLine { chars, corners })
}
