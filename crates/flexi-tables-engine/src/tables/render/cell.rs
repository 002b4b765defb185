use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

/// Renders cell text (and host blocks) to HTML.
pub trait CellRenderer {
    /// Renders a fragment of block markdown.
    fn render_blocks(&self, markdown: &str) -> String;

    /// Renders one line of inline markdown, without a wrapping paragraph.
    fn render_inline(&self, markdown: &str) -> String;
}

/// [`CellRenderer`] backed by pulldown-cmark's HTML writer.
#[derive(Debug, Clone, Copy)]
pub struct PulldownCellRenderer {
    options: Options,
}

impl Default for PulldownCellRenderer {
    fn default() -> Self {
        Self::new(Options::ENABLE_STRIKETHROUGH)
    }
}

impl PulldownCellRenderer {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl CellRenderer for PulldownCellRenderer {
    fn render_blocks(&self, markdown: &str) -> String {
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(markdown, self.options));
        out
    }

    fn render_inline(&self, markdown: &str) -> String {
        let events = Parser::new_ext(markdown, self.options).filter(|event| {
            !matches!(
                event,
                Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)
            )
        });
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events);
        out.truncate(out.trim_end_matches('\n').len());
        out
    }
}

/// Normalizes a cell's raw lines into the markdown handed to a renderer.
///
/// Lines are trimmed at the end and dedented by their smallest common
/// indent; leading and trailing blank lines are dropped.
pub fn cell_source(raw_lines: &[String]) -> String {
    let lines: Vec<&str> = raw_lines.iter().map(|l| l.trim_end()).collect();
    let indent = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    let Some(first) = lines.iter().position(|l| !l.is_empty()) else {
        return String::new();
    };
    let last = lines.iter().rposition(|l| !l.is_empty()).unwrap_or(first);

    lines[first..=last]
        .iter()
        .map(|l| l.chars().skip(indent).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
