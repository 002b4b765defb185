//! A small HTML element tree with escaping on serialization.

use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::warn;

/// How an element lays out its tags when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Newline after the open tag and after the close tag.
    Block,
    /// Newline after the close tag only.
    Inline,
    /// Self-closing, no children.
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element(Element),
    /// Escaped on output.
    Text(String),
    /// Pre-rendered HTML, emitted as is.
    Raw(String),
}

impl From<Element> for HtmlNode {
    fn from(element: Element) -> Self {
        HtmlNode::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: &'static str,
    layout: Layout,
    attributes: Vec<(String, String)>,
    children: Vec<HtmlNode>,
}

impl Element {
    fn new(name: &'static str, layout: Layout) -> Self {
        Self {
            name,
            layout,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// An element whose children start on their own line (`div`, `table`, `tr`).
    #[must_use]
    pub fn block(name: &'static str) -> Self {
        Self::new(name, Layout::Block)
    }

    /// An element whose children follow the open tag directly (`td`, `th`).
    #[must_use]
    pub fn inline(name: &'static str) -> Self {
        Self::new(name, Layout::Inline)
    }

    /// A self-closing element such as `<hr />`.
    #[must_use]
    pub fn void(name: &'static str) -> Self {
        Self::new(name, Layout::Void)
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if is_attribute_name(&name) {
            self.attributes.push((name, value.into()));
        } else {
            warn!("Dropping invalid HTML attribute name {name:?}");
        }
        self
    }

    #[must_use]
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<HtmlNode>) -> Self {
        self.push(node);
        self
    }

    pub fn push(&mut self, node: impl Into<HtmlNode>) {
        if self.layout != Layout::Void {
            self.children.push(node.into());
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn children(&self) -> &[HtmlNode] {
        &self.children
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&encode_double_quoted_attribute(value));
            out.push('"');
        }
        if self.layout == Layout::Void {
            out.push_str(" />");
            return;
        }
        out.push('>');
        if self.layout == Layout::Block {
            out.push('\n');
        }
        for child in &self.children {
            match child {
                HtmlNode::Element(el) => el.write_html(out),
                HtmlNode::Text(text) => out.push_str(&encode_text(text)),
                HtmlNode::Raw(html) => out.push_str(html),
            }
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push_str(">\n");
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_and_inline_layout() {
        let el = Element::block("tr")
            .class("row")
            .child(Element::inline("td").child(HtmlNode::Text("a".into())))
            .child(Element::inline("td").child(Element::void("hr")));
        assert_eq!(
            el.to_html(),
            "<tr class=\"row\">\n<td>a</td>\n<td><hr /></td>\n</tr>\n"
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let el = Element::inline("td")
            .attr("title", "say \"hi\" & <go>")
            .child(HtmlNode::Text("1 < 2 & 3".into()))
            .child(HtmlNode::Raw("<em>x</em>".into()));
        assert_eq!(
            el.to_html(),
            "<td title=\"say &quot;hi&quot; &amp; &lt;go&gt;\">1 &lt; 2 &amp; 3<em>x</em></td>\n"
        );
    }

    #[test]
    fn drops_invalid_attribute_names() {
        let el = Element::block("div")
            .attr("data-x", "1")
            .attr("on click", "x")
            .attr("\"><script", "x");
        assert_eq!(el.attribute("data-x"), Some("1"));
        assert_eq!(el.to_html(), "<div data-x=\"1\">\n</div>\n");
    }

    #[test]
    fn void_elements_ignore_children() {
        let mut hr = Element::void("hr");
        hr.push(HtmlNode::Text("x".into()));
        assert!(hr.children().is_empty());
        assert_eq!(hr.to_string(), "<hr />");
    }
}
