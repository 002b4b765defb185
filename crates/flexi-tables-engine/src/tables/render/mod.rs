//! HTML rendering of finished tables.
//!
//! Class names follow BEM: with block name `B` the wrapper is
//! `B B_type_<mode>`, and the inner elements are `B__table`, `B__head`,
//! `B__body`, `B__row`, `B__header`, `B__data`, `B__label` and `B__content`,
//! with `_align_*` modifiers on aligned cells.
//!
//! Cards mode keeps the same classes but renders every part as a `div`, so
//! rows can stack: there is no `<table>` around the rows and cells carry no
//! `rowspan`/`colspan`.

pub mod cell;
pub mod html;

pub use cell::{CellRenderer, PulldownCellRenderer, cell_source};
pub use html::{Element, HtmlNode};

use super::{
    model::{Cell, CellContent, Row, RowSlot, TableModel},
    options::{RenderMode, TableOptions},
};

/// Renders a table to its element tree.
#[must_use]
pub fn render_table(
    table: &TableModel,
    options: &TableOptions,
    cells: &dyn CellRenderer,
) -> Element {
    TableRenderer::new(options, cells).render(table)
}

pub struct TableRenderer<'a> {
    options: &'a TableOptions,
    cells: &'a dyn CellRenderer,
}

impl<'a> TableRenderer<'a> {
    #[must_use]
    pub fn new(options: &'a TableOptions, cells: &'a dyn CellRenderer) -> Self {
        Self { options, cells }
    }

    fn cards(&self) -> bool {
        self.options.render_mode == RenderMode::Cards
    }

    /// Table tags turn into `div`s in cards mode.
    fn tag(&self, name: &'static str) -> &'static str {
        if self.cards() { "div" } else { name }
    }

    fn class(&self, element: &str) -> String {
        format!("{}__{element}", self.options.block_name)
    }

    fn wrapper(&self) -> Element {
        let block = &self.options.block_name;
        let mut class = format!("{block} {block}_type_{}", self.options.render_mode.modifier());
        if let Some(extra) = self.options.attributes.get("class") {
            class.push(' ');
            class.push_str(extra);
        }
        self.options
            .attributes
            .iter()
            .filter(|(name, _)| name.as_str() != "class")
            .fold(Element::block("div").class(class), |el, (name, value)| {
                el.attr(name.as_str(), value.as_str())
            })
    }

    #[must_use]
    pub fn render(&self, table: &TableModel) -> Element {
        let sections = [
            ("thead", "head", table.header_rows()),
            ("tbody", "body", table.body_rows()),
        ]
        .into_iter()
        .filter(|(_, _, rows)| !rows.is_empty())
        .map(|(tag, role, rows)| {
            rows.iter().fold(
                Element::block(self.tag(tag)).class(self.class(role)),
                |section, row| section.child(self.row(table, row)),
            )
        });

        if self.cards() {
            return sections.fold(self.wrapper(), |el, section| el.child(section));
        }
        let inner = sections.fold(
            Element::block("table").class(self.class("table")),
            |el, section| el.child(section),
        );
        self.wrapper().child(inner)
    }

    fn row(&self, table: &TableModel, row: &Row) -> Element {
        let mut tr = Element::block(self.tag("tr")).class(self.class("row"));
        for slot in &row.slots {
            // continuation slots render nothing; their anchor holds the content
            if let RowSlot::Anchor(cell) = slot {
                tr.push(self.cell(table, row, cell));
            }
        }
        tr
    }

    fn cell(&self, table: &TableModel, row: &Row, cell: &Cell) -> Element {
        let (tag, role) = if row.is_header_row {
            ("th", "header")
        } else {
            ("td", "data")
        };
        let base = self.class(role);
        let class = match table.layout().alignment(cell.start_column).modifier() {
            Some(modifier) => format!("{base} {base}{modifier}"),
            None => base,
        };

        let mut el = Element::inline(self.tag(tag)).class(class);
        if !self.cards() {
            if cell.row_span > 1 {
                el = el.attr("rowspan", cell.row_span.to_string());
            }
            if cell.col_span > 1 {
                el = el.attr("colspan", cell.col_span.to_string());
            }
        }

        if row.is_separator {
            return el.child(Element::void("hr"));
        }

        let content = HtmlNode::Raw(self.content(table, cell));
        if row.is_header_row || !self.cards() {
            return el.child(content);
        }
        if let Some(title) = table.header_cell_at(cell.start_column) {
            el.push(
                Element::inline("div")
                    .class(self.class("label"))
                    .child(HtmlNode::Raw(self.content(table, title))),
            );
        }
        el.child(
            Element::inline("div")
                .class(self.class("content"))
                .child(content),
        )
    }

    fn content(&self, table: &TableModel, cell: &Cell) -> String {
        let source = cell_source(&cell.raw_lines);
        match table.content() {
            CellContent::Inline => self.cells.render_inline(&source),
            CellContent::Blocks => self.cells.render_blocks(&source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::tables::layout::{Alignment, ColumnLayout};
    use pretty_assertions::assert_eq;

    fn cell(start: usize, span: usize, text: &str) -> RowSlot {
        RowSlot::Anchor(Cell::new(start, span, vec![text.to_string()]))
    }

    fn header_row(slots: Vec<RowSlot>) -> Row {
        let mut row = Row::new(slots);
        row.promote_to_header();
        row
    }

    fn aligned_table() -> TableModel {
        TableModel::new(
            ColumnLayout::pipe(vec![Alignment::Start, Alignment::End]),
            vec![header_row(vec![cell(0, 1, "a"), cell(1, 1, "*b*")])],
            vec![Row::new(vec![cell(0, 1, "1"), cell(1, 1, "2 & 3")])],
            CellContent::Inline,
        )
    }

    fn render(table: &TableModel, options: &TableOptions) -> String {
        render_table(table, options, &PulldownCellRenderer::default()).to_html()
    }

    fn mode(render_mode: RenderMode) -> TableOptions {
        TableOptions {
            render_mode,
            ..Default::default()
        }
    }

    #[test]
    fn unresponsive_shape() {
        assert_eq!(
            render(&aligned_table(), &mode(RenderMode::Unresponsive)),
            "\
<div class=\"flexi-table flexi-table_type_unresponsive\">
<table class=\"flexi-table__table\">
<thead class=\"flexi-table__head\">
<tr class=\"flexi-table__row\">
<th class=\"flexi-table__header flexi-table__header_align_start\">a</th>
<th class=\"flexi-table__header flexi-table__header_align_end\"><em>b</em></th>
</tr>
</thead>
<tbody class=\"flexi-table__body\">
<tr class=\"flexi-table__row\">
<td class=\"flexi-table__data flexi-table__data_align_start\">1</td>
<td class=\"flexi-table__data flexi-table__data_align_end\">2 &amp; 3</td>
</tr>
</tbody>
</table>
</div>
"
        );
    }

    #[test]
    fn fixed_titles_differs_only_in_wrapper() {
        let fixed = render(&aligned_table(), &mode(RenderMode::FixedTitles));
        let unresponsive = render(&aligned_table(), &mode(RenderMode::Unresponsive));
        assert_eq!(
            fixed,
            unresponsive.replace("_type_unresponsive", "_type_fixed-titles")
        );
    }

    #[test]
    fn cards_label_body_cells() {
        assert_eq!(
            render(&aligned_table(), &mode(RenderMode::Cards)),
            "\
<div class=\"flexi-table flexi-table_type_cards\">
<div class=\"flexi-table__head\">
<div class=\"flexi-table__row\">
<div class=\"flexi-table__header flexi-table__header_align_start\">a</div>
<div class=\"flexi-table__header flexi-table__header_align_end\"><em>b</em></div>
</div>
</div>
<div class=\"flexi-table__body\">
<div class=\"flexi-table__row\">
<div class=\"flexi-table__data flexi-table__data_align_start\"><div class=\"flexi-table__label\">a</div>
<div class=\"flexi-table__content\">1</div>
</div>
<div class=\"flexi-table__data flexi-table__data_align_end\"><div class=\"flexi-table__label\"><em>b</em></div>
<div class=\"flexi-table__content\">2 &amp; 3</div>
</div>
</div>
</div>
</div>
"
        );
    }

    #[test]
    fn cards_have_no_table_elements_or_spans() {
        let mut wide = Cell::new(0, 2, vec!["w".into()]);
        wide.row_span = 2;
        let table = TableModel::new(
            ColumnLayout::grid(vec![0, 4, 8], vec![Alignment::None; 2]),
            vec![],
            vec![
                Row::new(vec![RowSlot::Anchor(wide)]),
                Row::new(vec![RowSlot::Continuation {
                    start_column: 0,
                    col_span: 2,
                    anchor_row: 0,
                }]),
            ],
            CellContent::Inline,
        );
        let html = render(&table, &TableOptions::default());
        for tag in ["<table", "<thead", "<tbody", "<tr", "<td", "<th", "span="] {
            assert!(!html.contains(tag), "{tag} in {html}");
        }
        assert!(html.contains("<div class=\"flexi-table__data\"><div class=\"flexi-table__content\">w</div>\n</div>\n"));
    }

    #[test]
    fn cards_without_header_omit_label() {
        let table = TableModel::new(
            ColumnLayout::pipe(vec![Alignment::None]),
            vec![],
            vec![Row::new(vec![cell(0, 1, "x")])],
            CellContent::Inline,
        );
        assert_eq!(
            render(&table, &TableOptions::default()),
            "\
<div class=\"flexi-table flexi-table_type_cards\">
<div class=\"flexi-table__body\">
<div class=\"flexi-table__row\">
<div class=\"flexi-table__data\"><div class=\"flexi-table__content\">x</div>
</div>
</div>
</div>
</div>
"
        );
    }

    #[test]
    fn spans_and_continuations() {
        let layout = ColumnLayout::grid(vec![0, 4, 8], vec![Alignment::None; 2]);
        let mut tall = Cell::new(1, 1, vec![" b ".into(), " d ".into()]);
        tall.row_span = 2;
        let table = TableModel::new(
            layout,
            vec![],
            vec![
                Row::new(vec![cell(0, 1, " a "), RowSlot::Anchor(tall)]),
                Row::new(vec![
                    cell(0, 1, " c "),
                    RowSlot::Continuation {
                        start_column: 1,
                        col_span: 1,
                        anchor_row: 0,
                    },
                ]),
                Row::new(vec![cell(0, 2, " wide ")]),
            ],
            CellContent::Blocks,
        );
        let html = render(&table, &mode(RenderMode::Unresponsive));
        assert!(html.contains("<td class=\"flexi-table__data\" rowspan=\"2\"><p>b\nd</p>\n</td>\n"));
        assert!(html.contains(
            "<tr class=\"flexi-table__row\">\n<td class=\"flexi-table__data\"><p>c</p>\n</td>\n</tr>\n"
        ));
        assert!(html.contains("<td class=\"flexi-table__data\" colspan=\"2\"><p>wide</p>\n</td>\n"));
    }

    #[test]
    fn separator_rows_render_rules() {
        let mut separator = Row::new(vec![cell(0, 1, "---")]);
        separator.is_separator = true;
        let table = TableModel::new(
            ColumnLayout::pipe(vec![Alignment::None]),
            vec![],
            vec![Row::new(vec![cell(0, 1, "x")]), separator],
            CellContent::Inline,
        );
        let html = render(&table, &mode(RenderMode::Unresponsive));
        assert!(html.contains("<td class=\"flexi-table__data\"><hr /></td>\n"));
        let html = render(&table, &TableOptions::default());
        assert!(html.contains("<div class=\"flexi-table__data\"><hr /></div>\n"));
    }

    #[test]
    fn wrapper_attributes_and_block_name() {
        let options = TableOptions {
            block_name: "docs".into(),
            render_mode: RenderMode::Unresponsive,
            attributes: BTreeMap::from([
                ("id".to_string(), "t1".to_string()),
                ("class".to_string(), "wide".to_string()),
                ("data-x".to_string(), "\"q\"".to_string()),
            ]),
        };
        let html = render(&aligned_table(), &options);
        assert!(html.starts_with(
            "<div class=\"docs docs_type_unresponsive wide\" data-x=\"&quot;q&quot;\" id=\"t1\">\n\
             <table class=\"docs__table\">\n"
        ));
    }
}
