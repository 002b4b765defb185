//! Lines of a failed table attempt render exactly as they would with table
//! recognition switched off.

use flexi_tables_engine::{TablesExtension, render_markdown};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn disabled() -> TablesExtension {
    TablesExtension {
        pipe: false,
        grid: false,
        ..Default::default()
    }
}

#[rstest]
#[case::cell_count_mismatch("| a | b |\n|---|---|\n| 1 | 2 | 3 |\n")]
#[case::missing_delimiter("| a | b |\n| 1 | 2 |\n\nafter\n")]
#[case::header_then_blank("| a | b |\n\ntext\n")]
#[case::header_then_fence("| a |\n```\ncode\n```\n")]
#[case::lone_delimiter("|---|\n\n")]
#[case::single_border("+---+\n| a |\nafter\n")]
#[case::border_at_eof("+---+---+\n")]
#[case::shifted_border("+---+---+\n| a | b |\n+----+--+\n")]
#[case::blank_first_border("+---+   +\n| a |   |\n+---+---+\n")]
#[case::split_row_span("+---+---+\n|  wide |\n+       +\n| x | y |\n+---+---+\n")]
#[case::grid_then_pipe_lines("+---+\n| a |\n| a | b |\n|---|---|\n| 1 | 2 |\n")]
#[case::after_paragraph("text\n| a |\n|---|\n| 1 |\n")]
#[case::released_header_without_rows("| a | b | c |\n|---|---|\n")]
#[case::released_header_then_long_row("| a | b | c |\n|---|---|\n| 0 | 1 | 2 |\n")]
#[case::released_header_then_short_row("| a | b | c |\n|---|---|\n| 0 |\n")]
fn failed_tables_render_as_text(#[case] md: &str) {
    let with_tables = render_markdown(md, &TablesExtension::default());
    assert!(!with_tables.contains("flexi-table"), "unexpected table in {with_tables}");
    assert_eq!(with_tables, render_markdown(md, &disabled()));
}

#[test]
fn text_around_a_table_is_unchanged() {
    let md = "intro *text*\n\n| a |\n|---|\n| 1 |\n\n| not | a table |\n| 1 |\n";
    let with_tables = render_markdown(md, &TablesExtension::default());
    let without = render_markdown(md, &disabled());

    assert!(with_tables.starts_with("<p>intro <em>text</em></p>\n<div class=\"flexi-table"));
    assert!(with_tables.ends_with("</div>\n<p>| not | a table |\n| 1 |</p>\n"));
    assert!(without.ends_with("<p>| not | a table |\n| 1 |</p>\n"));
}
