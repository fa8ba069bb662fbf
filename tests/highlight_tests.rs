//! Highlighting across inline markup, through a session and directly

use kodegen_tools_tableview::Highlighter;
use kodegen_tools_tableview::text::normalize;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

mod common;

fn cell(markup: &str) -> NodeRef {
    let document = kuchiki::parse_html().one(format!(
        "<table><tbody><tr><td>{markup}</td></tr></tbody></table>"
    ));
    document
        .select_first("td")
        .expect("fixture has a cell")
        .as_node()
        .clone()
}

fn inner(cell: &NodeRef) -> String {
    let mut out = Vec::new();
    for child in cell.children() {
        child.serialize(&mut out).expect("serialize");
    }
    String::from_utf8(out).expect("utf-8")
}

fn marks(cell: &NodeRef) -> Vec<String> {
    cell.select("mark.highlight")
        .expect("valid selector")
        .map(|m| m.as_node().text_contents())
        .collect()
}

#[test]
fn test_match_spanning_bold_accent_is_one_marker() {
    let mut session = common::session(&common::create_two_table_html());
    let outcome = session.search("cafe");

    assert_eq!(outcome.first_match, Some((0, 0)));
    let html = session.to_html().expect("serialize");
    assert!(
        html.contains(r#"<td><mark class="highlight">Caf<b>é</b></mark> shop</td>"#),
        "unexpected markup: {html}"
    );
}

#[test]
fn test_repeated_search_does_not_nest_markers() {
    let mut session = common::session(&common::create_two_table_html());
    session.search("cafe");
    let first = session.to_html().expect("serialize");
    session.search("cafe");
    let second = session.to_html().expect("serialize");

    assert_eq!(first, second);
    assert!(!second.contains("<mark class=\"highlight\"><mark"));
}

#[test]
fn test_clearing_query_restores_original_markup() {
    let mut session = common::session(&common::create_two_table_html());
    let original = session.to_html().expect("serialize");

    session.search("paris");
    assert!(session.to_html().expect("serialize").contains("<mark"));
    session.search("");

    assert_eq!(session.to_html().expect("serialize"), original);
}

#[test]
fn test_every_occurrence_is_wrapped() {
    let highlighter = Highlighter::new("mark", "highlight").expect("valid marker");
    let td = cell("😀 smile 😀 smile");

    let report = highlighter.highlight_cell(&td, &normalize("smile"));

    assert_eq!(report.matches, 2);
    assert_eq!(report.applied, 2);
    assert_eq!(marks(&td), vec!["smile", "smile"]);
    assert_eq!(td.text_contents(), "😀 smile 😀 smile");
}

#[test]
fn test_match_leaving_a_link_keeps_the_link_intact() {
    let highlighter = Highlighter::new("mark", "highlight").expect("valid marker");
    let td = cell(r##"<a href="#x">Big <em>Data</em></a> Co"##);

    let report = highlighter.highlight_cell(&td, &normalize("data co"));

    assert_eq!(report.applied, 1);
    assert_eq!(marks(&td).concat(), "Data Co");
    assert_eq!(td.text_contents(), "Big Data Co");
    let link = td.select_first("a").expect("link survives");
    assert_eq!(
        link.attributes.borrow().get("href"),
        Some("#x"),
        "link markup: {}",
        inner(&td)
    );
    assert!(link.as_node().text_contents().starts_with("Big "));
}

#[test]
fn test_match_inside_one_text_node_splits_it() {
    let highlighter = Highlighter::new("mark", "highlight").expect("valid marker");
    let td = cell("Grand Café Royal");

    highlighter.highlight_cell(&td, &normalize("cafe"));

    assert_eq!(
        inner(&td),
        r#"Grand <mark class="highlight">Café</mark> Royal"#
    );
}

#[test]
fn test_custom_marker_tag_and_class() {
    let highlighter = Highlighter::new("span", "hit").expect("valid marker");
    let td = cell("alpha beta");

    highlighter.highlight_cell(&td, "beta");

    assert_eq!(inner(&td), r#"alpha <span class="hit">beta</span>"#);
}

#[test]
fn test_empty_query_changes_nothing() {
    let highlighter = Highlighter::new("mark", "highlight").expect("valid marker");
    let td = cell("Caf<b>é</b>");

    let report = highlighter.highlight_cell(&td, "");

    assert_eq!(report.matches, 0);
    assert_eq!(inner(&td), "Caf<b>é</b>");
}
