//! Column sorting through a session

use kodegen_tools_tableview::SortDirection;

mod common;

#[test]
fn test_numbers_sort_before_text_and_ties_stay_stable() {
    let mut session = common::session(&common::create_two_table_html());

    assert_eq!(session.sort_column(1, 1).unwrap(), SortDirection::Ascending);
    assert_eq!(common::column(&session, 1, 1), ["2", "2", "10", "apple"]);
    assert_eq!(common::column(&session, 1, 0), ["pear", "fig", "apple", "plum"]);

    assert_eq!(session.sort_column(1, 1).unwrap(), SortDirection::Descending);
    assert_eq!(common::column(&session, 1, 1), ["apple", "10", "2", "2"]);
    assert_eq!(common::column(&session, 1, 0), ["plum", "apple", "pear", "fig"]);
}

#[test]
fn test_third_click_restores_document_order() {
    let mut session = common::session(&common::create_two_table_html());

    session.sort_column(1, 0).unwrap();
    session.sort_column(1, 0).unwrap();
    assert_eq!(session.sort_column(1, 0).unwrap(), SortDirection::Unsorted);

    assert_eq!(common::column(&session, 1, 0), ["apple", "pear", "plum", "fig"]);
    assert_eq!(session.sort_state(1).unwrap(), vec![0, 0]);
    assert_eq!(session.aria_sort(1, 0).unwrap(), "none");
}

#[test]
fn test_sorting_one_column_resets_the_others() {
    let mut session = common::session(&common::create_two_table_html());

    session.sort_column(1, 1).unwrap();
    assert_eq!(session.sort_state(1).unwrap(), vec![0, 1]);
    session.sort_column(1, 0).unwrap();

    assert_eq!(session.sort_state(1).unwrap(), vec![1, 0]);
    assert_eq!(common::column(&session, 1, 0), ["apple", "fig", "pear", "plum"]);
    assert_eq!(session.aria_sort(1, 0).unwrap(), "ascending");
    assert_eq!(session.aria_sort(1, 1).unwrap(), "none");
}

#[test]
fn test_tables_sort_independently() {
    let mut session = common::session(&common::create_two_table_html());

    session.sort_column(0, 0).unwrap();

    assert_eq!(session.sort_state(1).unwrap(), vec![0, 0]);
    assert_eq!(common::column(&session, 1, 0), ["apple", "pear", "plum", "fig"]);
    assert_eq!(common::column(&session, 0, 0), ["Bakery", "Café shop", "Tea room"]);
}

#[test]
fn test_sort_keeps_filter_and_unsort_reapplies_it() {
    let mut session = common::session(&common::create_two_table_html());
    session.search("apple");
    assert_eq!(common::visibility(&session, 1), [true, false, true, false]);

    session.sort_column(1, 0).unwrap();
    assert_eq!(common::column(&session, 1, 0), ["apple", "fig", "pear", "plum"]);
    assert_eq!(common::visibility(&session, 1), [true, false, false, true]);

    session.sort_column(1, 0).unwrap();
    session.sort_column(1, 0).unwrap();
    assert_eq!(common::visibility(&session, 1), [true, false, true, false]);
    assert!(session.to_html().unwrap().contains(r#"<mark class="highlight">apple</mark>"#));
}

#[test]
fn test_reset_table_restores_order_and_clears_sort() {
    let mut session = common::session(&common::create_two_table_html());
    session.sort_column(1, 1).unwrap();

    session.reset_table(1).unwrap();

    assert_eq!(session.sort_state(1).unwrap(), vec![0, 0]);
    assert_eq!(common::column(&session, 1, 1), ["10", "2", "apple", "2"]);
}

#[test]
fn test_out_of_range_column_is_an_error() {
    let mut session = common::session(&common::create_two_table_html());

    assert!(session.sort_column(1, 5).unwrap_err().is_lookup_error());
    assert!(session.sort_column(9, 0).unwrap_err().is_lookup_error());
    assert!(session.aria_sort(1, 5).is_err());
}
