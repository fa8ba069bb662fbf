//! Tests for the configuration builder and JSON loading

use std::time::Duration;

use kodegen_tools_tableview::session::Debouncer;
use kodegen_tools_tableview::{TableViewConfig, TableViewError};

#[test]
fn test_defaults() {
    let config = TableViewConfig::default();

    assert_eq!(config.debounce(), Duration::from_millis(150));
    assert_eq!(config.highlight_tag(), "mark");
    assert_eq!(config.highlight_class(), "highlight");
    assert_eq!(config.table_selector(), ".table-container table");
    assert_eq!(config.snippet_window(), 200);
    assert_eq!(config.export_name_template(), "{table}_{date}");
    assert_eq!(config.export_user(), None);
    assert_eq!(TableViewConfig::builder().build().unwrap(), config);
}

#[test]
fn test_builder_overrides() {
    let config = TableViewConfig::builder()
        .debounce_ms(250)
        .highlight_tag("span")
        .highlight_class("hit")
        .search_chunk_size(10)
        .default_search_limit(5)
        .build()
        .unwrap();

    assert_eq!(config.debounce_ms(), 250);
    assert_eq!(config.search_chunk_size(), 10);
    assert_eq!(config.default_search_limit(), 5);
    assert_eq!(Debouncer::from_config(&config).delay(), Duration::from_millis(250));
}

#[test]
fn test_builder_rejects_invalid_values() {
    let cases = [
        TableViewConfig::builder().debounce_ms(60_000).build(),
        TableViewConfig::builder().highlight_tag("").build(),
        TableViewConfig::builder().highlight_tag("<b>").build(),
        TableViewConfig::builder().highlight_class("a\"b").build(),
        TableViewConfig::builder().table_selector("  ").build(),
        TableViewConfig::builder().snippet_window(3).build(),
        TableViewConfig::builder().search_chunk_size(0).build(),
        TableViewConfig::builder().default_search_limit(0).build(),
    ];

    for result in cases {
        assert!(
            matches!(result, Err(TableViewError::InvalidConfig(_))),
            "{result:?}"
        );
    }
}

#[test]
fn test_from_json_fills_missing_fields() {
    let config =
        TableViewConfig::from_json(r#"{"debounce_ms": 300, "export_user": "ana"}"#).unwrap();

    assert_eq!(config.debounce_ms(), 300);
    assert_eq!(config.export_user(), Some("ana"));
    assert_eq!(config.highlight_tag(), "mark");
}

#[test]
fn test_from_json_validates() {
    assert!(matches!(
        TableViewConfig::from_json(r#"{"search_chunk_size": 0}"#),
        Err(TableViewError::InvalidConfig(_))
    ));
    assert!(matches!(
        TableViewConfig::from_json("not json"),
        Err(TableViewError::InvalidConfig(_))
    ));
}
