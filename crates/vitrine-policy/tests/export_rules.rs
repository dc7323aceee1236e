use vitrine_policy::{
    ClassificationTable, ConfigEntry, SENSITIVE_NOTICE_HEADER, SensitiveConfigFilter,
};

const TEST_KEYS: [&str; 12] = [
    "test_value_1",
    "test_value_2",
    "test_sensitive",
    "test_sensitive1",
    "test_sensitive2",
    "test_sensitive3",
    "test_sensitive_environment4",
    "test_sensitive_environment5",
    "test_sensitive_environment6",
    "test_environment7",
    "test_environment8",
    "test_environment9",
];

fn key(name: &str) -> String {
    format!("web/test/{name}")
}

fn entries() -> Vec<ConfigEntry> {
    TEST_KEYS
        .iter()
        .map(|name| ConfigEntry::new(key(name), format!("value of {name}")))
        .collect()
}

fn filter() -> SensitiveConfigFilter {
    let exclude: ClassificationTable = [
        (key("test_value_1"), ""),
        (key("test_value_2"), "0"),
        (key("test_sensitive"), "1"),
    ]
    .into_iter()
    .collect();
    let mut sensitive: ClassificationTable = [
        (key("test_sensitive1"), ""),
        (key("test_sensitive2"), "0"),
        (key("test_sensitive3"), "1"),
        (key("test_sensitive_environment4"), "1"),
        (key("test_sensitive_environment5"), "1"),
        (key("test_sensitive_environment6"), "0"),
    ]
    .into_iter()
    .collect();
    sensitive.absorb(&exclude);
    let environment: ClassificationTable = [
        (key("test_sensitive_environment4"), "1"),
        (key("test_sensitive_environment5"), "0"),
        (key("test_sensitive_environment6"), "1"),
        (key("test_environment7"), ""),
        (key("test_environment8"), "0"),
        (key("test_environment9"), "1"),
    ]
    .into_iter()
    .collect();
    SensitiveConfigFilter::new(sensitive, environment)
}

#[test]
fn kept_and_withheld_keys_match_declarations() {
    let outcome = filter().apply(entries());
    let kept: Vec<String> = outcome.entries.iter().map(|e| e.path.clone()).collect();
    let withheld: Vec<String> = outcome.withheld.iter().map(|e| e.path.clone()).collect();

    assert_eq!(
        kept,
        [
            "test_value_1",
            "test_value_2",
            "test_sensitive1",
            "test_sensitive2",
            "test_environment7",
            "test_environment8",
        ]
        .map(key)
    );
    assert_eq!(
        withheld,
        [
            "test_sensitive",
            "test_sensitive3",
            "test_sensitive_environment4",
            "test_sensitive_environment5",
            "test_sensitive_environment6",
            "test_environment9",
        ]
        .map(key)
    );
}

#[test]
fn notice_lists_environment_overridable_paths_in_order() {
    let outcome = filter().apply(entries());
    let notice = outcome.notice.map(|notice| notice.to_string());
    let expected = format!(
        "{SENSITIVE_NOTICE_HEADER}\
         \nCONFIG__DEFAULT__WEB__TEST__TEST_SENSITIVE_ENVIRONMENT4 for web/test/test_sensitive_environment4\
         \nCONFIG__DEFAULT__WEB__TEST__TEST_SENSITIVE_ENVIRONMENT5 for web/test/test_sensitive_environment5\
         \nCONFIG__DEFAULT__WEB__TEST__TEST_SENSITIVE_ENVIRONMENT6 for web/test/test_sensitive_environment6\
         \nCONFIG__DEFAULT__WEB__TEST__TEST_ENVIRONMENT9 for web/test/test_environment9"
    );
    assert_eq!(notice.as_deref(), Some(expected.as_str()));
}

#[test]
fn applying_twice_yields_the_same_outcome() {
    let filter = filter();
    assert_eq!(filter.apply(entries()), filter.apply(entries()));
}

#[test]
fn notice_header_starts_with_security_sentence() {
    assert!(SENSITIVE_NOTICE_HEADER.starts_with(
        "The configuration file doesn't contain sensitive data for security reasons. Sensitive data"
    ));
}
