//! Reference documents mirroring a storefront with a mix of plain, sensitive
//! and environment-supplied settings.

use serde_json::{Map, Value, json};

/// Keys seeded under `default/web/test`.
pub const WEB_TEST_KEYS: [&str; 12] = [
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

/// Keys expected to survive a dump of [`system_config`].
pub const EXPORTED_KEYS: [&str; 6] = [
    "test_value_1",
    "test_value_2",
    "test_sensitive1",
    "test_sensitive2",
    "test_environment7",
    "test_environment8",
];

/// Keys expected to be withheld from a dump of [`system_config`].
pub const WITHHELD_KEYS: [&str; 6] = [
    "test_sensitive",
    "test_sensitive3",
    "test_sensitive_environment4",
    "test_sensitive_environment5",
    "test_sensitive_environment6",
    "test_environment9",
];

/// `system.json` with the `web/test` keys plus an unclassified website override.
#[must_use]
pub fn system_config() -> Value {
    let web_test: Map<String, Value> = WEB_TEST_KEYS
        .iter()
        .map(|key| ((*key).to_string(), json!(format!("{key}_value"))))
        .collect();
    json!({
        "default": {"web": {"test": web_test}},
        "websites": {"base": {"web": {"secure": {"base_url": "https://base.example"}}}}
    })
}

/// `system.json` fragment for the analytics subscription.
#[must_use]
pub fn analytics_config(enabled: &str, token: &str) -> Value {
    json!({
        "default": {"analytics": {
            "subscription": {"enabled": enabled},
            "general": {"token": token}
        }}
    })
}

/// `classification.json` matching [`system_config`].
#[must_use]
pub fn classification() -> Value {
    json!({
        "exclude": {
            "web/test/test_value_1": "",
            "web/test/test_value_2": "0",
            "web/test/test_sensitive": "1"
        },
        "sensitive": {
            "web/test/test_sensitive1": "",
            "web/test/test_sensitive2": "0",
            "web/test/test_sensitive3": "1",
            "web/test/test_sensitive_environment4": "1",
            "web/test/test_sensitive_environment5": "1",
            "web/test/test_sensitive_environment6": "0"
        },
        "environment": {
            "web/test/test_sensitive_environment4": "1",
            "web/test/test_sensitive_environment5": "0",
            "web/test/test_sensitive_environment6": "1",
            "web/test/test_environment7": "",
            "web/test/test_environment8": "0",
            "web/test/test_environment9": "1"
        }
    })
}

/// `config.json` with a `themes` section that a dump must leave alone.
#[must_use]
pub fn deployment_config_with_themes() -> Value {
    json!({
        "themes": {
            "frontend/Vitrine/blank": {
                "parent_id": null,
                "theme_path": "Vitrine/blank",
                "theme_title": "Vitrine Blank",
                "area": "frontend",
                "code": "Vitrine/blank"
            }
        }
    })
}
