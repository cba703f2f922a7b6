use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn cfg_path() -> PathBuf {
    PathBuf::from("/proj/autoload.yaml")
}

#[test]
fn test_compact_required_with_func() {
    let entry = EntryParser::normalize(&Value::from("+foo:bar"), &cfg_path()).unwrap();
    assert_eq!(entry.module, "foo");
    assert_eq!(entry.func.as_deref(), Some("bar"));
    assert!(entry.required);
    assert_eq!(entry.base_path, cfg_path());
}

#[test]
fn test_compact_plain() {
    let entry = EntryParser::normalize(&Value::from("foo"), &cfg_path()).unwrap();
    assert_eq!(entry.module, "foo");
    assert!(entry.func.is_none());
    assert!(!entry.required);
}

#[test]
fn test_compact_splits_on_first_colon_only() {
    let entry = EntryParser::normalize(&Value::from("foo:bar:baz"), &cfg_path()).unwrap();
    assert_eq!(entry.module, "foo");
    assert_eq!(entry.func.as_deref(), Some("bar:baz"));
}

#[test]
fn test_compact_empty_func_is_none() {
    let entry = EntryParser::normalize(&Value::from("./tools/ext:"), &cfg_path()).unwrap();
    assert_eq!(entry.module, "./tools/ext");
    assert!(entry.func.is_none());
}

#[test]
fn test_compact_empty_module_is_malformed() {
    assert!(EntryParser::normalize(&Value::from("+"), &cfg_path()).is_none());
    assert!(EntryParser::normalize(&Value::from(":setup"), &cfg_path()).is_none());
    assert!(EntryParser::normalize(&Value::from(""), &cfg_path()).is_none());
}

#[test]
fn test_object_entry() {
    let item = serde_json::json!({
        "module": "lint-rules",
        "func": "setup",
        "required": true,
        "priority": 2
    });
    let entry = EntryParser::normalize(&item, &cfg_path()).unwrap();
    assert_eq!(entry.module, "lint-rules");
    assert_eq!(entry.func.as_deref(), Some("setup"));
    assert!(entry.required);
    assert_eq!(entry.extra["priority"], 2);
}

#[test]
fn test_object_entry_defaults() {
    let item = serde_json::json!({ "module": "lint-rules" });
    let entry = EntryParser::normalize(&item, &cfg_path()).unwrap();
    assert!(entry.func.is_none());
    assert!(!entry.required);
    assert!(entry.extra.is_empty());
}

#[test]
fn test_object_entry_base_path_is_stamped() {
    let item = serde_json::json!({ "module": "lint-rules", "basePath": "/elsewhere/x.yaml" });
    let entry = EntryParser::normalize(&item, &cfg_path()).unwrap();
    assert_eq!(entry.base_path, cfg_path());
    assert!(!entry.extra.contains_key("basePath"));
}

#[test]
fn test_malformed_elements() {
    let path = cfg_path();
    assert!(EntryParser::normalize(&serde_json::json!(42), &path).is_none());
    assert!(EntryParser::normalize(&serde_json::json!(null), &path).is_none());
    assert!(EntryParser::normalize(&serde_json::json!({ "func": "x" }), &path).is_none());
    assert!(EntryParser::normalize(&serde_json::json!({ "module": "" }), &path).is_none());
    assert!(EntryParser::normalize(&serde_json::json!({ "module": 7 }), &path).is_none());
}

#[test]
fn test_object_required_follows_truthiness() {
    let path = cfg_path();
    let required = |value: serde_json::Value| {
        let item = serde_json::json!({ "module": "core-ext", "required": value });
        EntryParser::normalize(&item, &path).unwrap().required
    };
    assert!(required(serde_json::json!(1)));
    assert!(required(serde_json::json!("yes")));
    assert!(required(serde_json::json!("false")));
    assert!(!required(serde_json::json!(0)));
    assert!(!required(serde_json::json!("")));
    assert!(!required(serde_json::json!(null)));
}

#[test]
fn test_object_non_string_func_is_ignored() {
    let item = serde_json::json!({ "module": "core-ext", "func": 5, "tag": [1, 2] });
    let entry = EntryParser::normalize(&item, &cfg_path()).unwrap();
    assert_eq!(entry.module, "core-ext");
    assert!(entry.func.is_none());
    assert!(!entry.extra.contains_key("func"));
    assert_eq!(entry.extra["tag"], serde_json::json!([1, 2]));
}

#[test]
fn test_parse_skips_malformed_but_keeps_order() {
    let content = r#"
- first
- 12
- module: second
- { nope: true }
- +third:init
"#;
    let entries = EntryParser::parse(content, ConfigFormat::Yaml, &cfg_path()).unwrap();
    let modules: Vec<_> = entries.iter().map(|e| e.module.as_str()).collect();
    assert_eq!(modules, ["first", "second", "third"]);
    assert!(entries[2].required);
}

#[test]
fn test_parse_rejects_non_sequence() {
    let result = EntryParser::parse("module: foo\n", ConfigFormat::Yaml, &cfg_path());
    assert!(matches!(result, Err(ConfigError::NotASequence(_))));

    let result = EntryParser::parse("{\"module\": \"foo\"}", ConfigFormat::Json, &cfg_path());
    assert!(matches!(result, Err(ConfigError::NotASequence(_))));
}

#[test]
fn test_parse_json() {
    let content = r#"["+foo:bar", {"module": "baz"}]"#;
    let entries = EntryParser::parse(content, ConfigFormat::Json, &cfg_path()).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].required);
    assert_eq!(entries[1].module, "baz");
}

#[test]
fn test_load_missing_config() {
    let dir = TempDir::new().unwrap();
    assert!(EntryParser::load(dir.path(), None).is_none());
}

#[test]
fn test_load_stamps_located_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("autoload.yml");
    fs::write(&path, "- foo\n").unwrap();

    let entries = EntryParser::load(dir.path(), None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].base_path, path);
}

#[test]
fn test_load_unparseable_file_yields_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("autoload.json"), "[\"foo\",").unwrap();

    let entries = EntryParser::load(dir.path(), None).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_load_non_sequence_yields_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("autoload.yaml"), "foo: bar\n").unwrap();

    let entries = EntryParser::load(dir.path(), None).unwrap();
    assert!(entries.is_empty());
}
