use serde_json::Value;

use crate::namespace::ItemSet;

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                flatten(&key, child, out);
            }
        }
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => panic!("unexpected rendered value: {other}"),
    }
}

#[test]
fn test_get_absent_key_is_empty() {
    let mut items = ItemSet::new();
    assert_eq!("", items.get("foo"));

    items.insert("foo", "bar");
    assert_eq!("bar", items.get("foo"));
}

#[test]
fn test_render_blob_passes_content_through() {
    let mut items = ItemSet::new();
    items.insert("content", "version 1");

    assert_eq!("version 1", items.render("a.txt"));
    assert_eq!("version 1", items.render("a.json"));
}

#[test]
fn test_render_flat_round_trips() {
    let mut items = ItemSet::new();
    items.insert("portal.elastic.document.type", "biz");
    items.insert("portal.elastic.cluster.name", "hermes-es-fws");
    items.insert("timeout", "90");

    let rendered = items.render("application");
    let value: Value = serde_json::from_str(&rendered).unwrap();

    let mut pairs = Vec::new();
    flatten("", &value, &mut pairs);
    pairs.sort();

    assert_eq!(
        vec![
            (
                "portal.elastic.cluster.name".to_string(),
                "hermes-es-fws".to_string()
            ),
            ("portal.elastic.document.type".to_string(), "biz".to_string()),
            ("timeout".to_string(), "90".to_string()),
        ],
        pairs
    );
}

#[test]
fn test_render_is_idempotent() {
    let mut items = ItemSet::new();
    items.insert("a.b", "1");
    items.insert("a.c", "2");

    let first: Value = serde_json::from_str(&items.render("application")).unwrap();
    let second: Value = serde_json::from_str(&items.render("application")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_render_empty_set_is_empty_map() {
    assert_eq!("{}", ItemSet::new().render("application"));
}
