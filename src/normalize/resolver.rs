//! Alias-priority field resolution.
//!
//! Loosely structured sources spell the same canonical field several ways
//! (`val`, `reading`, `value`, ...). Each canonical field gets an ordered
//! alias list; the first key holding a non-null value wins.

use serde_json::{Map, Value};

/// Return the first non-absent value among `aliases` in `obj`.
///
/// A key that is present but `null` does not win; resolution moves on to
/// the next alias.
pub fn resolve<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| !v.is_null())
}

/// Render a scalar JSON value as text. Objects, arrays, and nulls have no
/// textual form and resolve to absent.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn first_alias_wins() {
        let record = obj(json!({"val": 1.0, "reading": 2.0, "value": 3.0}));
        let resolved = resolve(&record, &["val", "reading", "value"]).unwrap();
        assert_eq!(resolved, &json!(1.0));
    }

    #[test]
    fn null_alias_is_skipped() {
        let record = obj(json!({"val": null, "reading": 2.0}));
        let resolved = resolve(&record, &["val", "reading", "value"]).unwrap();
        assert_eq!(resolved, &json!(2.0));
    }

    #[test]
    fn no_alias_present() {
        let record = obj(json!({"other": 1}));
        assert!(resolve(&record, &["val", "reading"]).is_none());
    }

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(as_text(&json!("abc")), Some("abc".to_string()));
        assert_eq!(as_text(&json!(7)), Some("7".to_string()));
        assert_eq!(as_text(&json!(true)), Some("true".to_string()));
        assert_eq!(as_text(&json!(null)), None);
        assert_eq!(as_text(&json!([1, 2])), None);
    }
}
