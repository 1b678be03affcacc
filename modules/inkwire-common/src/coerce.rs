//! Best-effort extraction of scalars and collections from untyped JSON.
//!
//! The upstream WordPress plugins emit the same logical field as a number,
//! a numeric string, or garbage depending on which editor saved the post.
//! Nothing in this module panics or errors; malformed input degrades to a
//! documented default.

use serde_json::{Map, Value};

/// Coerce to an integer. Numeric strings parse, floats truncate,
/// booleans map to 0/1. Everything else is 0.
pub fn as_int(v: &Value) -> i64 {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .or_else(|_| s.parse::<f64>().map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Bool(b) => *b as i64,
        _ => 0,
    }
}

/// Coerce to a string. Numbers and booleans render; null and
/// collections become "".
pub fn as_str(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Coerce to a list. Non-arrays become the empty list.
pub fn as_list(v: &Value) -> Vec<Value> {
    match v {
        Value::Array(items) => items.clone(),
        _ => Vec::new(),
    }
}

/// Coerce to a map. Non-objects become the empty map.
pub fn as_map(v: &Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m.clone(),
        _ => Map::new(),
    }
}

/// Drop placeholder entries from an already-coerced list: nulls, blank
/// strings, empty arrays, and empty maps. The server is known to send
/// `[""]` to mean "no value".
pub fn clean_list(items: Vec<Value>) -> Vec<Value> {
    items
        .into_iter()
        .filter(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(m) => !m.is_empty(),
            _ => true,
        })
        .collect()
}

/// WordPress meta flags arrive as "yes", "1", 1, true, "on", "" and
/// worse. True iff the lowercased string form is one of yes/1/true/on.
pub fn as_meta_bool(v: &Value) -> bool {
    matches!(
        as_str(v).trim().to_lowercase().as_str(),
        "yes" | "1" | "true" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn int_from_number_string_float() {
        assert_eq!(as_int(&json!(7)), 7);
        assert_eq!(as_int(&json!("42")), 42);
        assert_eq!(as_int(&json!(" 42 ")), 42);
        assert_eq!(as_int(&json!(3.9)), 3);
        assert_eq!(as_int(&json!("3.9")), 3);
    }

    #[test]
    fn int_fallback_is_zero() {
        assert_eq!(as_int(&Value::Null), 0);
        assert_eq!(as_int(&json!("abc")), 0);
        assert_eq!(as_int(&json!([1, 2])), 0);
        assert_eq!(as_int(&json!({})), 0);
    }

    #[test]
    fn int_coercion_idempotent() {
        for v in [json!("42"), json!(3.9), json!("junk"), Value::Null] {
            let once = as_int(&v);
            let twice = as_int(&json!(once));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn str_renders_scalars() {
        assert_eq!(as_str(&json!("hi")), "hi");
        assert_eq!(as_str(&json!(5)), "5");
        assert_eq!(as_str(&json!(true)), "true");
        assert_eq!(as_str(&Value::Null), "");
        assert_eq!(as_str(&json!({"a": 1})), "");
    }

    #[test]
    fn list_and_map_fallbacks() {
        assert_eq!(as_list(&json!("not a list")), Vec::<Value>::new());
        assert_eq!(as_list(&json!([1])), vec![json!(1)]);
        assert!(as_map(&json!([1])).is_empty());
        assert_eq!(as_map(&json!({"k": 1})).get("k"), Some(&json!(1)));
    }

    #[test]
    fn clean_list_drops_placeholders() {
        let dirty = vec![
            json!(""),
            json!("  "),
            Value::Null,
            json!({}),
            json!([]),
            json!({"name": "x"}),
            json!("keep"),
            json!(0),
        ];
        let cleaned = clean_list(dirty);
        assert_eq!(cleaned, vec![json!({"name": "x"}), json!("keep"), json!(0)]);
    }

    #[test]
    fn clean_list_idempotent() {
        let dirty = vec![json!(""), Value::Null, json!("keep"), json!({})];
        let once = clean_list(dirty);
        let twice = clean_list(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn meta_bool_accepted_forms() {
        for v in [json!("yes"), json!("YES"), json!("1"), json!(1), json!(true), json!("on"), json!("True")] {
            assert!(as_meta_bool(&v), "{v:?} should be true");
        }
        for v in [json!("no"), json!("0"), json!(0), json!(false), json!(""), Value::Null, json!("off"), json!("2")] {
            assert!(!as_meta_bool(&v), "{v:?} should be false");
        }
    }
}
