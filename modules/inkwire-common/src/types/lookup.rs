//! Declarative field resolution over untyped JSON.
//!
//! The server spells the same logical field several ways (camelCase vs
//! snake_case, legacy vs current names) and, for characters, parks it at
//! the root, under `meta`, or under `data` depending on the endpoint.
//! Every parser goes through these two resolvers so the key-name
//! archaeology lives in one place.

use serde_json::Value;

use crate::coerce;
use crate::error::ParseError;

/// First present value among `keys`, in priority order.
pub(crate) fn pick<'a>(source: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let obj = source.as_object()?;
    keys.iter().find_map(|k| obj.get(*k))
}

/// Like `pick`, but searches root, then `meta`, then `data`.
pub(crate) fn pick_located<'a>(source: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    [Some(source), source.get("meta"), source.get("data")]
        .into_iter()
        .flatten()
        .find_map(|loc| pick(loc, keys))
}

/// String field with "" default.
pub(crate) fn str_field(source: &Value, keys: &[&str]) -> String {
    pick(source, keys).map(coerce::as_str).unwrap_or_default()
}

/// Integer field with 0 default.
pub(crate) fn int_field(source: &Value, keys: &[&str]) -> i64 {
    pick(source, keys).map(coerce::as_int).unwrap_or_default()
}

/// WordPress wraps rendered fields as `{"rendered": "..."}` on core
/// endpoints but emits plain strings from the plugins. Accept both.
pub(crate) fn rendered(v: &Value) -> String {
    match v.get("rendered") {
        Some(inner) => coerce::as_str(inner),
        None => coerce::as_str(v),
    }
}

/// Required numeric identifier: present and number-shaped, or the whole
/// record is unusable.
pub(crate) fn require_id(
    source: &Value,
    keys: &[&str],
    field: &'static str,
) -> Result<i64, ParseError> {
    let v = pick_located(source, keys).ok_or(ParseError::MissingField(field))?;
    let invalid = |got: &Value| ParseError::InvalidField {
        field,
        expected: "an integer",
        got: got.to_string(),
    };
    match v {
        Value::Number(n) => Ok(n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0)),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid(v)),
        other => Err(invalid(other)),
    }
}

/// WordPress dates come as RFC 3339 with offset, or bare
/// `2024-05-01T10:00:00` (GMT implied), or with a space separator.
pub(crate) fn parse_wp_datetime(raw: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&chrono::Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}
