//! Response envelope shapes.
//!
//! The character plugin answers with either a bare JSON array or an
//! object wrapping the array under `items`, depending on plugin version.
//! One untagged enum at the boundary instead of runtime type tests at
//! every call site.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope {
    Wrapped { items: Vec<Value> },
    Bare(Vec<Value>),
}

impl ListEnvelope {
    pub(crate) fn into_items(self) -> Vec<Value> {
        match self {
            ListEnvelope::Wrapped { items } => items,
            ListEnvelope::Bare(items) => items,
        }
    }
}

/// Single-object endpoints: the object directly, or wrapped under
/// `items` (as the object itself, or a one-element array).
pub(crate) fn unwrap_object(v: Value) -> Option<Value> {
    let Value::Object(mut obj) = v else {
        return None;
    };
    match obj.remove("items") {
        Some(Value::Array(arr)) => arr.into_iter().next(),
        Some(inner @ Value::Object(_)) => Some(inner),
        Some(_) => None,
        None => Some(Value::Object(obj)),
    }
}
