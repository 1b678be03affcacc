use serde::Serialize;
use serde_json::Value;

use crate::coerce;
use crate::types::lookup::{pick, str_field};
use crate::youtube;

/// What a slider entry renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderKind {
    Image,
    Youtube,
}

impl std::fmt::Display for SliderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SliderKind::Image => write!(f, "image"),
            SliderKind::Youtube => write!(f, "youtube"),
        }
    }
}

/// One entry of an inline post slider.
#[derive(Debug, Clone, Serialize)]
pub struct SliderItem {
    pub kind: SliderKind,
    /// Image URL, or a YouTube URL/identifier for video entries.
    pub source: String,
    pub thumb: String,
    pub title: String,
}

impl SliderItem {
    /// Parse one slider entry. Entries without any usable source are
    /// dropped by returning `None`.
    pub fn from_value(v: &Value) -> Option<Self> {
        let source = str_field(v, &["src", "source", "url", "link", "video", "id"]);
        if source.trim().is_empty() {
            return None;
        }
        let tag = str_field(v, &["type", "kind", "media_type"]);
        let kind = normalize_kind(&tag, &source);

        Some(Self {
            kind,
            source,
            thumb: str_field(v, &["thumb", "thumbnail", "image", "poster"]),
            title: str_field(v, &["title", "caption", "label"]),
        })
    }

    /// Extract a slider list from whatever shape the editor saved:
    /// a direct array, an array nested under `items`, or the whole
    /// thing JSON-encoded as a string. Anything else is an empty slider.
    pub fn list_from_value(v: &Value) -> Vec<Self> {
        match v {
            Value::Array(items) => items.iter().filter_map(Self::from_value).collect(),
            Value::Object(_) => pick(v, &["items", "slides"])
                .map(coerce::as_list)
                .unwrap_or_default()
                .iter()
                .filter_map(Self::from_value)
                .collect(),
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                // One level of string-encoding only; a string inside a
                // string is not a slider.
                Ok(Value::String(_)) | Err(_) => Vec::new(),
                Ok(decoded) => Self::list_from_value(&decoded),
            },
            _ => Vec::new(),
        }
    }

    /// Resolved YouTube identifier for video entries.
    pub fn video_id(&self) -> Option<String> {
        match self.kind {
            SliderKind::Youtube => youtube::resolve(&self.source),
            SliderKind::Image => None,
        }
    }
}

/// Map the many type-tag synonyms onto the two kinds; infer from the
/// source value when the tag is absent or unrecognized.
fn normalize_kind(tag: &str, source: &str) -> SliderKind {
    match tag.trim().to_lowercase().as_str() {
        "image" | "img" | "photo" | "picture" => SliderKind::Image,
        "youtube" | "video" | "yt" | "embed" => SliderKind::Youtube,
        _ => {
            if youtube::resolve(source).is_some() {
                SliderKind::Youtube
            } else {
                SliderKind::Image
            }
        }
    }
}
