use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::coerce;
use crate::error::ParseError;
use crate::html;
use crate::types::lookup::{parse_wp_datetime, pick, rendered, require_id, str_field};

/// Shown when a comment arrives without an author name.
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

/// A reader comment on a post. Body is sanitized to plain text at parse
/// time; the raw HTML is never kept.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub body: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn from_value(v: &Value) -> Result<Self, ParseError> {
        let id = require_id(v, &["id", "ID"], "id")?;

        let author = str_field(v, &["author_name", "author", "comment_author"]);
        let author = if author.trim().is_empty() {
            ANONYMOUS_AUTHOR.to_string()
        } else {
            author
        };

        Ok(Self {
            id,
            post_id: pick(v, &["post", "post_id", "comment_post_ID"])
                .map(coerce::as_int)
                .unwrap_or(0),
            author,
            body: html::html_to_text(&pick(v, &["content"]).map(rendered).unwrap_or_default()),
            published_at: pick(v, &["date_gmt", "date"])
                .map(coerce::as_str)
                .and_then(|s| parse_wp_datetime(&s)),
        })
    }
}
