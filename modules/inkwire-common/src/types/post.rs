use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::coerce;
use crate::error::ParseError;
use crate::types::lookup::{int_field, parse_wp_datetime, pick, rendered, require_id, str_field};
use crate::types::slider::SliderItem;
use crate::youtube;

/// The featured-type tag value that explicitly marks a video post.
const VIDEO_TAG: &str = "video";

/// Featured-type values that explicitly mark a post as NOT a video.
/// Any other non-empty tag is treated like an absent one.
const NON_VIDEO_TAGS: &[&str] = &["image", "gallery", "audio", "text"];

/// A content item from any aggregated REST base. Immutable once parsed;
/// like state is tracked by the caller, not on the record.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Unique within one base's collection; cross-base collisions are
    /// accepted by the aggregate dedup (first occurrence wins).
    pub id: i64,
    pub post_type: String,
    pub title: String,
    pub excerpt: String,
    /// Raw HTML body, rendered by the presentation layer.
    pub content: String,
    pub link: String,
    pub image: String,
    pub published_at: Option<DateTime<Utc>>,
    pub likes: i64,
    pub show_on_home: bool,
    pub show_on_slider: bool,
    pub featured_type: String,
    /// Raw video reference as stored on the post (URL or bare id).
    pub video_raw: String,
    /// Featured-media attachment id, when the server exposes one.
    pub media_id: i64,
    /// Resolved YouTube identifier, empty when the post has no video.
    pub video_id: String,
    pub slider: Vec<SliderItem>,
}

impl Post {
    pub fn from_value(v: &Value) -> Result<Self, ParseError> {
        let id = require_id(v, &["id", "ID"], "id")?;
        let meta = v.get("meta").unwrap_or(&Value::Null);

        let video_raw = first_non_empty(&[
            str_field(meta, &["featured_video", "video_url", "youtube_url", "video"]),
            str_field(v, &["featured_video", "video_url", "youtube_url"]),
        ]);
        let featured_type = first_non_empty(&[
            str_field(meta, &["featured_type", "video_type"]),
            str_field(v, &["featured_type"]),
        ]);
        let video_id = resolve_video(&video_raw, &featured_type);

        let slider = pick(meta, &["slider", "slider_items", "gallery"])
            .or_else(|| pick(v, &["slider", "slider_items", "gallery"]))
            .map(SliderItem::list_from_value)
            .unwrap_or_default();

        Ok(Self {
            id,
            post_type: str_field(v, &["type", "post_type"]),
            title: pick(v, &["title"]).map(rendered).unwrap_or_default(),
            excerpt: pick(v, &["excerpt"]).map(rendered).unwrap_or_default(),
            content: pick(v, &["content"]).map(rendered).unwrap_or_default(),
            link: str_field(v, &["link", "permalink", "url"]),
            image: extract_image(v, meta),
            published_at: pick(v, &["date_gmt", "date"])
                .map(coerce::as_str)
                .and_then(|s| parse_wp_datetime(&s)),
            likes: first_non_zero(&[
                int_field(meta, &["post_like_count", "like_count", "likes"]),
                int_field(v, &["like_count", "likes"]),
            ]),
            show_on_home: meta_flag(meta, &["show_on_home", "show_home", "home"]),
            show_on_slider: meta_flag(meta, &["show_on_slider", "show_slider", "slider_show"]),
            featured_type,
            video_raw,
            media_id: extract_media_id(v),
            video_id,
            slider,
        })
    }

    pub fn has_video(&self) -> bool {
        !self.video_id.is_empty()
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

/// Video resolution policy. A non-empty raw reference resolves unless the
/// featured-type tag explicitly says the post is something else; an
/// absent, empty, or unrecognized tag assumes video. Biased toward false
/// positives so untagged video posts are never lost.
fn resolve_video(video_raw: &str, featured_type: &str) -> String {
    if video_raw.trim().is_empty() {
        return String::new();
    }
    let tag = featured_type.trim().to_lowercase();
    if tag != VIDEO_TAG && NON_VIDEO_TAGS.contains(&tag.as_str()) {
        return String::new();
    }
    youtube::resolve(video_raw).unwrap_or_default()
}

/// Featured image URL, tried across the plugin key spellings, the
/// `_embedded` featured-media payload, and the meta map.
fn extract_image(v: &Value, meta: &Value) -> String {
    let direct = str_field(
        v,
        &["featured_image", "fimg_url", "jetpack_featured_media_url", "featured_image_url", "image"],
    );
    if !direct.is_empty() {
        return direct;
    }
    if let Some(media) = embedded_media(v) {
        let url = str_field(media, &["source_url"]);
        if !url.is_empty() {
            return url;
        }
    }
    str_field(meta, &["image", "thumbnail"])
}

fn extract_media_id(v: &Value) -> i64 {
    let direct = int_field(v, &["featured_media"]);
    if direct != 0 {
        return direct;
    }
    embedded_media(v).map(|m| int_field(m, &["id"])).unwrap_or(0)
}

fn embedded_media(v: &Value) -> Option<&Value> {
    v.get("_embedded")?.get("wp:featuredmedia")?.get(0)
}

fn meta_flag(meta: &Value, keys: &[&str]) -> bool {
    pick(meta, keys).map(coerce::as_meta_bool).unwrap_or(false)
}

fn first_non_empty(candidates: &[String]) -> String {
    candidates
        .iter()
        .find(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_default()
}

fn first_non_zero(candidates: &[i64]) -> i64 {
    candidates.iter().copied().find(|n| *n != 0).unwrap_or(0)
}
