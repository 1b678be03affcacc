use serde::Serialize;
use serde_json::Value;

use crate::coerce;
use crate::types::lookup::{int_field, pick, str_field};

/// Promotional overlay configuration, re-fetched per screen visit.
/// Every field is optional on the wire; parsing never fails.
#[derive(Debug, Clone, Serialize)]
pub struct Banner {
    pub id: i64,
    pub image: String,
    pub link: String,
    pub message: String,
    /// Server-side kill switch.
    pub hidden: bool,
    /// Sent by the server but meaningless to this client; parsed so the
    /// payload round-trips, never consulted.
    pub user_hidden: bool,
    /// Scroll offset (px) at which the banner is revealed.
    pub scroll_offset: i64,
    pub font: Option<FontStyle>,
    pub gradient: Option<Gradient>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FontStyle {
    pub size: i64,
    pub unit: String,
    pub weight: String,
    /// Text color, hex.
    pub color: String,
    /// Background color, hex.
    pub background: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Gradient {
    /// Up to three hex colors.
    pub colors: Vec<String>,
    pub preset: String,
}

impl Banner {
    pub fn from_value(v: &Value) -> Self {
        Self {
            id: int_field(v, &["id", "banner_id"]),
            image: str_field(v, &["image", "image_url", "banner_image"]),
            link: str_field(v, &["link", "url"]),
            message: str_field(v, &["message", "text", "title"]),
            hidden: pick(v, &["hide", "hidden", "is_hidden"])
                .map(coerce::as_meta_bool)
                .unwrap_or(false),
            user_hidden: pick(v, &["user_hide", "user_hidden"])
                .map(coerce::as_meta_bool)
                .unwrap_or(false),
            scroll_offset: int_field(v, &["scroll_offset", "offset", "trigger_offset"]),
            font: pick(v, &["font_style", "font"]).and_then(FontStyle::from_value),
            gradient: pick(v, &["gradient"]).and_then(Gradient::from_value),
        }
    }

    /// Show iff the server hasn't hidden it and there is something to
    /// render. The user-hide flag is deliberately ignored.
    pub fn visible(&self) -> bool {
        !self.hidden && !self.image.trim().is_empty()
    }
}

impl FontStyle {
    fn from_value(v: &Value) -> Option<Self> {
        v.as_object()?;
        Some(Self {
            size: int_field(v, &["size", "font_size"]),
            unit: str_field(v, &["unit"]),
            weight: str_field(v, &["weight", "font_weight"]),
            color: str_field(v, &["color", "text_color"]),
            background: str_field(v, &["background", "background_color", "bg_color"]),
        })
    }
}

impl Gradient {
    fn from_value(v: &Value) -> Option<Self> {
        v.as_object()?;
        let mut colors: Vec<String> = pick(v, &["colors"])
            .map(coerce::as_list)
            .map(coerce::clean_list)
            .unwrap_or_default()
            .iter()
            .map(coerce::as_str)
            .collect();
        if colors.is_empty() {
            colors = ["color1", "color2", "color3"]
                .into_iter()
                .map(|k| str_field(v, &[k]))
                .filter(|c| !c.is_empty())
                .collect();
        }
        colors.truncate(3);
        Some(Self {
            colors,
            preset: str_field(v, &["preset", "name"]),
        })
    }
}
