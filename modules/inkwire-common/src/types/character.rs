use serde::Serialize;
use serde_json::{Map, Value};

use crate::coerce;
use crate::error::ParseError;
use crate::types::lookup::{pick_located, require_id};

/// A character-database entry. The character endpoints park the same
/// field at the root, under `meta`, or under `data` depending on which
/// route served it, so every lookup goes through the located resolver.
///
/// All list fields are pre-cleaned (no blanks, no empty maps, no nulls)
/// and all scalars default to empty/zero; consumers never null-check.
#[derive(Debug, Clone, Serialize)]
pub struct Character {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub permalink: String,
    pub name: String,
    pub rarity: String,
    pub badge: String,
    pub image: String,
    pub element: String,
    pub weapon: String,
    pub weapon_type: String,
    pub role: String,
    pub materials: Vec<Value>,
    pub weapons: Vec<Value>,
    pub artifacts: Vec<Value>,
    pub teams: Vec<Value>,
    pub passives: Vec<Value>,
    pub constellations: Vec<Value>,
    pub talents: Vec<Value>,
    pub ascension: Vec<Value>,
    pub stats: Map<String, Value>,
    /// HTML fragment describing ascension, rendered as-is.
    pub ascension_html: String,
    pub video: String,
}

impl Character {
    pub fn from_value(v: &Value) -> Result<Self, ParseError> {
        let id = require_id(v, &["id", "ID"], "id")?;

        Ok(Self {
            id,
            title: scalar(v, &["title", "post_title"]),
            slug: scalar(v, &["slug", "post_name"]),
            permalink: scalar(v, &["permalink", "link", "url"]),
            name: scalar(v, &["name", "character_name", "display_name"]),
            rarity: scalar(v, &["rarity", "stars", "rank"]),
            badge: scalar(v, &["badge", "label"]),
            image: scalar(v, &["image", "portrait", "icon", "thumbnail"]),
            element: scalar(v, &["element", "vision"]),
            weapon: scalar(v, &["weapon", "weapon_name"]),
            weapon_type: scalar(v, &["weapon_type", "weaponType"]),
            role: scalar(v, &["role", "position"]),
            materials: list(v, &["materials", "material"]),
            weapons: list(v, &["weapons", "recommended_weapons"]),
            artifacts: list(v, &["artifacts", "artifact"]),
            teams: list(v, &["teams", "team"]),
            passives: list(v, &["passives", "passive"]),
            constellations: list(v, &["constellations", "constants", "constellation"]),
            talents: list(v, &["talents", "talent"]),
            ascension: list(v, &["ascension", "ascension_items"]),
            stats: pick_located(v, &["stats", "statistics"])
                .map(coerce::as_map)
                .unwrap_or_default(),
            ascension_html: scalar(v, &["ascension_html", "ascension_text"]),
            video: scalar(v, &["video", "video_url", "youtube"]),
        })
    }

    /// Identity used by the paged aggregator to collapse localized
    /// variants of the same character: display name when present,
    /// falling back to permalink, slug, then title.
    pub fn dedup_key(&self) -> String {
        if !self.name.trim().is_empty() {
            self.name.trim().to_lowercase()
        } else if !self.permalink.is_empty() {
            self.permalink.to_lowercase()
        } else if !self.slug.is_empty() {
            self.slug.clone()
        } else {
            self.title.clone()
        }
    }
}

fn scalar(v: &Value, keys: &[&str]) -> String {
    pick_located(v, keys).map(coerce::as_str).unwrap_or_default()
}

fn list(v: &Value, keys: &[&str]) -> Vec<Value> {
    pick_located(v, keys)
        .map(coerce::as_list)
        .map(coerce::clean_list)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fields_found_across_locations() {
        let v = json!({
            "id": 9,
            "title": "Klee",
            "meta": {
                "element": "pyro",
                "rarity": "5",
                "name": "Klee"
            },
            "data": {
                "element": "ignored, meta wins",
                "weapon_type": "catalyst"
            }
        });
        let c = Character::from_value(&v).unwrap();
        assert_eq!(c.element, "pyro");
        assert_eq!(c.weapon_type, "catalyst");
        assert_eq!(c.rarity, "5");
        assert_eq!(c.name, "Klee");
    }

    #[test]
    fn list_fields_are_cleaned() {
        let v = json!({
            "id": 3,
            "teams": [""],
            "materials": [null, {}, {"name": "x"}]
        });
        let c = Character::from_value(&v).unwrap();
        assert!(c.teams.is_empty());
        assert_eq!(c.materials, vec![json!({"name": "x"})]);
    }

    #[test]
    fn scalars_default_never_null() {
        let c = Character::from_value(&json!({"id": 1})).unwrap();
        assert_eq!(c.name, "");
        assert_eq!(c.rarity, "");
        assert!(c.stats.is_empty());
        assert!(c.talents.is_empty());
    }

    #[test]
    fn id_required() {
        assert!(Character::from_value(&json!({"name": "Klee"})).is_err());
        assert!(Character::from_value(&json!({"id": []})).is_err());
    }

    #[test]
    fn id_found_under_data() {
        let c = Character::from_value(&json!({"data": {"id": 44}})).unwrap();
        assert_eq!(c.id, 44);
    }

    #[test]
    fn dedup_key_fallback_chain() {
        let mut c = Character::from_value(&json!({"id": 1})).unwrap();
        c.name = "Hu Tao".into();
        assert_eq!(c.dedup_key(), "hu tao");

        c.name.clear();
        c.permalink = "https://site.example.com/HU-TAO".into();
        assert_eq!(c.dedup_key(), "https://site.example.com/hu-tao");

        c.permalink.clear();
        c.slug = "hu-tao".into();
        assert_eq!(c.dedup_key(), "hu-tao");

        c.slug.clear();
        c.title = "Hu Tao".into();
        assert_eq!(c.dedup_key(), "Hu Tao");
    }
}
