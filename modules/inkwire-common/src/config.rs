use std::env;

use crate::types::Language;

/// Client configuration. Constructed explicitly and injected; nothing
/// in the workspace reads ambient global state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Site root, no trailing slash (e.g. "https://site.example.com").
    pub site_url: String,

    /// REST bases aggregated for English content, relative to wp-json.
    /// The two language sets never overlap; language partitioning
    /// happens here, at base selection, not as a post-merge filter.
    pub en_bases: Vec<String>,
    /// REST bases aggregated for Indonesian content.
    pub id_bases: Vec<String>,

    /// Character-database collection endpoint (custom plugin).
    pub characters_path: String,
    /// Banner configuration endpoint (custom plugin).
    pub banner_path: String,
    /// Like endpoint (custom plugin).
    pub like_path: String,
    /// Core comments collection.
    pub comments_path: String,

    /// In-memory response cache TTL, seconds.
    pub cache_ttl_secs: u64,

    /// Persisted device identifier for like dedup. Generated once by
    /// the embedding app (`wp_client::device::generate`) and reused.
    pub device_id: String,
}

impl Config {
    /// Configuration for a given site with the standard endpoint layout.
    pub fn for_site(site_url: &str) -> Self {
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            en_bases: vec![
                "wp/v2/posts".to_string(),
                "wp/v2/guides".to_string(),
                "wp/v2/events".to_string(),
            ],
            id_bases: vec![
                "wp/v2/id-posts".to_string(),
                "wp/v2/id-guides".to_string(),
                "wp/v2/id-events".to_string(),
            ],
            characters_path: "gdb/v1/characters".to_string(),
            banner_path: "appkit/v1/banner".to_string(),
            like_path: "appkit/v1/like".to_string(),
            comments_path: "wp/v2/comments".to_string(),
            cache_ttl_secs: 30,
            device_id: String::new(),
        }
    }

    /// Load configuration from environment variables.
    /// Panics with a clear message if INKWIRE_SITE_URL is missing.
    pub fn from_env() -> Self {
        let site_url = env::var("INKWIRE_SITE_URL")
            .unwrap_or_else(|_| panic!("INKWIRE_SITE_URL environment variable is required"));
        let mut config = Self::for_site(&site_url);
        if let Ok(ttl) = env::var("INKWIRE_CACHE_TTL_SECS") {
            config.cache_ttl_secs = ttl.parse().expect("INKWIRE_CACHE_TTL_SECS must be a number");
        }
        if let Ok(device_id) = env::var("INKWIRE_DEVICE_ID") {
            config.device_id = device_id;
        }
        config
    }

    /// The base set aggregated for a language.
    pub fn bases(&self, lang: Language) -> &[String] {
        match lang {
            Language::En => &self.en_bases,
            Language::Id => &self.id_bases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_url_trailing_slash_stripped() {
        let c = Config::for_site("https://site.example.com/");
        assert_eq!(c.site_url, "https://site.example.com");
    }

    #[test]
    fn language_base_sets_disjoint() {
        let c = Config::for_site("https://site.example.com");
        for base in c.bases(Language::En) {
            assert!(!c.bases(Language::Id).contains(base));
        }
    }
}
