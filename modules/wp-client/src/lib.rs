//! WordPress REST aggregation client.
//!
//! Fetches content from one or more named "bases" (logical REST
//! collections), normalizes the payloads into typed records, and merges
//! multi-base results into one coherent feed. The core resilience
//! contract: one broken collection must never fail the aggregate.

pub mod cache;
pub mod device;
pub mod error;
pub mod transport;

mod envelope;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::{Result, WpError};
pub use transport::{HttpResponse, ReqwestTransport, Transport};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use url::Url;

use inkwire_common::{coerce, Banner, Character, Comment, Config, Language, Post};

use crate::cache::ResponseCache;
use crate::envelope::{unwrap_object, ListEnvelope};
use crate::error::snippet;

/// One page of a single-base paged fetch. `has_more` is computed from
/// the raw returned count (before any post-filtering): a short page
/// means the collection is exhausted.
#[derive(Debug)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub has_more: bool,
}

/// Sort key accepted by the character collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSort {
    Name,
    Rarity,
    Updated,
}

impl CharacterSort {
    fn as_param(self) -> &'static str {
        match self {
            CharacterSort::Name => "name",
            CharacterSort::Rarity => "rarity",
            CharacterSort::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_param(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query against the character collection endpoint.
#[derive(Debug, Clone)]
pub struct CharacterQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub element: Option<String>,
    pub weapon_type: Option<String>,
    pub rarity: Option<String>,
    pub role: Option<String>,
    pub sort_by: CharacterSort,
    pub order: SortOrder,
    pub lang: Language,
}

impl Default for CharacterQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
            search: None,
            element: None,
            weapon_type: None,
            rarity: None,
            role: None,
            sort_by: CharacterSort::Name,
            order: SortOrder::Asc,
            lang: Language::En,
        }
    }
}

/// Payload for the create-comment endpoint.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post: i64,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

pub struct WpClient {
    config: Config,
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
    device_id: String,
}

impl WpClient {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let device_id = if config.device_id.is_empty() {
            device::generate()
        } else {
            config.device_id.clone()
        };
        let cache = ResponseCache::new(Duration::from_secs(config.cache_ttl_secs));
        Self {
            config,
            transport,
            cache,
            device_id,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    // --- Posts ---

    /// Fetch one page from one base. Any transport failure, non-success
    /// status, or surprise payload shape yields an empty list — per-base
    /// isolation so one broken collection never fails the aggregate.
    pub async fn fetch_from_base(
        &self,
        base: &str,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Vec<Post> {
        match self.try_fetch_base(base, page, per_page, search).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!(base, error = %e, "base fetch failed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn try_fetch_base(
        &self,
        base: &str,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<Vec<Post>> {
        let url = self.collection_url(base, page, per_page, search);
        let value = self.get_json(&url).await?;
        let items = match serde_json::from_value::<ListEnvelope>(value) {
            Ok(env) => env.into_items(),
            Err(_) => {
                warn!(base, "unexpected top-level shape, treating as empty");
                Vec::new()
            }
        };
        let posts = items
            .iter()
            .map(Post::from_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(base, page, count = posts.len(), "base fetch complete");
        Ok(posts)
    }

    /// Concurrent fetch across `bases`, concatenated in base order,
    /// deduplicated by id (first occurrence wins), newest first.
    pub async fn fetch_many(&self, bases: &[String], per_page: u32) -> Vec<Post> {
        let fetches = bases
            .iter()
            .map(|base| self.fetch_from_base(base, 1, per_page, None));
        let merged: Vec<Post> = join_all(fetches).await.into_iter().flatten().collect();
        let mut posts = dedup_by_id(merged);
        sort_recent_first(&mut posts);
        info!(bases = bases.len(), posts = posts.len(), "aggregate fetch complete");
        posts
    }

    /// Aggregate fetch over the base set for one language.
    pub async fn fetch_all(&self, lang: Language, per_page: u32) -> Vec<Post> {
        self.fetch_many(self.config.bases(lang), per_page).await
    }

    /// Multi-base search. A blank query returns empty without issuing
    /// any request — it never silently degrades to fetch-all.
    pub async fn search(
        &self,
        lang: Language,
        query: &str,
        page: u32,
        per_page: u32,
        sort_by_date: bool,
    ) -> Vec<Post> {
        let query = query.trim();
        if query.is_empty() {
            debug!("blank search query, short-circuiting to empty");
            return Vec::new();
        }
        let bases = self.config.bases(lang);
        let fetches = bases
            .iter()
            .map(|base| self.fetch_from_base(base, page, per_page, Some(query)));
        let merged: Vec<Post> = join_all(fetches).await.into_iter().flatten().collect();
        let mut posts = dedup_by_id(merged);
        if sort_by_date {
            sort_recent_first(&mut posts);
        }
        info!(query, posts = posts.len(), "search complete");
        posts
    }

    /// Single-base paged fetch for infinite scroll. The home-feed
    /// filter runs after the has-more computation so a filtered-out
    /// page does not end pagination early.
    pub async fn fetch_page(
        &self,
        base: &str,
        page: u32,
        per_page: u32,
        homepage_only: bool,
    ) -> PostPage {
        let posts = self.fetch_from_base(base, page, per_page, None).await;
        let has_more = posts.len() >= per_page as usize;
        let posts = if homepage_only {
            posts.into_iter().filter(|p| p.show_on_home).collect()
        } else {
            posts
        };
        PostPage { posts, has_more }
    }

    // --- Banner ---

    /// Banner is cosmetic and never blocking: every failure, including
    /// transport errors, degrades to "no banner".
    pub async fn fetch_banner(&self) -> Option<Banner> {
        let url = self.endpoint(&self.config.banner_path);
        match self.get_json(&url).await {
            Ok(v) => Some(Banner::from_value(&v)),
            Err(e) => {
                debug!(error = %e, "banner fetch failed, continuing without banner");
                None
            }
        }
    }

    // --- Characters ---

    pub async fn fetch_characters(&self, query: &CharacterQuery) -> Result<Vec<Character>> {
        let url = self.character_list_url(query);
        let value = self.get_json(&url).await?;
        let items = serde_json::from_value::<ListEnvelope>(value)
            .map_err(|_| WpError::Shape {
                url: url.clone(),
                detail: "expected an array or {\"items\": [...]}".to_string(),
            })?
            .into_items();
        let characters = items
            .iter()
            .map(Character::from_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(page = query.page, count = characters.len(), "character page fetched");
        Ok(characters)
    }

    pub async fn fetch_character(&self, id: i64, lang: Language) -> Result<Character> {
        let url = format!(
            "{}/{id}?lang={lang}",
            self.endpoint(&self.config.characters_path)
        );
        let value = self.get_json(&url).await?;
        let obj = unwrap_object(value).ok_or_else(|| WpError::Shape {
            url: url.clone(),
            detail: "expected a character object".to_string(),
        })?;
        Ok(Character::from_value(&obj)?)
    }

    // --- Comments ---

    pub async fn fetch_comments(
        &self,
        post_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Comment>> {
        let mut url = match Url::parse(&self.endpoint(&self.config.comments_path)) {
            Ok(u) => u,
            Err(e) => {
                return Err(WpError::Shape {
                    url: self.endpoint(&self.config.comments_path),
                    detail: e.to_string(),
                })
            }
        };
        url.query_pairs_mut()
            .append_pair("post", &post_id.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        let url = url.to_string();
        let value = self.get_json(&url).await?;
        let items = match serde_json::from_value::<ListEnvelope>(value) {
            Ok(env) => env.into_items(),
            Err(_) => {
                warn!(post_id, "unexpected comments shape, treating as empty");
                Vec::new()
            }
        };
        let comments = items
            .iter()
            .map(Comment::from_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    pub async fn create_comment(&self, comment: &NewComment) -> Result<()> {
        let url = self.endpoint(&self.config.comments_path);
        let body = json!({
            "post": comment.post,
            "author_name": comment.author_name,
            "author_email": comment.author_email,
            "content": comment.content,
        });
        let resp = self.transport.post_json(&url, &body).await?;
        match resp.status {
            200 | 201 => {
                info!(post = comment.post, "comment created");
                Ok(())
            }
            status => Err(WpError::Http {
                status,
                url,
                snippet: snippet(&resp.body),
            }),
        }
    }

    // --- Likes ---

    /// Register a like for this device. Returns the new like count.
    pub async fn send_like(&self, post_id: i64) -> Result<i64> {
        let url = self.endpoint(&self.config.like_path);
        let body = json!({"post_id": post_id, "device_id": self.device_id});
        let resp = self.transport.post_json(&url, &body).await?;
        if !resp.is_success() {
            return Err(WpError::Http {
                status: resp.status,
                url,
                snippet: snippet(&resp.body),
            });
        }
        let value: Value = serde_json::from_str(&resp.body).map_err(|e| WpError::Shape {
            url,
            detail: e.to_string(),
        })?;
        let count = value.get("count").map(coerce::as_int).unwrap_or(0);
        info!(post_id, count, "like registered");
        Ok(count)
    }

    // --- Internals ---

    fn endpoint(&self, path: &str) -> String {
        format!("{}/wp-json/{}", self.config.site_url, path)
    }

    fn collection_url(
        &self,
        base: &str,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> String {
        let endpoint = self.endpoint(base);
        let Ok(mut url) = Url::parse(&endpoint) else {
            return endpoint;
        };
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("_embed", "true");
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("per_page", &per_page.to_string());
            if let Some(q) = search {
                pairs.append_pair("search", q);
            }
        }
        url.to_string()
    }

    fn character_list_url(&self, query: &CharacterQuery) -> String {
        let endpoint = self.endpoint(&self.config.characters_path);
        let Ok(mut url) = Url::parse(&endpoint) else {
            return endpoint;
        };
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("per_page", &query.per_page.to_string());
            for (key, value) in [
                ("search", &query.search),
                ("element", &query.element),
                ("weapon_type", &query.weapon_type),
                ("rarity", &query.rarity),
                ("role", &query.role),
            ] {
                if let Some(v) = value {
                    pairs.append_pair(key, v);
                }
            }
            pairs.append_pair("orderby", query.sort_by.as_param());
            pairs.append_pair("order", query.order.as_param());
            pairs.append_pair("lang", query.lang.code());
        }
        url.to_string()
    }

    /// Cached GET. Success is required; the JSON body is cached under
    /// the full request URL for the config TTL.
    async fn get_json(&self, url: &str) -> Result<Value> {
        if let Some(cached) = self.cache.get(url) {
            debug!(url, "response cache hit");
            return Ok(cached);
        }
        let resp = self.transport.get(url).await?;
        if !resp.is_success() {
            return Err(WpError::Http {
                status: resp.status,
                url: url.to_string(),
                snippet: snippet(&resp.body),
            });
        }
        let value: Value = serde_json::from_str(&resp.body).map_err(|e| WpError::Shape {
            url: url.to_string(),
            detail: e.to_string(),
        })?;
        self.cache.put(url, value.clone());
        Ok(value)
    }
}

/// Collapse duplicate post ids, first occurrence wins. Ids are only
/// guaranteed unique within one base; cross-base collisions collapse to
/// the earlier base by design.
fn dedup_by_id(posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::new();
    posts.into_iter().filter(|p| seen.insert(p.id)).collect()
}

/// Strictly descending by publish timestamp; stable for ties, undated
/// posts last.
fn sort_recent_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}
