//! Paged character browsing with cross-page dedup.
//!
//! The character endpoint returns the same character under multiple
//! distinct ids across paginated calls when localized variants exist,
//! so identity is a compound key (name, then permalink/slug/title) AND
//! an independent numeric-id check — failing either rejects the item.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use inkwire_common::Character;
use wp_client::{CharacterQuery, Result, WpClient};

pub struct CharacterBrowser {
    client: Arc<WpClient>,
    query: CharacterQuery,
    page: u32,
    has_more: bool,
    seen_keys: HashSet<String>,
    seen_ids: HashSet<i64>,
    items: Vec<Character>,
}

impl CharacterBrowser {
    pub fn new(client: Arc<WpClient>, query: CharacterQuery) -> Self {
        let page = query.page;
        Self {
            client,
            query,
            page,
            has_more: true,
            seen_keys: HashSet::new(),
            seen_ids: HashSet::new(),
            items: Vec::new(),
        }
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Everything accepted so far, in arrival order.
    pub fn items(&self) -> &[Character] {
        &self.items
    }

    /// Fetch the next page. Returns the newly accepted characters.
    ///
    /// Pagination ends when a page has no raw items OR when every raw
    /// item was rejected as a duplicate — both mean the end of useful
    /// data even if the raw count suggests more pages exist. Endpoint
    /// errors propagate and leave the browser state untouched.
    pub async fn load_more(&mut self) -> Result<Vec<Character>> {
        if !self.has_more {
            return Ok(Vec::new());
        }
        let mut query = self.query.clone();
        query.page = self.page;
        let raw = self.client.fetch_characters(&query).await?;
        if raw.is_empty() {
            debug!(page = self.page, "empty page, character list exhausted");
            self.has_more = false;
            return Ok(Vec::new());
        }

        let raw_count = raw.len();
        let mut added = Vec::new();
        for character in raw {
            let key = character.dedup_key();
            if self.seen_keys.contains(&key) || self.seen_ids.contains(&character.id) {
                continue;
            }
            self.seen_keys.insert(key);
            self.seen_ids.insert(character.id);
            added.push(character);
        }

        if added.is_empty() {
            debug!(page = self.page, raw_count, "all items were duplicates, stopping");
            self.has_more = false;
            return Ok(Vec::new());
        }

        debug!(page = self.page, raw_count, accepted = added.len(), "character page accepted");
        self.page += 1;
        self.items.extend(added.iter().cloned());
        Ok(added)
    }

    /// Discard all state and start from the first page again.
    pub fn reset(&mut self) {
        self.page = self.query.page;
        self.has_more = true;
        self.seen_keys.clear();
        self.seen_ids.clear();
        self.items.clear();
    }
}
