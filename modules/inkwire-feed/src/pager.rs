//! Infinite-scroll pagination state over a single base.

use std::sync::{Arc, Mutex};

use tracing::debug;

use inkwire_common::Post;
use wp_client::WpClient;

use crate::token::TokenSlot;

pub struct FeedPager {
    client: Arc<WpClient>,
    base: String,
    per_page: u32,
    homepage_only: bool,
    slot: TokenSlot,
    state: Mutex<PagerState>,
}

struct PagerState {
    next_page: u32,
    has_more: bool,
    posts: Vec<Post>,
}

impl FeedPager {
    pub fn new(client: Arc<WpClient>, base: &str, per_page: u32, homepage_only: bool) -> Self {
        Self {
            client,
            base: base.to_string(),
            per_page,
            homepage_only,
            slot: TokenSlot::new(),
            state: Mutex::new(PagerState {
                next_page: 1,
                has_more: true,
                posts: Vec::new(),
            }),
        }
    }

    pub fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more
    }

    /// Reload from the first page, superseding any in-flight load.
    pub async fn refresh(&self) -> Vec<Post> {
        let ticket = self.slot.begin();
        let page = self
            .client
            .fetch_page(&self.base, 1, self.per_page, self.homepage_only)
            .await;
        if !self.slot.is_current(ticket) {
            debug!(base = %self.base, "refresh superseded, discarding");
            return Vec::new();
        }
        let mut state = self.lock();
        state.next_page = 2;
        state.has_more = page.has_more;
        state.posts = page.posts.clone();
        page.posts
    }

    /// Fetch the next page and append it. Returns the new posts; empty
    /// when exhausted or when a newer operation superseded this one.
    pub async fn load_more(&self) -> Vec<Post> {
        let next_page = {
            let state = self.lock();
            if !state.has_more {
                return Vec::new();
            }
            state.next_page
        };
        let ticket = self.slot.begin();
        let page = self
            .client
            .fetch_page(&self.base, next_page, self.per_page, self.homepage_only)
            .await;
        if !self.slot.is_current(ticket) {
            debug!(base = %self.base, next_page, "load superseded, discarding");
            return Vec::new();
        }
        let mut state = self.lock();
        state.next_page = next_page + 1;
        state.has_more = page.has_more;
        state.posts.extend(page.posts.iter().cloned());
        page.posts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PagerState> {
        self.state.lock().expect("pager state lock poisoned")
    }
}
