//! Debounced, race-guarded search-as-you-type.
//!
//! Every keystroke supersedes the previous query immediately (even
//! before its debounce window elapses), so an older in-flight search
//! can never overwrite a newer one's results.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use inkwire_common::{Language, Post};
use wp_client::WpClient;

use crate::debounce::Debouncer;
use crate::token::TokenSlot;

/// One settled search result, delivered on the session channel.
#[derive(Debug)]
pub struct SearchUpdate {
    pub query: String,
    pub posts: Vec<Post>,
}

pub struct SearchSession {
    client: Arc<WpClient>,
    lang: Language,
    per_page: u32,
    sort_by_date: bool,
    slot: Arc<TokenSlot>,
    debouncer: Debouncer,
    tx: mpsc::UnboundedSender<SearchUpdate>,
}

impl SearchSession {
    pub fn new(
        client: Arc<WpClient>,
        lang: Language,
        per_page: u32,
        sort_by_date: bool,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            client,
            lang,
            per_page,
            sort_by_date,
            slot: Arc::new(TokenSlot::new()),
            debouncer: Debouncer::new(debounce),
            tx,
        };
        (session, rx)
    }

    /// Feed the current query text (typically per keystroke).
    pub fn input(&self, query: &str) {
        let ticket = self.slot.begin();
        let client = Arc::clone(&self.client);
        let slot = Arc::clone(&self.slot);
        let tx = self.tx.clone();
        let query = query.to_string();
        let lang = self.lang;
        let per_page = self.per_page;
        let sort_by_date = self.sort_by_date;
        self.debouncer.call(move || async move {
            let posts = client.search(lang, &query, 1, per_page, sort_by_date).await;
            if slot.is_current(ticket) {
                let _ = tx.send(SearchUpdate { query, posts });
            } else {
                debug!(query, "stale search result discarded");
            }
        });
    }
}
