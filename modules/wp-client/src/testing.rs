//! Scripted transport for tests: per-URL-fragment canned responses and
//! a recorded request log. No network, no server, deterministic.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::transport::{HttpResponse, Transport};

/// One request the mock has served.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

struct Rule {
    fragment: String,
    status: u16,
    body: String,
    delay: Option<Duration>,
}

/// Builder-style mock: first rule whose fragment is contained in the
/// request URL wins; unmatched requests get a 404.
#[derive(Default)]
pub struct MockTransport {
    rules: Vec<Rule>,
    log: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, fragment: &str, status: u16, body: &str) -> Self {
        self.rules.push(Rule {
            fragment: fragment.to_string(),
            status,
            body: body.to_string(),
            delay: None,
        });
        self
    }

    pub fn on_json(self, fragment: &str, status: u16, body: &Value) -> Self {
        self.on(fragment, status, &body.to_string())
    }

    /// Like `on`, but the response is held back for `delay` first.
    /// Used to script overlapping-request interleavings.
    pub fn on_delayed(mut self, fragment: &str, status: u16, body: &Value, delay: Duration) -> Self {
        self.rules.push(Rule {
            fragment: fragment.to_string(),
            status,
            body: body.to_string(),
            delay: Some(delay),
        });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().expect("mock log lock poisoned").clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().expect("mock log lock poisoned").len()
    }

    async fn respond(&self, method: &'static str, url: &str, body: Option<Value>) -> HttpResponse {
        self.log
            .lock()
            .expect("mock log lock poisoned")
            .push(RecordedRequest {
                method,
                url: url.to_string(),
                body,
            });
        let rule = self.rules.iter().find(|r| url.contains(&r.fragment));
        match rule {
            Some(rule) => {
                if let Some(delay) = rule.delay {
                    tokio::time::sleep(delay).await;
                }
                HttpResponse {
                    status: rule.status,
                    body: rule.body.clone(),
                }
            }
            None => HttpResponse {
                status: 404,
                body: String::new(),
            },
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        Ok(self.respond("GET", url, None).await)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        Ok(self.respond("POST", url, Some(body.clone())).await)
    }
}
