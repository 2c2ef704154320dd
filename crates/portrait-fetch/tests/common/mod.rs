//! Scripted, instrumented HTTP transport for fetch tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use bytes::Bytes;
use portrait_fetch::{HttpClient, HttpResponse};
use serde_json::{Value, json};

pub const INDEX: &str = "http://index.test/graphql";
pub const OBJECTS: &str = "http://objects.test";

#[derive(Debug)]
pub struct MockError(String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MockError {}

#[derive(Clone, Debug)]
enum Outcome {
    Respond(u16, Bytes),
    Fail(String),
}

/// What a route answers, and after how long.
#[derive(Clone, Debug)]
pub struct Reply {
    outcome: Outcome,
    delay: Duration,
}

impl Reply {
    pub fn body(body: impl Into<Bytes>) -> Self {
        Self {
            outcome: Outcome::Respond(200, body.into()),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            outcome: Outcome::Respond(status, Bytes::new()),
            delay: Duration::ZERO,
        }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            outcome: Outcome::Fail(message.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }
}

/// One archive index entry.
#[derive(Clone, Debug)]
pub struct Entry {
    pub id: String,
    pub tags: Vec<(String, String)>,
}

impl Entry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tags: Vec::new(),
        }
    }

    pub fn tag(mut self, name: &str, value: &str) -> Self {
        self.tags.push((name.to_string(), value.to_string()));
        self
    }
}

/// Mock transport. Requests are counted when issued, before any delay, so a
/// request dropped mid-flight still shows up; one never issued does not.
#[derive(Default)]
pub struct MockClient {
    routes: HashMap<String, Reply>,
    pages: Vec<Vec<Entry>>,
    index_delay: Duration,
    index_reply: Option<Reply>,
    requests: Mutex<Vec<String>>,
    index_queries: Mutex<Vec<Value>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: impl Into<String>, reply: Reply) -> Self {
        self.routes.insert(url.into(), reply);
        self
    }

    /// Archive object `id` served from [`OBJECTS`].
    pub fn object(self, id: &str, reply: Reply) -> Self {
        self.route(format!("{OBJECTS}/{id}"), reply)
    }

    /// Pages served by the index at [`INDEX`], chained through their cursors.
    pub fn pages(mut self, pages: Vec<Vec<Entry>>) -> Self {
        self.pages = pages;
        self
    }

    pub fn index_delay(mut self, ms: u64) -> Self {
        self.index_delay = Duration::from_millis(ms);
        self
    }

    /// Override every index answer.
    pub fn index_reply(mut self, reply: Reply) -> Self {
        self.index_reply = Some(reply);
        self
    }

    pub fn requests(&self, url: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|u| *u == url).count()
    }

    pub fn total_requests(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn object_requests(&self) -> usize {
        let prefix = format!("{OBJECTS}/");
        self.requests.lock().unwrap().iter().filter(|u| u.starts_with(&prefix)).count()
    }

    pub fn index_queries(&self) -> Vec<Value> {
        self.index_queries.lock().unwrap().clone()
    }

    fn record(&self, url: &str) {
        self.requests.lock().unwrap().push(url.to_string());
    }

    fn page_for(&self, after: Option<&str>) -> Value {
        let page = match after {
            None => 0,
            Some(cursor) => {
                let previous: usize = cursor
                    .trim_start_matches('p')
                    .split('-')
                    .next()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(usize::MAX - 1);
                previous + 1
            }
        };
        let entries = self.pages.get(page).cloned().unwrap_or_default();
        let edges: Vec<Value> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let tags: Vec<Value> =
                    e.tags.iter().map(|(n, v)| json!({ "name": n, "value": v })).collect();
                json!({ "cursor": format!("p{page}-{i}"), "node": { "id": e.id, "tags": tags } })
            })
            .collect();
        json!({ "data": { "transactions": { "edges": edges } } })
    }
}

async fn deliver(reply: Reply) -> Result<HttpResponse, MockError> {
    tokio::time::sleep(reply.delay).await;
    match reply.outcome {
        Outcome::Respond(status, body) => Ok(HttpResponse::new(status, body)),
        Outcome::Fail(message) => Err(MockError(message)),
    }
}

impl HttpClient for MockClient {
    type Error = MockError;

    async fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> {
        self.record(url);
        let reply = self.routes.get(url).cloned().unwrap_or_else(|| Reply::status(404));
        deliver(reply).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, Self::Error> {
        self.record(url);
        if url != INDEX {
            return deliver(Reply::status(404)).await;
        }
        self.index_queries.lock().unwrap().push(body.clone());

        let reply = match &self.index_reply {
            Some(reply) => reply.clone(),
            None => {
                let page = self.page_for(body["variables"]["after"].as_str());
                Reply::body(page.to_string()).after(self.index_delay.as_millis() as u64)
            }
        };
        deliver(reply).await
    }
}

/// `count` index entries whose objects serve `body`.
pub fn entries_serving(client: MockClient, prefix: &str, count: usize, body: &'static str) -> (MockClient, Vec<Entry>) {
    let mut client = client;
    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let id = format!("{prefix}{i}");
        client = client.object(&id, Reply::body(body));
        entries.push(Entry::new(id));
    }
    (client, entries)
}
