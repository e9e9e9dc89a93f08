use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

/// Time-boxed memo of raw response bodies, one entry per request URL.
///
/// Entries are never evicted; a stale entry is simply overwritten by the next
/// successful fetch for the same key. Since every endpoint URL embeds the
/// competition code, this amounts to a single slot per competition and
/// endpoint.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    fetched_at: Instant,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get_fresh(&self, key: &str, now: Instant) -> Option<String> {
        let guard = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = guard.get(key)?;
        let age = now.saturating_duration_since(entry.fetched_at);
        if age <= self.ttl {
            Some(entry.body.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, key: &str, body: String, now: Instant) {
        let mut guard = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        guard.insert(
            key.to_string(),
            CacheEntry {
                body,
                fetched_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn fetch_json_cached(
    client: &Client,
    cache: &ResponseCache,
    url: &str,
    extra_headers: &[(&str, &str)],
) -> Result<String> {
    if let Some(body) = cache.get_fresh(url, Instant::now()) {
        debug!(url, "response cache hit");
        return Ok(body);
    }

    let mut req = client.get(url).header(USER_AGENT, "pari_foot/0.1");
    for (name, value) in extra_headers {
        req = req.header(*name, *value);
    }

    let resp = req.send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }

    cache.insert(url, body.clone(), Instant::now());
    Ok(body)
}
