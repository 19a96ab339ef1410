#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use shortlink_registry::application::services::{EventReporter, LinkRegistry};
use shortlink_registry::domain::entities::{ClickContext, ClickEvent, LinkRecord};
use shortlink_registry::domain::log_event::{LogEvent, Stack};
use shortlink_registry::domain::repositories::{DEFAULT_STORAGE_KEY, KeyValueStore};
use shortlink_registry::infrastructure::persistence::MemoryStore;
use shortlink_registry::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const TEST_BASE_URL: &str = "http://sho.rt";

pub fn test_record(code: &str, url: &str, created_at: DateTime<Utc>, minutes: u32) -> LinkRecord {
    LinkRecord {
        id: format!("{}test", created_at.timestamp_millis()),
        original_url: url.to_string(),
        short_code: code.to_string(),
        created_at,
        validity_minutes: minutes,
        expires_at: created_at + Duration::minutes(i64::from(minutes)),
        clicks: Vec::new(),
    }
}

pub fn active_link(code: &str, url: &str) -> LinkRecord {
    test_record(code, url, Utc::now(), 60)
}

pub fn expired_link(code: &str, url: &str) -> LinkRecord {
    test_record(code, url, Utc::now() - Duration::hours(2), 1)
}

pub fn with_clicks(mut record: LinkRecord, count: usize) -> LinkRecord {
    for _ in 0..count {
        record
            .clicks
            .push(ClickEvent::from_context(record.created_at, &ClickContext::default()));
    }
    record
}

/// Writes `records` as the whole collection.
pub async fn seed_links(store: &MemoryStore, records: &[LinkRecord]) {
    let raw = serde_json::to_string(records).unwrap();
    store.set(DEFAULT_STORAGE_KEY, &raw).await.unwrap();
}

pub async fn stored_links(store: &MemoryStore) -> Vec<LinkRecord> {
    match store.get(DEFAULT_STORAGE_KEY).await.unwrap() {
        Some(raw) => serde_json::from_str(&raw).unwrap(),
        None => Vec::new(),
    }
}

/// Builds state over an in-memory store; the receiver sees every reported event.
pub fn create_test_state() -> (AppState, Arc<MemoryStore>, mpsc::Receiver<LogEvent>) {
    let store = Arc::new(MemoryStore::new());
    let (tx, rx) = mpsc::channel(100);
    let reporter = EventReporter::new(Stack::Backend, tx);

    let kv: Arc<dyn KeyValueStore> = store.clone();
    let registry = LinkRegistry::new(kv, DEFAULT_STORAGE_KEY, reporter.clone());

    let state = AppState::new(Arc::new(registry), reporter, TEST_BASE_URL);

    (state, store, rx)
}
