//! Link creation, resolution and analytics over a key-value store.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::event_reporter::EventReporter;
use crate::domain::entities::{
    ClickContext, ClickEvent, LinkRecord, LinkStatus, NewLink, RedirectTarget,
};
use crate::domain::log_event::Package;
use crate::domain::repositories::{KeyValueStore, LinkStore, StoreError};
use crate::error::{RegistryError, ResolveError, ValidationError};
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator, generate_id};
use crate::utils::validators::{
    is_reserved_code, validate_custom_code, validate_url, validate_validity,
};

/// Validity applied when a creation request does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: u32 = 30;

/// Aggregate counters over the whole registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    pub total_links: usize,
    pub active_links: usize,
    pub expired_links: usize,
    pub total_clicks: usize,
}

/// The short-link registry.
///
/// Every operation loads the whole collection, works on it, and (for writes)
/// stores it back while holding an internal lock, so two operations on the same
/// registry never interleave their read-modify-write cycles. Processes sharing
/// a store are not coordinated.
///
/// Custom short codes that are already taken are rejected with
/// [`ValidationError::ShortCodeTaken`]; they are never replaced by a generated
/// code.
pub struct LinkRegistry<S: KeyValueStore + ?Sized = dyn KeyValueStore> {
    links: LinkStore<S>,
    codes: Arc<dyn CodeGenerator>,
    reporter: EventReporter,
    default_validity_minutes: u32,
    lock: Mutex<()>,
}

impl<S: KeyValueStore + ?Sized> LinkRegistry<S> {
    /// Creates a registry storing its collection under `storage_key`.
    pub fn new(store: Arc<S>, storage_key: impl Into<String>, reporter: EventReporter) -> Self {
        Self {
            links: LinkStore::new(store, storage_key),
            codes: Arc::new(RandomCodeGenerator::default()),
            reporter,
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            lock: Mutex::new(()),
        }
    }

    /// Replaces the source of generated short codes.
    pub fn with_code_generator(mut self, codes: Arc<dyn CodeGenerator>) -> Self {
        self.codes = codes;
        self
    }

    /// Overrides the validity used when a request omits one. Zero is ignored.
    pub fn with_default_validity(mut self, minutes: u32) -> Self {
        if minutes > 0 {
            self.default_validity_minutes = minutes;
        }
        self
    }

    pub fn default_validity_minutes(&self) -> u32 {
        self.default_validity_minutes
    }

    pub fn storage_key(&self) -> &str {
        self.links.key()
    }

    /// Reporter used for this registry's events.
    pub fn reporter(&self) -> &EventReporter {
        &self.reporter
    }

    /// Creates a short link at `now`.
    ///
    /// # Code Selection
    ///
    /// - A non-blank `custom_short_code` is validated and used as-is
    /// - Otherwise codes are drawn from the generator until one is unused
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] if:
    /// - the URL is not an absolute http(s) URL
    /// - the validity is not positive
    /// - the custom code is malformed or already in use
    ///
    /// Returns [`RegistryError::Storage`] if the collection cannot be read or written.
    /// Nothing is written when an error is returned.
    pub async fn create(
        &self,
        new_link: NewLink,
        now: DateTime<Utc>,
    ) -> Result<LinkRecord, RegistryError> {
        let result = self.try_create(new_link, now).await;

        match &result {
            Ok(record) => {
                info!(code = %record.short_code, "Created short link for {}", record.original_url);
                self.reporter.info(
                    Package::Service,
                    format!(
                        "Created short code '{}' for {} (valid {} min)",
                        record.short_code, record.original_url, record.validity_minutes
                    ),
                );
            }
            Err(RegistryError::Validation(ValidationError::ShortCodeTaken(code))) => {
                warn!(code = %code, "Custom short code already in use");
                self.reporter.warn(
                    Package::Service,
                    format!("Custom short code '{code}' rejected: already in use"),
                );
            }
            Err(RegistryError::Validation(e)) => {
                debug!(error = %e, "Link creation rejected");
                self.reporter
                    .warn(Package::Service, format!("Validation failed: {e}"));
            }
            Err(RegistryError::Storage(e)) => {
                warn!(error = %e, "Link creation failed");
                self.reporter
                    .error(Package::Repository, format!("Failed to save link: {e}"));
            }
        }

        result
    }

    async fn try_create(
        &self,
        new_link: NewLink,
        now: DateTime<Utc>,
    ) -> Result<LinkRecord, RegistryError> {
        let original_url = validate_url(&new_link.original_url)?;

        let validity_minutes = match new_link.validity_minutes {
            Some(minutes) => validate_validity(minutes)?,
            None => self.default_validity_minutes,
        };
        let expires_at = now
            .checked_add_signed(Duration::minutes(i64::from(validity_minutes)))
            .ok_or_else(|| ValidationError::InvalidValidity(validity_minutes.to_string()))?;

        let custom_code = new_link
            .custom_short_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if let Some(code) = &custom_code {
            validate_custom_code(code)?;
        }

        let _guard = self.lock.lock().await;
        let mut records = self.links.load_all().await?;
        let taken: HashSet<&str> = records.iter().map(|r| r.short_code.as_str()).collect();

        let short_code = match custom_code {
            Some(code) if taken.contains(code.as_str()) => {
                return Err(ValidationError::ShortCodeTaken(code).into());
            }
            Some(code) => code,
            None => self.generate_unique_code(&taken),
        };

        let record = LinkRecord {
            id: generate_id(now),
            original_url,
            short_code,
            created_at: now,
            validity_minutes,
            expires_at,
            clicks: Vec::new(),
        };

        records.push(record.clone());
        self.links.save_all(&records).await?;

        Ok(record)
    }

    /// Draws codes until one is neither in `taken` nor reserved.
    ///
    /// There is no attempt limit; with 36^6 possible codes a free one is found
    /// almost immediately unless the namespace is nearly exhausted.
    fn generate_unique_code(&self, taken: &HashSet<&str>) -> String {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let code = self.codes.generate();
            if !taken.contains(code.as_str()) && !is_reserved_code(&code) {
                if attempts > 1 {
                    debug!(attempts, "Generated unique short code after collisions");
                }
                return code;
            }
        }
    }

    /// Resolves a short code at `now`, recording a click on success.
    ///
    /// The click is appended and the collection saved before returning; a
    /// failed resolution leaves the store untouched.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotFound`] if no record has this code
    /// - [`ResolveError::Expired`] if `now` is past the record's expiry
    /// - [`ResolveError::Storage`] if the collection cannot be read or written
    pub async fn resolve(
        &self,
        code: &str,
        now: DateTime<Utc>,
        context: &ClickContext,
    ) -> Result<RedirectTarget, ResolveError> {
        let result = self.try_resolve(code, now, context).await;

        match &result {
            Ok(target) => {
                debug!(code, clicks = target.click_count, "Resolved short code");
                self.reporter.info(
                    Package::Service,
                    format!(
                        "Redirecting '{code}' to {} (clicks: {})",
                        target.url, target.click_count
                    ),
                );
            }
            Err(ResolveError::NotFound { .. }) => {
                debug!(code, "Short code not found");
                self.reporter
                    .warn(Package::Service, format!("No link found for '{code}'"));
            }
            Err(ResolveError::Expired { expires_at, .. }) => {
                debug!(code, %expires_at, "Short code expired");
                self.reporter.warn(
                    Package::Service,
                    format!("Link '{code}' expired at {expires_at}"),
                );
            }
            Err(ResolveError::Storage(e)) => {
                warn!(code, error = %e, "Resolve failed");
                self.reporter.error(
                    Package::Repository,
                    format!("Failed to resolve '{code}': {e}"),
                );
            }
        }

        result
    }

    async fn try_resolve(
        &self,
        code: &str,
        now: DateTime<Utc>,
        context: &ClickContext,
    ) -> Result<RedirectTarget, ResolveError> {
        let _guard = self.lock.lock().await;
        let mut records = self.links.load_all().await?;

        let record = records
            .iter_mut()
            .find(|r| r.short_code == code)
            .ok_or_else(|| ResolveError::NotFound {
                code: code.to_string(),
            })?;

        if record.is_expired_at(now) {
            return Err(ResolveError::Expired {
                code: code.to_string(),
                expires_at: record.expires_at,
            });
        }

        record.record_click(ClickEvent::from_context(now, context));
        let target = RedirectTarget {
            url: record.original_url.clone(),
            click_count: record.click_count(),
        };

        self.links.save_all(&records).await?;
        Ok(target)
    }

    /// Returns every record in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub async fn list_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        self.links.load_all().await
    }

    /// Looks up a single record without recording a click.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub async fn find(&self, code: &str) -> Result<Option<LinkRecord>, StoreError> {
        let records = self.list_all().await?;
        Ok(records.into_iter().find(|r| r.short_code == code))
    }

    /// Counts links by status at `now` and totals their clicks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub async fn summarize(&self, now: DateTime<Utc>) -> Result<RegistrySummary, StoreError> {
        let records = self.list_all().await?;
        Ok(summarize_records(&records, now))
    }
}

/// Computes [`RegistrySummary`] for an already loaded collection.
pub fn summarize_records(records: &[LinkRecord], now: DateTime<Utc>) -> RegistrySummary {
    records
        .iter()
        .fold(RegistrySummary::default(), |mut summary, record| {
            summary.total_links += 1;
            summary.total_clicks += record.click_count();
            match record.status_at(now) {
                LinkStatus::Active => summary.active_links += 1,
                LinkStatus::Expired => summary.expired_links += 1,
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockKeyValueStore;
    use crate::domain::log_event::{Level, Stack};
    use crate::infrastructure::persistence::MemoryStore;
    use chrono::TimeZone;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::mpsc;

    struct SequenceGenerator {
        codes: StdMutex<Vec<&'static str>>,
    }

    impl SequenceGenerator {
        fn new(mut codes: Vec<&'static str>) -> Self {
            codes.reverse();
            Self {
                codes: StdMutex::new(codes),
            }
        }
    }

    impl CodeGenerator for SequenceGenerator {
        fn generate(&self) -> String {
            self.codes
                .lock()
                .unwrap()
                .pop()
                .expect("sequence exhausted")
                .to_string()
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn registry() -> LinkRegistry<MemoryStore> {
        LinkRegistry::new(
            Arc::new(MemoryStore::new()),
            "urlData",
            EventReporter::disabled(Stack::Backend),
        )
    }

    #[tokio::test]
    async fn test_create_generates_six_char_code() {
        let registry = registry();

        let record = registry
            .create(NewLink::new("https://example.com").with_validity(1), t0())
            .await
            .unwrap();

        assert_eq!(record.short_code.len(), 6);
        assert!(record.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(record.clicks.is_empty());
        assert_eq!(record.original_url, "https://example.com");
        assert_eq!(record.created_at, t0());
    }

    #[tokio::test]
    async fn test_create_applies_default_validity() {
        let registry = registry();

        let record = registry
            .create(NewLink::new("https://example.com"), t0())
            .await
            .unwrap();

        assert_eq!(record.validity_minutes, 30);
        assert_eq!(record.expires_at, t0() + Duration::minutes(30));
    }

    #[tokio::test]
    async fn test_create_with_configured_default_validity() {
        let registry = registry().with_default_validity(90);

        let record = registry
            .create(NewLink::new("https://example.com"), t0())
            .await
            .unwrap();

        assert_eq!(record.validity_minutes, 90);
        assert_eq!(registry.default_validity_minutes(), 90);
    }

    #[tokio::test]
    async fn test_create_skips_colliding_generated_codes() {
        let registry = registry().with_code_generator(Arc::new(SequenceGenerator::new(vec![
            "aaaaaa", "aaaaaa", "aaaaaa", "bbbbbb",
        ])));

        let first = registry
            .create(NewLink::new("https://one.example"), t0())
            .await
            .unwrap();
        let second = registry
            .create(NewLink::new("https://two.example"), t0())
            .await
            .unwrap();

        assert_eq!(first.short_code, "aaaaaa");
        assert_eq!(second.short_code, "bbbbbb");
    }

    #[tokio::test]
    async fn test_generated_code_skips_reserved_words() {
        let registry = registry().with_code_generator(Arc::new(SequenceGenerator::new(vec![
            "health", "ok1234",
        ])));

        let record = registry
            .create(NewLink::new("https://example.com"), t0())
            .await
            .unwrap();

        assert_eq!(record.short_code, "ok1234");
    }

    #[tokio::test]
    async fn test_generated_code_avoids_existing_custom_code() {
        let registry = registry().with_code_generator(Arc::new(SequenceGenerator::new(vec![
            "mine12", "fresh1",
        ])));

        registry
            .create(
                NewLink::new("https://one.example").with_custom_code("mine12"),
                t0(),
            )
            .await
            .unwrap();
        let generated = registry
            .create(NewLink::new("https://two.example"), t0())
            .await
            .unwrap();

        assert_eq!(generated.short_code, "fresh1");
    }

    #[tokio::test]
    async fn test_custom_code_collision_is_rejected() {
        let registry = registry();
        registry
            .create(
                NewLink::new("https://one.example").with_custom_code("abc123"),
                t0(),
            )
            .await
            .unwrap();

        let err = registry
            .create(
                NewLink::new("https://two.example").with_custom_code("abc123"),
                t0(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::ShortCodeTaken(ref c)) if c == "abc123"
        ));
        let all = registry.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].original_url, "https://one.example");
    }

    #[tokio::test]
    async fn test_blank_custom_code_is_treated_as_absent() {
        let registry = registry();

        let record = registry
            .create(NewLink::new("https://example.com").with_custom_code("  "), t0())
            .await
            .unwrap();

        assert_eq!(record.short_code.len(), 6);
    }

    #[tokio::test]
    async fn test_invalid_inputs_write_nothing() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get().times(0);
        mock.expect_set().times(0);

        let registry = LinkRegistry::new(
            Arc::new(mock),
            "urlData",
            EventReporter::disabled(Stack::Backend),
        );

        let cases = [
            NewLink::new("not-a-url"),
            NewLink::new("https://example.com").with_validity(0),
            NewLink::new("https://example.com").with_validity(-3),
            NewLink::new("https://example.com").with_custom_code("ab"),
            NewLink::new("https://example.com").with_custom_code("bad-code"),
        ];

        for case in cases {
            let err = registry.create(case, t0()).await.unwrap_err();
            assert!(matches!(err, RegistryError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_resolve_records_click() {
        let registry = registry();
        registry
            .create(
                NewLink::new("https://example.com").with_custom_code("abc123"),
                t0(),
            )
            .await
            .unwrap();

        let context = ClickContext::new(Some("https://news.example"), None);
        let at = t0() + Duration::minutes(5);
        let target = registry.resolve("abc123", at, &context).await.unwrap();

        assert_eq!(target.url, "https://example.com");
        assert_eq!(target.click_count, 1);

        let record = registry.find("abc123").await.unwrap().unwrap();
        assert_eq!(record.clicks.len(), 1);
        assert_eq!(record.clicks[0].timestamp, at);
        assert_eq!(record.clicks[0].source, "https://news.example");
        assert_eq!(record.clicks[0].location, "Unknown Location");
    }

    #[tokio::test]
    async fn test_resolve_increments_by_one_each_time() {
        let registry = registry();
        let record = registry
            .create(NewLink::new("https://example.com"), t0())
            .await
            .unwrap();

        for expected in 1..=4 {
            let target = registry
                .resolve(
                    &record.short_code,
                    t0() + Duration::minutes(expected as i64),
                    &ClickContext::default(),
                )
                .await
                .unwrap();
            assert_eq!(target.click_count, expected);
        }
    }

    #[tokio::test]
    async fn test_resolve_at_expiry_instant_still_succeeds() {
        let registry = registry();
        let record = registry
            .create(NewLink::new("https://example.com").with_validity(1), t0())
            .await
            .unwrap();

        let target = registry
            .resolve(&record.short_code, record.expires_at, &ClickContext::default())
            .await;

        assert!(target.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_expired_does_not_write() {
        let created = LinkRecord {
            id: "1".to_string(),
            original_url: "https://example.com".to_string(),
            short_code: "old123".to_string(),
            created_at: t0(),
            validity_minutes: 1,
            expires_at: t0() + Duration::minutes(1),
            clicks: Vec::new(),
        };
        let raw = serde_json::to_string(&vec![created]).unwrap();

        let mut mock = MockKeyValueStore::new();
        mock.expect_get()
            .returning(move |_| Ok(Some(raw.clone())));
        mock.expect_set().times(0);

        let registry = LinkRegistry::new(
            Arc::new(mock),
            "urlData",
            EventReporter::disabled(Stack::Backend),
        );

        for _ in 0..2 {
            let err = registry
                .resolve("old123", t0() + Duration::minutes(2), &ClickContext::default())
                .await
                .unwrap_err();
            assert!(matches!(err, ResolveError::Expired { .. }));
        }
    }

    #[tokio::test]
    async fn test_resolve_missing_does_not_write() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get().returning(|_| Ok(Some("[]".to_string())));
        mock.expect_set().times(0);

        let registry = LinkRegistry::new(
            Arc::new(mock),
            "urlData",
            EventReporter::disabled(Stack::Backend),
        );

        let err = registry
            .resolve("nope", t0(), &ClickContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::NotFound { ref code } if code == "nope"));
    }

    #[tokio::test]
    async fn test_corrupt_store_surfaces_error() {
        let registry = LinkRegistry::new(
            Arc::new(MemoryStore::with_entry("urlData", "garbage")),
            "urlData",
            EventReporter::disabled(Stack::Backend),
        );

        let err = registry
            .create(NewLink::new("https://example.com"), t0())
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::Storage(StoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_list_all_preserves_creation_order() {
        let registry = registry();
        for (i, code) in ["first", "second", "third"].iter().enumerate() {
            registry
                .create(
                    NewLink::new(format!("https://example.com/{i}")).with_custom_code(*code),
                    t0() + Duration::seconds(i as i64),
                )
                .await
                .unwrap();
        }

        let codes: Vec<String> = registry
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.short_code)
            .collect();

        assert_eq!(codes, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_summarize_counts_status_and_clicks() {
        let registry = registry();
        registry
            .create(
                NewLink::new("https://short.example")
                    .with_validity(1)
                    .with_custom_code("short"),
                t0(),
            )
            .await
            .unwrap();
        registry
            .create(
                NewLink::new("https://long.example")
                    .with_validity(60)
                    .with_custom_code("long"),
                t0(),
            )
            .await
            .unwrap();
        registry
            .resolve("long", t0(), &ClickContext::default())
            .await
            .unwrap();
        registry
            .resolve("short", t0(), &ClickContext::default())
            .await
            .unwrap();

        let summary = registry.summarize(t0() + Duration::minutes(5)).await.unwrap();

        assert_eq!(
            summary,
            RegistrySummary {
                total_links: 2,
                active_links: 1,
                expired_links: 1,
                total_clicks: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_operations_report_events() {
        let (tx, mut rx) = mpsc::channel(16);
        let registry = LinkRegistry::new(
            Arc::new(MemoryStore::new()),
            "urlData",
            EventReporter::new(Stack::Backend, tx),
        );

        registry
            .create(
                NewLink::new("https://example.com").with_custom_code("abc123"),
                t0(),
            )
            .await
            .unwrap();
        let _ = registry
            .create(
                NewLink::new("https://example.com").with_custom_code("abc123"),
                t0(),
            )
            .await;
        let _ = registry
            .resolve("missing", t0(), &ClickContext::default())
            .await;

        let levels: Vec<Level> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|e| e.level)
            .collect();

        assert_eq!(levels, vec![Level::Info, Level::Warn, Level::Warn]);
    }
}
