use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vitrine_model::{Item, ItemList};

use super::{
    cache::{CacheEntry, CacheStore},
    client::ContentSource,
    clock::{Clock, SystemClock},
    settings::ProviderSettings,
};
use crate::error::{GalleryError, Result};

/// Where a successful fetch got its items from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Cache,
    Network,
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub items: ItemList,
    pub source: FetchSource,
}

/// Coarse failure class, enough for the host to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Config,
    Http { status: u16 },
    Network,
    InvalidResponse,
    Cache,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&GalleryError> for FetchFailure {
    fn from(err: &GalleryError) -> Self {
        let kind = match err {
            GalleryError::MissingCredential => FailureKind::Config,
            GalleryError::Http { status, .. } => {
                FailureKind::Http { status: *status }
            }
            GalleryError::Network(_) => FailureKind::Network,
            GalleryError::InvalidResponse(_)
            | GalleryError::Serialization(_) => FailureKind::InvalidResponse,
            GalleryError::CacheCorruption(_) | GalleryError::Cache(_) => {
                FailureKind::Cache
            }
            GalleryError::Playback(_) | GalleryError::Cancelled => {
                FailureKind::Other
            }
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(FetchFailure),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// What the presentation layer polls between frames.
#[derive(Debug, Clone, Default)]
pub struct ProviderSnapshot {
    pub items: ItemList,
    pub status: FetchStatus,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Fetches the full item list, caching it for a short while.
///
/// At most one fetch is live: starting a new one cancels the previous, and
/// a cancelled fetch never publishes its result.
pub struct DataProvider {
    source: Arc<dyn ContentSource>,
    cache: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    settings: ProviderSettings,
    generation: AtomicU64,
    in_flight: Mutex<Option<(u64, CancellationToken)>>,
    snapshot: RwLock<ProviderSnapshot>,
}

impl fmt::Debug for DataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataProvider")
            .field("source", &self.source)
            .field("cache", &self.cache)
            .field("settings", &self.settings)
            .field("status", &self.snapshot.read().status)
            .finish()
    }
}

impl DataProvider {
    pub fn new(
        source: Arc<dyn ContentSource>,
        cache: Arc<dyn CacheStore>,
        settings: ProviderSettings,
    ) -> Self {
        Self {
            source,
            cache,
            clock: Arc::new(SystemClock),
            settings,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            snapshot: RwLock::new(ProviderSnapshot::default()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> ProviderSnapshot {
        self.snapshot.read().clone()
    }

    pub fn items(&self) -> ItemList {
        self.snapshot.read().items.clone()
    }

    pub fn status(&self) -> FetchStatus {
        self.snapshot.read().status.clone()
    }

    /// Fetch the whole list, from the cache when allowed and fresh.
    ///
    /// Returns [`GalleryError::Cancelled`] if another fetch (or
    /// [`cancel`](Self::cancel)) took over before this one finished.
    pub async fn fetch(&self, use_cache: bool) -> Result<FetchOutcome> {
        let (generation, token) = self.begin();
        let result = self.run(use_cache, &token).await;
        self.finish(generation, &token, result)
    }

    /// Bypass the cache.
    pub async fn refetch(&self) -> Result<FetchOutcome> {
        self.fetch(false).await
    }

    /// Abort the live fetch, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        let Some((generation, token)) = self.in_flight.lock().take() else {
            return false;
        };
        token.cancel();
        let mut snapshot = self.snapshot.write();
        if snapshot.status.is_loading() {
            snapshot.status = FetchStatus::Idle;
        }
        debug!(generation, "fetch cancelled");
        true
    }

    /// Drop the cached list.
    pub async fn clear_cache(&self) -> Result<()> {
        self.cache.remove(&self.settings.cache_key).await
    }

    fn begin(&self) -> (u64, CancellationToken) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();
        {
            let mut in_flight = self.in_flight.lock();
            if let Some((previous, old)) =
                in_flight.replace((generation, token.clone()))
            {
                debug!(previous, generation, "superseding in-flight fetch");
                old.cancel();
            }
            self.snapshot.write().status = FetchStatus::Loading;
        }
        (generation, token)
    }

    fn finish(
        &self,
        generation: u64,
        token: &CancellationToken,
        result: Result<FetchOutcome>,
    ) -> Result<FetchOutcome> {
        let mut in_flight = self.in_flight.lock();
        let current = matches!(*in_flight, Some((g, _)) if g == generation);
        if token.is_cancelled() || !current {
            debug!(generation, "discarding result of cancelled fetch");
            return Err(GalleryError::Cancelled);
        }
        *in_flight = None;

        let mut snapshot = self.snapshot.write();
        match result {
            Ok(outcome) => {
                info!(
                    count = outcome.items.len(),
                    source = ?outcome.source,
                    "gallery items ready"
                );
                snapshot.items = outcome.items.clone();
                snapshot.status = FetchStatus::Ready;
                snapshot.last_updated = Some(self.clock.now());
                Ok(outcome)
            }
            Err(err) if err.is_cancelled() => {
                snapshot.status = FetchStatus::Idle;
                Err(err)
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch gallery items");
                snapshot.status = FetchStatus::Failed(FetchFailure::from(&err));
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        use_cache: bool,
        token: &CancellationToken,
    ) -> Result<FetchOutcome> {
        if !self.source.has_credential() {
            return Err(GalleryError::MissingCredential);
        }

        if use_cache && let Some(items) = self.load_cached().await {
            return Ok(FetchOutcome {
                items: items.into(),
                source: FetchSource::Cache,
            });
        }

        let items = self.fetch_all(token).await?;
        if token.is_cancelled() {
            return Err(GalleryError::Cancelled);
        }
        self.save_to_cache(&items).await;
        Ok(FetchOutcome {
            items: items.into(),
            source: FetchSource::Network,
        })
    }

    async fn fetch_all(&self, token: &CancellationToken) -> Result<Vec<Item>> {
        let limit = self.settings.page_size;
        let mut items = Vec::new();
        let mut offset = 0;
        let mut total_count = None;
        let mut first = true;

        loop {
            if token.is_cancelled() {
                return Err(GalleryError::Cancelled);
            }

            let page = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(GalleryError::Cancelled),
                page = self.source.fetch_page(offset, limit) => page?,
            };

            if first {
                total_count = page.total_count;
                first = false;
            }

            let received = page.contents.len();
            items.extend(page.contents);
            offset += received;
            debug!(received, fetched = items.len(), ?total_count, "page fetched");

            let reached = total_count.is_some_and(|total| items.len() >= total);
            if received == 0 || reached {
                return Ok(items);
            }
        }
    }

    async fn load_cached(&self) -> Option<Vec<Item>> {
        let key = &self.settings.cache_key;
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err @ GalleryError::CacheCorruption(_)) => {
                self.evict(&err).await;
                return None;
            }
            Err(err) => {
                warn!(error = %err, "cache read failed, using network");
                return None;
            }
        };

        let entry = match CacheEntry::from_bytes(&bytes) {
            Ok(entry) => entry,
            Err(err) => {
                self.evict(&err).await;
                return None;
            }
        };

        if entry.is_fresh(self.clock.now(), self.settings.cache_ttl) {
            debug!(count = entry.items.len(), "serving items from cache");
            Some(entry.items)
        } else {
            debug!(written_at = entry.timestamp, "cached items expired");
            None
        }
    }

    async fn evict(&self, err: &GalleryError) {
        warn!(error = %err, "discarding corrupt cache entry");
        if let Err(remove_err) =
            self.cache.remove(&self.settings.cache_key).await
        {
            warn!(error = %remove_err, "failed to evict cache entry");
        }
    }

    async fn save_to_cache(&self, items: &[Item]) {
        let entry = CacheEntry::new(items.to_vec(), self.clock.now());
        let written = match entry.to_bytes() {
            Ok(bytes) => self.cache.put(&self.settings.cache_key, &bytes).await,
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            warn!(error = %err, "failed to save items to cache");
        }
    }
}
