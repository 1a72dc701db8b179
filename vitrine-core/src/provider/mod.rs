//! Remote content fetching with a local, time-limited cache.
//!
//! [`DataProvider`] pages through the content API, keeps the resulting
//! [`ItemList`](vitrine_model::ItemList) and publishes a status snapshot the
//! presentation layer can poll. Only one fetch is live at a time; starting
//! another cancels the previous one.

pub mod cache;
pub mod client;
pub mod clock;
pub mod data_provider;
pub mod settings;

pub use cache::{CacheEntry, CacheRoot, CacheStore, DiskCacheStore, MemoryCacheStore, NullCacheStore};
pub use client::{ContentApiClient, ContentPage, ContentSource};
pub use clock::{Clock, ManualClock, SystemClock};
pub use data_provider::{
    DataProvider, FailureKind, FetchFailure, FetchOutcome, FetchSource,
    FetchStatus, ProviderSnapshot,
};
pub use settings::{ContentApiSettings, ProviderSettings};
