//! Forecast store and refresh
//!
//! The [`Refresher`] owns the published forecast snapshot and is its only
//! writer. Consumers subscribe to a `tokio::sync::watch` channel and always
//! see a whole snapshot: current, hourly and daily records from one document.
//!
//! Refreshes are single-flight: a refresh requested while another is running
//! joins it and receives the same result instead of fetching again.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDateTime};
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cache::CacheManager;
use crate::data::{normalize, ForecastClient, ForecastError, ForecastRequest, NormalizedForecast, RawForecast};

/// Where a published snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    /// Replayed from the on-disk cache
    Cache,
    /// Freshly fetched from the provider
    Network,
}

/// A normalized forecast as published to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastSnapshot {
    #[serde(flatten)]
    pub forecast: NormalizedForecast,
    pub source: SnapshotSource,
    /// Device time the document was normalized at
    pub normalized_at: NaiveDateTime,
}

/// Outcome of a refresh, shared between every caller that joined it
pub type RefreshResult = Result<Arc<ForecastSnapshot>, Arc<ForecastError>>;

type InFlight = Shared<BoxFuture<'static, RefreshResult>>;

/// Fetches, normalizes, publishes and caches forecasts
pub struct Refresher {
    inner: Arc<Inner>,
}

struct Inner {
    client: ForecastClient,
    cache: Option<CacheManager>,
    request: ForecastRequest,
    state: watch::Sender<Option<Arc<ForecastSnapshot>>>,
    in_flight: Mutex<Option<InFlight>>,
    clock: fn() -> NaiveDateTime,
}

fn device_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Refresher {
    /// Creates a Refresher with an empty store
    ///
    /// # Arguments
    /// * `client` - Client used for network fetches
    /// * `cache` - Where the last document is persisted, if anywhere
    /// * `request` - Location and options of every fetch
    pub fn new(client: ForecastClient, cache: Option<CacheManager>, request: ForecastRequest) -> Self {
        Self::with_clock(client, cache, request, device_now)
    }

    /// Like [`Refresher::new`], with the device clock used for "last updated"
    /// correction replaced by `clock`
    pub fn with_clock(
        client: ForecastClient,
        cache: Option<CacheManager>,
        request: ForecastRequest,
        clock: fn() -> NaiveDateTime,
    ) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                client,
                cache,
                request,
                state,
                in_flight: Mutex::new(None),
                clock,
            }),
        }
    }

    /// Subscribes to published snapshots
    ///
    /// The receiver holds `None` until the first snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<ForecastSnapshot>>> {
        self.inner.state.subscribe()
    }

    /// The most recently published snapshot
    pub fn current(&self) -> Option<Arc<ForecastSnapshot>> {
        self.inner.state.borrow().clone()
    }

    /// Publishes the cached document, if there is a usable one
    ///
    /// Best-effort: a missing, corrupt or unnormalizable cache entry is logged
    /// and leaves the store untouched.
    ///
    /// # Returns
    /// `true` if a cached snapshot was published
    pub fn restore_from_cache(&self) -> bool {
        let Some(raw) = self.inner.cache.as_ref().and_then(CacheManager::load_last) else {
            debug!("no cached forecast to restore");
            return false;
        };

        match self.inner.publish(&raw, SnapshotSource::Cache) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "cached forecast could not be normalized");
                false
            }
        }
    }

    /// Fetches a fresh forecast and publishes it
    ///
    /// If a refresh is already running, waits for it and returns its result.
    /// On failure nothing is published, so the previous snapshot stays in
    /// place. On success the raw document is written through to the cache.
    pub async fn refresh(&self) -> RefreshResult {
        let pending = {
            let mut slot = self
                .inner
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            match slot.as_ref() {
                Some(pending) => {
                    debug!("joining in-flight refresh");
                    pending.clone()
                }
                None => {
                    let inner = Arc::clone(&self.inner);
                    let pending = async move {
                        let result = inner.fetch_and_publish().await;
                        inner
                            .in_flight
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .take();
                        result
                    }
                    .boxed()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }
}

impl Inner {
    async fn fetch_and_publish(&self) -> RefreshResult {
        let raw = self.client.fetch(&self.request).await.map_err(|e| {
            warn!(error = %e, query = %self.request.query, "forecast fetch failed");
            Arc::new(e)
        })?;

        let snapshot = self.publish(&raw, SnapshotSource::Network).map_err(|e| {
            warn!(error = %e, "forecast response could not be normalized");
            Arc::new(e)
        })?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save(&raw) {
                warn!(error = %e, "failed to cache forecast");
            }
        }

        Ok(snapshot)
    }

    fn publish(
        &self,
        raw: &RawForecast,
        source: SnapshotSource,
    ) -> Result<Arc<ForecastSnapshot>, ForecastError> {
        let now = (self.clock)();
        let forecast = normalize(raw, now)?;
        let snapshot = Arc::new(ForecastSnapshot {
            forecast,
            source,
            normalized_at: now,
        });

        self.state.send_replace(Some(Arc::clone(&snapshot)));
        info!(
            city = %snapshot.forecast.current.city,
            source = ?source,
            "forecast published"
        );
        Ok(snapshot)
    }
}
