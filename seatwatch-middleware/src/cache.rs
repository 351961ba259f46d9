use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use seatwatch_core::connector::{FacilityProvider, SeatConnector, WindowProvider};
use seatwatch_core::{Facility, SeatWatchError};

/// Connector wrapper that caches the facility directory for a fixed TTL.
///
/// Failed lookups are not cached. Window queries pass straight through to the
/// inner connector.
pub struct CachedConnector {
    inner: Arc<dyn SeatConnector>,
    directory: Cache<(), Arc<Vec<Facility>>>,
    ttl: Duration,
}

impl CachedConnector {
    /// Wrap `inner`, keeping its directory for `ttl`.
    #[must_use]
    pub fn new(inner: Arc<dyn SeatConnector>, ttl: Duration) -> Self {
        let directory = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self {
            inner,
            directory,
            ttl,
        }
    }

    /// Configured time-to-live of the cached directory.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drop the cached directory; the next lookup goes to the inner connector.
    pub async fn invalidate(&self) {
        self.directory.invalidate(&()).await;
    }

    async fn load(&self) -> Result<Arc<Vec<Facility>>, SeatWatchError> {
        let Some(provider) = self.inner.as_facility_provider() else {
            return Err(SeatWatchError::unsupported("facilities"));
        };
        self.directory
            .try_get_with((), async {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "seatwatch::middleware::cache",
                    connector = self.inner.name(),
                    "facility directory cache miss"
                );
                provider.facilities().await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<SeatWatchError>| (*e).clone())
    }
}

impl SeatConnector for CachedConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }
    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }
    fn as_facility_provider(&self) -> Option<&dyn FacilityProvider> {
        self.inner
            .as_facility_provider()
            .map(|_| self as &dyn FacilityProvider)
    }
    fn as_window_provider(&self) -> Option<&dyn WindowProvider> {
        self.inner.as_window_provider()
    }
}

#[async_trait]
impl FacilityProvider for CachedConnector {
    async fn facilities(&self) -> Result<Vec<Facility>, SeatWatchError> {
        self.load().await.map(|d| d.as_ref().clone())
    }

    async fn facility(&self, id: u32) -> Result<Facility, SeatWatchError> {
        self.load()
            .await?
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| SeatWatchError::not_found(format!("facility {id}")))
    }
}
