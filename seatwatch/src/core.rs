use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use seatwatch_core::connector::{FacilityProvider, SeatConnector, WindowProvider};
use seatwatch_middleware::CachedConnector;
use seatwatch_types::{GridConfig, RetryConfig, SeatWatchConfig, SeatWatchError};

/// Source of the current instant.
///
/// The orchestrator reads the clock once per run to resolve "today" and to
/// truncate elapsed windows. Tests inject a [`FixedClock`].
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Orchestrates windowed queries against a connector and rebuilds seat timelines.
pub struct SeatWatch {
    pub(crate) connector: Arc<dyn SeatConnector>,
    pub(crate) cfg: SeatWatchConfig,
    pub(crate) clock: Arc<dyn Clock>,
}

/// Builder for constructing a `SeatWatch` orchestrator with custom configuration.
pub struct SeatWatchBuilder {
    connector: Option<Arc<dyn SeatConnector>>,
    cfg: SeatWatchConfig,
    clock: Arc<dyn Clock>,
    facility_cache: Option<Duration>,
}

impl Default for SeatWatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SeatWatchBuilder {
    /// Create a new builder with default configuration and the system clock.
    ///
    /// Defaults: 15 minute grid over 30 minute windows, at most 8 queries in flight,
    /// 10s per query, two retries for transient failures, `Asia/Singapore` hours.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            cfg: SeatWatchConfig::default(),
            clock: Arc::new(SystemClock),
            facility_cache: None,
        }
    }

    /// Register the connector that answers directory and window queries.
    ///
    /// Registering again replaces the previous connector.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn SeatConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: SeatWatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Grid used by [`SeatWatch::today`] and [`SeatWatch::snapshot`].
    #[must_use]
    pub fn grid(mut self, grid: GridConfig) -> Self {
        self.cfg.grid = grid;
        self
    }

    /// Bound the number of window queries in flight. `None` fans out the whole grid.
    #[must_use]
    pub const fn max_concurrency(mut self, n: Option<usize>) -> Self {
        self.cfg.max_concurrency = n;
        self
    }

    /// Timeout applied to each individual window query.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = timeout;
        self
    }

    /// Deadline for the whole fetch phase of one run.
    #[must_use]
    pub const fn run_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.cfg.run_timeout = timeout;
        self
    }

    /// Retry policy for transient query failures.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.cfg.retry = retry;
        self
    }

    /// Time zone the facility's opening hours are expressed in.
    #[must_use]
    pub const fn time_zone(mut self, tz: Tz) -> Self {
        self.cfg.time_zone = tz;
        self
    }

    /// Inject the clock used to resolve "now".
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Cache the facility directory for `ttl`.
    ///
    /// Window queries are never cached.
    #[must_use]
    pub const fn facility_cache(mut self, ttl: Duration) -> Self {
        self.facility_cache = Some(ttl);
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no connector is registered or the configuration
    /// cannot be honored (zero concurrency or a zero request timeout).
    pub fn build(self) -> Result<SeatWatch, SeatWatchError> {
        let Some(connector) = self.connector else {
            return Err(SeatWatchError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            ));
        };
        if self.cfg.max_concurrency == Some(0) {
            return Err(SeatWatchError::InvalidArg(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.cfg.request_timeout.is_zero() {
            return Err(SeatWatchError::InvalidArg(
                "request_timeout must be positive".to_string(),
            ));
        }
        let connector: Arc<dyn SeatConnector> = match self.facility_cache {
            Some(ttl) => Arc::new(CachedConnector::new(connector, ttl)),
            None => connector,
        };
        Ok(SeatWatch {
            connector,
            cfg: self.cfg,
            clock: self.clock,
        })
    }
}

impl SeatWatch {
    /// Start building a new `SeatWatch` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use seatwatch::SeatWatch;
    /// use seatwatch_nlb::NlbConnector;
    ///
    /// let sw = SeatWatch::builder()
    ///     .with_connector(Arc::new(NlbConnector::new_default()))
    ///     .max_concurrency(Some(4))
    ///     .build()?;
    /// let today = sw.today(22).await?;
    /// ```
    #[must_use]
    pub fn builder() -> SeatWatchBuilder {
        SeatWatchBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &SeatWatchConfig {
        &self.cfg
    }

    /// Name of the registered connector.
    #[must_use]
    pub fn connector_name(&self) -> &'static str {
        self.connector.name()
    }

    /// The current wall-clock time in the facility's time zone.
    pub(crate) fn local_now(&self) -> NaiveDateTime {
        self.clock
            .now()
            .with_timezone(&self.cfg.time_zone)
            .naive_local()
    }

    pub(crate) fn facility_provider(&self) -> Result<&dyn FacilityProvider, SeatWatchError> {
        self.connector
            .as_facility_provider()
            .ok_or_else(|| SeatWatchError::unsupported("facilities"))
    }

    pub(crate) fn window_provider(&self) -> Result<&dyn WindowProvider, SeatWatchError> {
        self.connector
            .as_window_provider()
            .ok_or_else(|| SeatWatchError::unsupported("window"))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "seatwatch::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, SeatWatchError>
    where
        Fut: core::future::Future<Output = Result<T, SeatWatchError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(SeatWatchError::provider_timeout(connector_name, capability)))
    }
}

/// Await `fut` under an optional overall deadline.
///
/// # Errors
/// Returns `RequestTimeout` for `capability` when the deadline elapses first,
/// otherwise whatever `fut` returns.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    capability: &'static str,
    fut: Fut,
) -> Result<T, SeatWatchError>
where
    Fut: core::future::Future<Output = Result<T, SeatWatchError>>,
{
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await)
            .unwrap_or_else(|_| Err(SeatWatchError::request_timeout(capability))),
        None => fut.await,
    }
}
