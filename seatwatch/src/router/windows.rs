use chrono::{NaiveDateTime, TimeDelta};
use futures::{StreamExt, TryStreamExt};
use seatwatch_core::connector::WindowProvider;
use seatwatch_core::{SeatWatchError, TimeGrid, WindowQuery, WindowResult};

use crate::core::with_request_deadline;
use crate::router::backoff::retry_delay;
use crate::SeatWatch;

impl SeatWatch {
    /// Query every window of `grid` for `facility_id`, each spanning `window`.
    ///
    /// Results come back in anchor order no matter which query finishes first. At
    /// most `max_concurrency` queries are in flight at once. Transient failures are
    /// retried with exponential backoff and jitter.
    ///
    /// # Errors
    /// - `WindowFailed` for the first window (in anchor order) that could not be
    ///   fetched; queries still in flight are dropped and no results are returned.
    /// - `RequestTimeout` when the configured run deadline elapses first.
    /// - `Unsupported` when the connector cannot answer window queries.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "seatwatch::windows",
            skip(self, grid),
            fields(anchors = grid.len(), window_min = window.num_minutes()),
        )
    )]
    pub async fn fetch_windows(
        &self,
        facility_id: u32,
        grid: &TimeGrid,
        window: TimeDelta,
    ) -> Result<Vec<(NaiveDateTime, WindowResult)>, SeatWatchError> {
        if grid.is_empty() {
            return Ok(Vec::new());
        }
        if window <= TimeDelta::zero() {
            return Err(SeatWatchError::InvalidArg(
                "window must be positive".to_string(),
            ));
        }
        let provider = self.window_provider()?;
        let limit = self.cfg.max_concurrency.unwrap_or(grid.len()).max(1);

        let queries = grid.anchors().iter().map(move |&anchor| {
            let query = WindowQuery {
                facility_id,
                anchor,
                duration: window,
            };
            async move {
                self.fetch_window(provider, query)
                    .await
                    .map(|result| (anchor, result))
            }
        });
        let fetch = futures::stream::iter(queries)
            .buffered(limit)
            .try_collect::<Vec<_>>();

        with_request_deadline(self.cfg.run_timeout, "availability", fetch).await
    }

    async fn fetch_window(
        &self,
        provider: &dyn WindowProvider,
        query: WindowQuery,
    ) -> Result<WindowResult, SeatWatchError> {
        let retry = self.cfg.retry;
        let mut attempt: u32 = 0;
        loop {
            let res = Self::provider_call_with_timeout(
                self.connector.name(),
                "window",
                self.cfg.request_timeout,
                provider.available_seats(&query),
            )
            .await;
            match res {
                Ok(result) => return Ok(result),
                Err(e) if e.is_transient() && attempt < retry.max_retries => {
                    let wait = retry_delay(&retry, attempt);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "seatwatch::windows",
                        anchor = %query.anchor,
                        attempt = attempt + 1,
                        wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "retrying window query"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "seatwatch::windows",
                        anchor = %query.anchor,
                        attempts = attempt + 1,
                        error = %e,
                        "window query failed"
                    );
                    return Err(SeatWatchError::window_failed(query.anchor, e));
                }
            }
        }
    }
}
