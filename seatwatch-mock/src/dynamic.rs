use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::Mutex;

use seatwatch_core::connector::{FacilityProvider, SeatConnector, WindowProvider};
use seatwatch_core::{Facility, SeatWatchError, WindowQuery, WindowResult};

/// Instruction for how a window query should behave for a given anchor.
#[derive(Clone, Debug)]
pub enum WindowBehavior {
    /// Return the provided result immediately.
    Return(WindowResult),
    /// Sleep, then return the provided result.
    Delay(Duration, WindowResult),
    /// Fail every attempt with the provided error.
    Fail(SeatWatchError),
    /// Fail the first `times` attempts, then return `then`.
    FailTimes {
        /// Number of failing attempts before success.
        times: usize,
        /// Error returned by each failing attempt.
        error: SeatWatchError,
        /// Result returned once the failures are used up.
        then: WindowResult,
    },
    /// Hang indefinitely (simulate a stalled request).
    Hang,
}

#[derive(Default)]
struct InternalState {
    facilities: Vec<Facility>,
    facilities_error: Option<SeatWatchError>,
    rules: HashMap<NaiveDateTime, WindowBehavior>,
    attempts: HashMap<NaiveDateTime, usize>,
    queries: Vec<WindowQuery>,
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    facility_calls: AtomicUsize,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

impl DynamicMockController {
    /// Replace the facility directory.
    pub async fn set_facilities(&self, facilities: Vec<Facility>) {
        let mut guard = self.state.lock().await;
        guard.facilities = facilities;
        guard.facilities_error = None;
    }

    /// Make directory lookups fail with `error`.
    pub async fn fail_facilities(&self, error: SeatWatchError) {
        self.state.lock().await.facilities_error = Some(error);
    }

    /// Set the behavior for the window anchored at `anchor`.
    ///
    /// Anchors without a rule answer with an empty result.
    pub async fn set_window(&self, anchor: NaiveDateTime, behavior: WindowBehavior) {
        self.state.lock().await.rules.insert(anchor, behavior);
    }

    /// Number of attempts made for `anchor`, retries included.
    pub async fn attempts(&self, anchor: NaiveDateTime) -> usize {
        self.state
            .lock()
            .await
            .attempts
            .get(&anchor)
            .copied()
            .unwrap_or(0)
    }

    /// Every window query received, in arrival order.
    pub async fn queries(&self) -> Vec<WindowQuery> {
        self.state.lock().await.queries.clone()
    }

    /// Highest number of window queries observed in flight at once.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.counters.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Number of directory lookups served.
    #[must_use]
    pub fn facility_calls(&self) -> usize {
        self.counters.facility_calls.load(Ordering::SeqCst)
    }
}

/// A connector whose behavior is scripted at runtime by a [`DynamicMockController`].
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

impl DynamicMockConnector {
    /// Create a connector and the controller that scripts it.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let counters = Arc::new(Counters::default());
        let connector = Arc::new(Self {
            name,
            state: Arc::clone(&state),
            counters: Arc::clone(&counters),
        });
        (connector, DynamicMockController { state, counters })
    }
}

struct InFlight<'a>(&'a Counters);

impl<'a> InFlight<'a> {
    fn enter(c: &'a Counters) -> Self {
        let now = c.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        c.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(c)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SeatConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }
    fn as_facility_provider(&self) -> Option<&dyn FacilityProvider> {
        Some(self as &dyn FacilityProvider)
    }
    fn as_window_provider(&self) -> Option<&dyn WindowProvider> {
        Some(self as &dyn WindowProvider)
    }
}

#[async_trait]
impl FacilityProvider for DynamicMockConnector {
    async fn facilities(&self) -> Result<Vec<Facility>, SeatWatchError> {
        self.counters.facility_calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.state.lock().await;
        if let Some(e) = &guard.facilities_error {
            return Err(e.clone());
        }
        Ok(guard.facilities.clone())
    }
}

#[async_trait]
impl WindowProvider for DynamicMockConnector {
    async fn available_seats(&self, query: &WindowQuery) -> Result<WindowResult, SeatWatchError> {
        let _in_flight = InFlight::enter(&self.counters);
        let (behavior, attempt) = {
            let mut guard = self.state.lock().await;
            guard.queries.push(*query);
            let attempt = {
                let n = guard.attempts.entry(query.anchor).or_insert(0);
                *n += 1;
                *n
            };
            (guard.rules.get(&query.anchor).cloned(), attempt)
        };

        match behavior {
            None => Ok(WindowResult::default()),
            Some(WindowBehavior::Return(r)) => Ok(r),
            Some(WindowBehavior::Delay(d, r)) => {
                tokio::time::sleep(d).await;
                Ok(r)
            }
            Some(WindowBehavior::Fail(e)) => Err(e),
            Some(WindowBehavior::FailTimes { times, error, then }) => {
                if attempt <= times {
                    Err(error)
                } else {
                    Ok(then)
                }
            }
            Some(WindowBehavior::Hang) => {
                std::future::pending::<()>().await;
                Ok(WindowResult::default())
            }
        }
    }
}
