use async_trait::async_trait;
use seatwatch_core::connector::{FacilityProvider, SeatConnector, WindowProvider};
use seatwatch_core::{Facility, SeatWatchError, WindowQuery, WindowResult};

pub mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, WindowBehavior};
pub use fixtures::{CLOSED_FACILITY_ID, DEMO_FACILITY_ID};

/// Mock connector for CI-safe demos. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SeatConnector for MockConnector {
    fn name(&self) -> &'static str {
        "seatwatch-mock"
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
impl FacilityProvider for MockConnector {
    async fn facilities(&self) -> Result<Vec<Facility>, SeatWatchError> {
        Ok(fixtures::facilities())
    }
}

#[async_trait]
impl WindowProvider for MockConnector {
    async fn available_seats(&self, query: &WindowQuery) -> Result<WindowResult, SeatWatchError> {
        if query.facility_id != DEMO_FACILITY_ID {
            return Ok(WindowResult::default());
        }
        Ok(fixtures::window(query.anchor))
    }
}
