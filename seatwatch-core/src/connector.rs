use async_trait::async_trait;

use crate::types::{Facility, WindowQuery, WindowResult};
use seatwatch_types::SeatWatchError;

/// Focused role trait for connectors that expose the facility directory.
#[async_trait]
pub trait FacilityProvider: Send + Sync {
    /// Fetch every bookable facility with its areas and opening hours.
    async fn facilities(&self) -> Result<Vec<Facility>, SeatWatchError>;

    /// Fetch a single facility by id.
    ///
    /// Default: scans [`FacilityProvider::facilities`]; returns `NotFound` for an unknown id.
    async fn facility(&self, id: u32) -> Result<Facility, SeatWatchError> {
        self.facilities()
            .await?
            .into_iter()
            .find(|f| f.id == id)
            .ok_or_else(|| SeatWatchError::not_found(format!("facility {id}")))
    }
}

/// Focused role trait for connectors that answer windowed availability queries.
#[async_trait]
pub trait WindowProvider: Send + Sync {
    /// Seats available at some point during the queried window.
    async fn available_seats(&self, query: &WindowQuery) -> Result<WindowResult, SeatWatchError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
pub trait SeatConnector: Send + Sync {
    /// A stable identifier used to tag errors (e.g. "seatwatch-nlb").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise the facility directory capability when supported.
    fn as_facility_provider(&self) -> Option<&dyn FacilityProvider> {
        None
    }

    /// Advertise the windowed availability capability when supported.
    fn as_window_provider(&self) -> Option<&dyn WindowProvider> {
        None
    }
}
