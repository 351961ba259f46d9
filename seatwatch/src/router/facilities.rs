use seatwatch_core::{Facility, SeatWatchError};

use crate::SeatWatch;

impl SeatWatch {
    /// List every facility known to the connector, with areas and opening hours.
    ///
    /// # Errors
    /// `Unsupported` if the connector has no directory, `ProviderTimeout` if the
    /// lookup exceeds the request timeout, or the connector's own error.
    pub async fn facilities(&self) -> Result<Vec<Facility>, SeatWatchError> {
        let provider = self.facility_provider()?;
        Self::provider_call_with_timeout(
            self.connector.name(),
            "facilities",
            self.cfg.request_timeout,
            provider.facilities(),
        )
        .await
    }

    /// Look up a single facility by id.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, plus the errors of [`SeatWatch::facilities`].
    pub async fn facility(&self, id: u32) -> Result<Facility, SeatWatchError> {
        let provider = self.facility_provider()?;
        Self::provider_call_with_timeout(
            self.connector.name(),
            "facilities",
            self.cfg.request_timeout,
            provider.facility(id),
        )
        .await
    }
}
