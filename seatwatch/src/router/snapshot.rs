use seatwatch_core::{SeatWatchError, Snapshot};

use crate::SeatWatch;

impl SeatWatch {
    /// Reconstruct today's and tomorrow's timelines for one facility.
    ///
    /// The directory is read once and both days are planned from the same entry.
    /// The two runs execute one after the other, so the concurrency bound holds
    /// across the whole snapshot.
    ///
    /// # Errors
    /// Fails as a whole if either day fails; see [`SeatWatch::availability`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "seatwatch::snapshot", skip(self))
    )]
    pub async fn snapshot(&self, facility_id: u32) -> Result<Snapshot, SeatWatchError> {
        let facility = self.facility(facility_id).await?;
        let today_cfg = crate::GridConfig {
            tomorrow: false,
            ..self.cfg.grid.clone()
        };
        let today = self.availability_for(&facility, &today_cfg).await?;
        let tomorrow = self
            .availability_for(&facility, &today_cfg.for_tomorrow())
            .await?;
        Ok(Snapshot {
            facility_id,
            today,
            tomorrow,
        })
    }
}
