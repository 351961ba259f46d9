use chrono::TimeDelta;
use seatwatch_core::{
    Facility, GridConfig, Reconstruction, SeatAggregator, SeatWatchError, TimeGrid, reconstruct,
};

use crate::SeatWatch;

impl SeatWatch {
    /// Reconstruct today's seat timelines for `facility_id` with the configured grid.
    ///
    /// # Errors
    /// See [`SeatWatch::availability`].
    pub async fn today(&self, facility_id: u32) -> Result<Reconstruction, SeatWatchError> {
        let grid = self.cfg.grid.clone();
        self.availability(facility_id, &grid).await
    }

    /// Reconstruct tomorrow's seat timelines for `facility_id` with the configured grid.
    ///
    /// # Errors
    /// See [`SeatWatch::availability`].
    pub async fn tomorrow(&self, facility_id: u32) -> Result<Reconstruction, SeatWatchError> {
        let grid = self.cfg.grid.for_tomorrow();
        self.availability(facility_id, &grid).await
    }

    /// Resolve `facility_id` in the directory, then reconstruct its seat timelines
    /// over the grid described by `grid_cfg`.
    ///
    /// # Errors
    /// - `NotFound` for an unknown facility.
    /// - `Planning` for invalid grid parameters.
    /// - `WindowFailed`/`RequestTimeout` when any window cannot be fetched.
    pub async fn availability(
        &self,
        facility_id: u32,
        grid_cfg: &GridConfig,
    ) -> Result<Reconstruction, SeatWatchError> {
        let facility = self.facility(facility_id).await?;
        self.availability_for(&facility, grid_cfg).await
    }

    /// Reconstruct seat timelines for an already resolved `facility`.
    ///
    /// A facility without areas, or a grid with no anchors left (e.g. planned after
    /// closing time), yields an empty result without touching the network.
    ///
    /// # Errors
    /// Same as [`SeatWatch::availability`], minus the directory lookup.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "seatwatch::availability",
            skip(self, facility, grid_cfg),
            fields(facility = facility.id, tomorrow = grid_cfg.tomorrow),
        )
    )]
    pub async fn availability_for(
        &self,
        facility: &Facility,
        grid_cfg: &GridConfig,
    ) -> Result<Reconstruction, SeatWatchError> {
        let now = self.local_now();
        let grid = TimeGrid::plan(&facility.areas, grid_cfg, now)?;
        if facility.areas.is_empty() || grid.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::info!(
                target: "seatwatch::availability",
                areas = facility.areas.len(),
                "nothing to query"
            );
            return Ok(Reconstruction::empty(grid, &facility.areas));
        }

        let window = TimeDelta::from_std(grid_cfg.window)
            .map_err(|_| SeatWatchError::planning("window duration out of range"))?;
        let windows = self.fetch_windows(facility.id, &grid, window).await?;

        let mut aggregator = SeatAggregator::new(&facility.areas);
        for (anchor, result) in &windows {
            aggregator.observe(*anchor, result)?;
        }
        let areas = reconstruct(&grid, aggregator.finish());

        #[cfg(feature = "tracing")]
        tracing::info!(
            target: "seatwatch::availability",
            anchors = grid.len(),
            seats = areas.iter().map(|a| a.seats.len()).sum::<usize>(),
            "reconstructed"
        );
        Ok(Reconstruction {
            start: grid.start(),
            end: grid.end(),
            grid,
            areas,
        })
    }
}
