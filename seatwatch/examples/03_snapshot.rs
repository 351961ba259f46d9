mod common;
use std::time::Duration;

use seatwatch::SeatWatch;
use common::{facility_arg, get_connector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Keep the directory for an hour, the way a refreshing service would.
    let sw = SeatWatch::builder()
        .with_connector(get_connector())
        .facility_cache(Duration::from_secs(3600))
        .run_timeout(Some(Duration::from_secs(120)))
        .build()?;

    let snap = sw.snapshot(facility_arg()).await?;
    for (label, rec) in [("today", &snap.today), ("tomorrow", &snap.tomorrow)] {
        let free: usize = rec.seats().map(|(_, tl)| tl.available_slots()).sum();
        println!(
            "{label}: {} seats over {} slots, {free} free seat-slots",
            rec.seat_count(),
            rec.grid.len()
        );
    }

    Ok(())
}
