mod common;
use seatwatch::SeatWatch;
use common::{facility_arg, get_connector};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Log to stderr; RUST_LOG=seatwatch=debug shows retries and grid planning.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // 2. Build the orchestrator around the connector (mock in CI when SEATWATCH_EXAMPLES_USE_MOCK is set).
    let sw = SeatWatch::builder()
        .with_connector(get_connector())
        .max_concurrency(Some(8))
        .build()?;

    // 3. Reconstruct today's remaining availability.
    let id = facility_arg();
    let rec = sw.today(id).await?;
    println!("{} .. {} ({} slots)", rec.start, rec.end, rec.grid.len());

    // 4. One row per seat: '.' is a free slot, '#' a taken one.
    for area in &rec.areas {
        let floor = area.floor.as_deref().unwrap_or("?");
        println!("\n{} (level {floor})", area.name);
        for seat in &area.seats {
            let row: String = seat
                .timeline
                .slots()
                .iter()
                .map(|free| if *free { '.' } else { '#' })
                .collect();
            println!("  {:>6} {row}", seat.key.seat);
        }
    }

    Ok(())
}
