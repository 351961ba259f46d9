//! Seatwatch reconstructs per-seat availability timelines from a booking service
//! that only answers "which seats are free at some point during this window?".
//!
//! Overview
//! - Plans an anchor grid over a facility's opening hours (`seatwatch_core::TimeGrid`).
//! - Issues one windowed query per anchor through a connector implementing the
//!   `seatwatch_core` contracts, with bounded concurrency, per-query timeouts, and
//!   retries for transient failures.
//! - Folds the answers into per-seat witnesses and decodes them into one boolean
//!   per grid slot.
//!
//! Key behaviors and trade-offs
//! - Windows overlap (a 30 minute window every 15 minutes), so a window flag covers
//!   two slots. Decoding ORs each flag with the previous one: availability is
//!   reported generously, and a seat free only in the first slot is never seen.
//! - Results are always aggregated in anchor order, whatever order queries finish in.
//! - A run is all-or-nothing: one window that fails after retries fails the run.
//! - Seats in areas missing from the directory are dropped.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use seatwatch::SeatWatch;
//! use seatwatch_nlb::NlbConnector;
//!
//! let sw = SeatWatch::builder()
//!     .with_connector(Arc::new(NlbConnector::new_default()))
//!     .max_concurrency(Some(8))
//!     .facility_cache(std::time::Duration::from_secs(3600))
//!     .build()?;
//!
//! let snap = sw.snapshot(22).await?;
//! for (key, timeline) in snap.today.seats() {
//!     println!("{} / {}: {:?}", key.area, key.seat, timeline.slots());
//! }
//! ```
//!
//! See `seatwatch/examples/` for a runnable demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Clock, FixedClock, SeatWatch, SeatWatchBuilder, SystemClock};
pub use router::backoff::jitter_wait;

pub use seatwatch_middleware::CachedConnector;

// Re-export core types for convenience
pub use seatwatch_core::{
    Area, AreaReport, AvailableSeat, Facility, GridConfig, Reconstruction, RetryConfig,
    SeatKey, SeatTimeline, SeatWatchConfig, SeatWatchError, Snapshot, TimeGrid, Timeline,
    WindowQuery, WindowResult,
};
