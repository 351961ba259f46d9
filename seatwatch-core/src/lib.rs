//! seatwatch-core
//!
//! Core types, traits, and algorithms shared across the seatwatch ecosystem.
//!
//! - `types`: facility metadata, window queries/results, and reconstruction output.
//! - `connector`: the `SeatConnector` trait and its capability provider traits.
//! - `grid`: planning the anchor grid that covers a facility's opening hours.
//! - `timeline`: folding window results into per-seat witnesses and rebuilding
//!   dense per-slot timelines from them.
//!
//! Nothing in this crate touches the network; the orchestrator in `seatwatch`
//! drives connectors and feeds their answers through these pieces.
#![warn(missing_docs)]

/// Connector capability traits and the primary `SeatConnector` interface.
pub mod connector;
/// Anchor grid planning.
pub mod grid;
/// Witness aggregation and timeline reconstruction.
pub mod timeline;
pub mod types;

pub use connector::{FacilityProvider, SeatConnector, WindowProvider};
pub use grid::TimeGrid;
pub use seatwatch_types::{GridConfig, RetryConfig, SeatWatchConfig, SeatWatchError};
pub use timeline::aggregate::{AreaWitnesses, SeatAggregator};
pub use timeline::reconstruct::{decode, densify, reconstruct};
pub use types::*;
