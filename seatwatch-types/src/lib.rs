//! Seatwatch-specific error taxonomy and configuration primitives shared by every crate
//! in the workspace.
#![warn(missing_docs)]

mod config;
mod error;

pub use config::{GridConfig, RetryConfig, SeatWatchConfig};
pub use error::SeatWatchError;
