pub mod availability;
pub mod backoff;
pub mod facilities;
pub mod snapshot;
pub mod windows;
