use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the seatwatch workspace.
///
/// Planning problems are raised before any network call. Fetch problems are tagged
/// with the window anchor that failed, and a run that hits one never yields a
/// partial reconstruction.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeatWatchError {
    /// Grid parameters are invalid or contradictory (no areas, bad durations, ...).
    #[error("planning failed: {0}")]
    Planning(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The requested capability is not implemented by the connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label, e.g. "facilities" or "window".
        capability: String,
    },

    /// A facility or other resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "facility 42".
        what: String,
    },

    /// Network-level failure talking to the remote service.
    #[error("{connector} transport failure: {msg}")]
    Transport {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The remote service answered with a payload we could not interpret.
    #[error("data issue: {0}")]
    Data(String),

    /// An individual query exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "window").
        capability: String,
    },

    /// The overall run exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the run timed out.
        capability: String,
    },

    /// A windowed availability query failed after exhausting retries.
    #[error("window at {anchor} failed: {source}")]
    WindowFailed {
        /// Anchor timestamp of the failed window.
        anchor: NaiveDateTime,
        /// Last error observed for that window.
        source: Box<SeatWatchError>,
    },

    /// A window result arrived for an anchor earlier than one already aggregated.
    #[error("window at {anchor} observed after window at {last}")]
    OutOfOrder {
        /// Anchor of the offending result.
        anchor: NaiveDateTime,
        /// Latest anchor aggregated so far.
        last: NaiveDateTime,
    },
}

impl SeatWatchError {
    /// Helper: build a `Planning` error.
    pub fn planning(msg: impl Into<String>) -> Self {
        Self::Planning(msg.into())
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Transport` error with the connector name and message.
    pub fn transport(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Helper: wrap the last error seen for a window.
    #[must_use]
    pub fn window_failed(anchor: NaiveDateTime, source: Self) -> Self {
        Self::WindowFailed {
            anchor,
            source: Box::new(source),
        }
    }

    /// Returns true for failures worth retrying: transport errors and per-query timeouts.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::ProviderTimeout { .. })
    }

    /// Returns true if this error means a window could not be fetched.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::WindowFailed { .. } | Self::RequestTimeout { .. })
    }

    /// Unwrap `WindowFailed` layers down to the error reported by the connector.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::WindowFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
