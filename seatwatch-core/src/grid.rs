use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::Area;
use seatwatch_types::{GridConfig, SeatWatchError};

/// Ordered anchors `start, start + step, ...` strictly below `end`.
///
/// Every window query, witness, and timeline slot of a run is indexed by this grid.
/// Deserialization rebuilds the anchors through [`TimeGrid::new`] and rejects a
/// payload whose anchor list disagrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct TimeGrid {
    start: NaiveDateTime,
    end: NaiveDateTime,
    step_seconds: i64,
    anchors: Vec<NaiveDateTime>,
}

impl TimeGrid {
    /// Build the half-open grid `[start, end)` with the given spacing.
    ///
    /// `start >= end` yields an empty grid.
    ///
    /// # Errors
    /// Returns `Planning` if `interval` is not strictly positive or not a whole
    /// number of seconds.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        interval: TimeDelta,
    ) -> Result<Self, SeatWatchError> {
        if interval <= TimeDelta::zero() {
            return Err(SeatWatchError::planning(format!(
                "interval must be positive, got {interval}"
            )));
        }
        if interval.subsec_nanos() != 0 {
            return Err(SeatWatchError::planning(format!(
                "interval must be a whole number of seconds, got {interval}"
            )));
        }
        let mut anchors = Vec::new();
        let mut t = start;
        while t < end {
            anchors.push(t);
            t = match t.checked_add_signed(interval) {
                Some(next) => next,
                None => break,
            };
        }
        Ok(Self {
            start,
            end,
            step_seconds: interval.num_seconds(),
            anchors,
        })
    }

    /// Resolve `cfg` against a facility's areas and the current facility-local time.
    ///
    /// Steps, in order: pick start/end times-of-day (explicit or derived from the
    /// areas), place them on today's or tomorrow's date, clamp the start forward to
    /// `now` when truncating, then align the start, then lay out the anchors.
    ///
    /// # Errors
    /// Returns `Planning` when the durations are inconsistent, the alignment unit
    /// does not divide an hour, or a bound must be derived from an empty area list.
    pub fn plan(
        areas: &[Area],
        cfg: &GridConfig,
        now: NaiveDateTime,
    ) -> Result<Self, SeatWatchError> {
        let interval = to_delta(cfg.interval, "interval")?;
        let window = to_delta(cfg.window, "window")?;
        if window < interval {
            return Err(SeatWatchError::planning(format!(
                "window ({window}) is narrower than the interval ({interval})"
            )));
        }
        match cfg.align_start_minute {
            Some(0) => {
                return Err(SeatWatchError::planning(
                    "alignment unit must be at least one minute",
                ));
            }
            Some(m) if 60 % m != 0 => {
                return Err(SeatWatchError::planning(format!(
                    "alignment unit must divide an hour, got {m} minutes"
                )));
            }
            _ => {}
        }

        let open = match cfg.start {
            Some(t) => t,
            None => earliest_opening(areas)?,
        };
        let close = match cfg.end {
            Some(t) => t,
            None => latest_closing(areas)?,
        };

        let mut date = now.date();
        if cfg.tomorrow {
            date = date
                .succ_opt()
                .ok_or_else(|| SeatWatchError::planning("date overflow computing tomorrow"))?;
        }
        let mut start = date.and_time(open);
        let end = date.and_time(close);

        if cfg.truncate_start {
            start = start.max(now);
        }
        if let Some(minutes) = cfg.align_start_minute {
            start = align_start(start, minutes)?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(%start, %end, %interval, "resolved anchor grid bounds");

        Self::new(start, end, interval)
    }

    /// First anchor (inclusive bound).
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive upper bound; never itself an anchor.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Spacing between consecutive anchors.
    #[must_use]
    pub fn interval(&self) -> TimeDelta {
        TimeDelta::seconds(self.step_seconds)
    }

    /// Anchors in ascending order.
    #[must_use]
    pub fn anchors(&self) -> &[NaiveDateTime] {
        &self.anchors
    }

    /// Number of anchors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// True when the grid has no anchors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Slot index of `anchor`, if it lies on the grid.
    #[must_use]
    pub fn position(&self, anchor: NaiveDateTime) -> Option<usize> {
        self.anchors.binary_search(&anchor).ok()
    }
}

#[derive(Deserialize)]
struct RawGrid {
    start: NaiveDateTime,
    end: NaiveDateTime,
    step_seconds: i64,
    #[serde(default)]
    anchors: Option<Vec<NaiveDateTime>>,
}

impl TryFrom<RawGrid> for TimeGrid {
    type Error = SeatWatchError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let interval = TimeDelta::try_seconds(raw.step_seconds)
            .ok_or_else(|| SeatWatchError::Data(format!("step out of range: {}", raw.step_seconds)))?;
        let grid = Self::new(raw.start, raw.end, interval)?;
        if let Some(anchors) = raw.anchors
            && anchors != grid.anchors
        {
            return Err(SeatWatchError::Data(
                "anchors do not match start, end and step".to_string(),
            ));
        }
        Ok(grid)
    }
}

fn to_delta(d: std::time::Duration, what: &str) -> Result<TimeDelta, SeatWatchError> {
    let delta = TimeDelta::from_std(d)
        .map_err(|_| SeatWatchError::planning(format!("{what} duration out of range")))?;
    if delta <= TimeDelta::zero() {
        return Err(SeatWatchError::planning(format!("{what} must be positive")));
    }
    Ok(delta)
}

fn earliest_opening(areas: &[Area]) -> Result<NaiveTime, SeatWatchError> {
    areas
        .iter()
        .map(|a| a.opening)
        .min()
        .ok_or_else(|| SeatWatchError::planning("facility has no areas; cannot derive opening time"))
}

fn latest_closing(areas: &[Area]) -> Result<NaiveTime, SeatWatchError> {
    areas
        .iter()
        .map(|a| a.closing)
        .max()
        .ok_or_else(|| SeatWatchError::planning("facility has no areas; cannot derive closing time"))
}

/// Round `start` up to the next multiple of `minutes` past midnight, then add one
/// more unit so the first anchor never sits on a boundary already in progress.
///
/// `minutes` divides 60, so boundaries past midnight are also boundaries within
/// the hour.
fn align_start(start: NaiveDateTime, minutes: u32) -> Result<NaiveDateTime, SeatWatchError> {
    let unit = i64::from(minutes) * 60;
    let midnight = start.date().and_time(NaiveTime::MIN);
    let secs = i64::from(start.time().num_seconds_from_midnight());
    let mut units = secs / unit;
    if secs % unit != 0 || start.time().nanosecond() != 0 {
        units += 1;
    }
    midnight
        .checked_add_signed(TimeDelta::seconds((units + 1) * unit))
        .ok_or_else(|| SeatWatchError::planning("aligned start out of range"))
}
