//! Domain types exchanged between connectors, the planner, and the orchestrator.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use seatwatch_types::SeatWatchError;
use serde::{Deserialize, Serialize};

use crate::grid::TimeGrid;
use crate::timeline::aggregate::SeatAggregator;
use crate::timeline::reconstruct::reconstruct;

/// A bookable area inside a facility, with its daily opening hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Area name as reported by the booking service.
    pub name: String,
    /// Floor designator, when the directory provides one.
    pub floor: Option<String>,
    /// Opening time-of-day.
    pub opening: NaiveTime,
    /// Closing time-of-day.
    pub closing: NaiveTime,
}

/// A facility (e.g. a library branch) and the areas it exposes for booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    /// Identifier used by the windowed availability query.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Bookable areas.
    pub areas: Vec<Area>,
}

/// One windowed availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowQuery {
    /// Facility being queried.
    pub facility_id: u32,
    /// Anchor timestamp (facility-local) where the window starts.
    pub anchor: NaiveDateTime,
    /// Span of the window.
    pub duration: TimeDelta,
}

impl WindowQuery {
    /// Window span in whole minutes, as the booking API expects it.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.duration.num_minutes()
    }
}

/// A seat reported available at some point during a window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailableSeat {
    /// Area name.
    pub area: String,
    /// Floor designator of the area, when reported.
    pub floor: Option<String>,
    /// Seat name, unique within its area.
    pub seat: String,
}

/// The booking service's answer to one [`WindowQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowResult {
    /// Seats available at some point during the window.
    pub seats: Vec<AvailableSeat>,
}

impl WindowResult {
    /// Build a result from an iterator of available seats.
    pub fn new(seats: impl IntoIterator<Item = AvailableSeat>) -> Self {
        Self {
            seats: seats.into_iter().collect(),
        }
    }

    /// True when no seat was available during the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

/// Identity of a seat within one reconstruction run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatKey {
    /// Area name.
    pub area: String,
    /// Floor of the area; tells apart areas sharing a name.
    pub floor: Option<String>,
    /// Seat name.
    pub seat: String,
}

impl SeatKey {
    /// Construct a key from area, floor, and seat.
    pub fn new(area: impl Into<String>, floor: Option<String>, seat: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            floor,
            seat: seat.into(),
        }
    }
}

/// Dense per-slot availability for one seat, aligned one-to-one with the grid anchors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline(Vec<bool>);

impl Timeline {
    /// Wrap a dense slot sequence.
    #[must_use]
    pub const fn new(slots: Vec<bool>) -> Self {
        Self(slots)
    }

    /// Slot values in anchor order.
    #[must_use]
    pub fn slots(&self) -> &[bool] {
        &self.0
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a timeline over an empty grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Availability at slot `i`, if the slot exists.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<bool> {
        self.0.get(i).copied()
    }

    /// Number of slots marked available.
    #[must_use]
    pub fn available_slots(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    /// Consume into the raw slot vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }
}

impl From<Vec<bool>> for Timeline {
    fn from(v: Vec<bool>) -> Self {
        Self(v)
    }
}

/// Reconstructed timeline of a single seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatTimeline {
    /// Seat identity.
    pub key: SeatKey,
    /// Number of distinct anchors at which the seat was seen available.
    pub witnesses: usize,
    /// Decoded per-slot availability.
    pub timeline: Timeline,
}

/// All reconstructed seats of one area, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaReport {
    /// Area name.
    pub name: String,
    /// Floor designator, when known.
    pub floor: Option<String>,
    /// Seats ordered by witness count (fewest first), then by seat name.
    pub seats: Vec<SeatTimeline>,
}

/// Outcome of one reconstruction run.
///
/// Deserialization checks that the bounds match the grid and that every timeline
/// has one slot per anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawReconstruction")]
pub struct Reconstruction {
    /// Resolved first anchor (after truncation and alignment).
    pub start: NaiveDateTime,
    /// Resolved exclusive end.
    pub end: NaiveDateTime,
    /// Anchor grid every timeline is aligned to.
    pub grid: TimeGrid,
    /// Per-area results, in facility metadata order.
    pub areas: Vec<AreaReport>,
}

impl Reconstruction {
    /// An empty result over `grid`: every known area is listed without seats.
    ///
    /// Areas are de-duplicated by name and floor, as in a fetched run.
    #[must_use]
    pub fn empty(grid: TimeGrid, areas: &[Area]) -> Self {
        Self {
            start: grid.start(),
            end: grid.end(),
            areas: reconstruct(&grid, SeatAggregator::new(areas).finish()),
            grid,
        }
    }

    /// The ordered `(area, seat) -> timeline` collection.
    pub fn seats(&self) -> impl Iterator<Item = (&SeatKey, &Timeline)> {
        self.areas
            .iter()
            .flat_map(|a| a.seats.iter().map(|s| (&s.key, &s.timeline)))
    }

    /// Look up the timeline of one seat.
    #[must_use]
    pub fn timeline(&self, area: &str, seat: &str) -> Option<&Timeline> {
        self.areas
            .iter()
            .filter(|a| a.name == area)
            .flat_map(|a| a.seats.iter())
            .find(|s| s.key.seat == seat)
            .map(|s| &s.timeline)
    }

    /// Look up the timeline of one seat in the area `area` on `floor`.
    #[must_use]
    pub fn timeline_on(&self, area: &str, floor: Option<&str>, seat: &str) -> Option<&Timeline> {
        self.areas
            .iter()
            .filter(|a| a.name == area && a.floor.as_deref() == floor)
            .flat_map(|a| a.seats.iter())
            .find(|s| s.key.seat == seat)
            .map(|s| &s.timeline)
    }

    /// Total number of reconstructed seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.areas.iter().map(|a| a.seats.len()).sum()
    }

    /// True when no seat was reconstructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seat_count() == 0
    }
}

#[derive(Deserialize)]
struct RawReconstruction {
    start: NaiveDateTime,
    end: NaiveDateTime,
    grid: TimeGrid,
    areas: Vec<AreaReport>,
}

impl TryFrom<RawReconstruction> for Reconstruction {
    type Error = SeatWatchError;

    fn try_from(raw: RawReconstruction) -> Result<Self, Self::Error> {
        if raw.start != raw.grid.start() || raw.end != raw.grid.end() {
            return Err(SeatWatchError::Data(
                "reconstruction bounds differ from its grid".to_string(),
            ));
        }
        let slots = raw.grid.len();
        if let Some(s) = raw
            .areas
            .iter()
            .flat_map(|a| a.seats.iter())
            .find(|s| s.timeline.len() != slots)
        {
            return Err(SeatWatchError::Data(format!(
                "timeline of seat {} has {} slots, grid has {slots}",
                s.key.seat,
                s.timeline.len()
            )));
        }
        Ok(Self {
            start: raw.start,
            end: raw.end,
            grid: raw.grid,
            areas: raw.areas,
        })
    }
}

/// Today's and tomorrow's reconstructions for one facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Facility the snapshot was taken for.
    pub facility_id: u32,
    /// Reconstruction planned on today's date.
    pub today: Reconstruction,
    /// Reconstruction planned on tomorrow's date.
    pub tomorrow: Reconstruction,
}
