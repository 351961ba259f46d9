use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;

use crate::types::{Area, WindowResult};
use seatwatch_types::SeatWatchError;

/// Witness lists for every seat of one area.
///
/// Each list holds the anchors at which the seat was reported available, in
/// ascending order without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaWitnesses {
    /// Area name.
    pub name: String,
    /// Floor designator, from metadata or the first result that reported one.
    pub floor: Option<String>,
    /// Seat name to ascending witness anchors.
    pub seats: BTreeMap<String, Vec<NaiveDateTime>>,
}

/// Sequential fold of window results into per-seat witness lists.
///
/// Results must be fed in ascending anchor order; that is what keeps every
/// witness list sorted without a final sort. An anchor earlier than the last one
/// observed is rejected. Repeating the latest anchor is allowed so a connector may
/// split one window into several partial results.
///
/// Only areas known up front are reported. An area is identified by its name and
/// floor, since a branch may reuse one name on several floors. A seat whose floor
/// matches no area of that name still lands in the area when the name is unique.
/// Seats naming any other area are counted in
/// [`SeatAggregator::unknown_area_seats`] and otherwise dropped.
#[derive(Debug, Clone)]
pub struct SeatAggregator {
    areas: Vec<AreaWitnesses>,
    index: HashMap<(String, Option<String>), usize>,
    by_name: HashMap<String, Vec<usize>>,
    last: Option<NaiveDateTime>,
    unknown_area_seats: usize,
}

impl SeatAggregator {
    /// Start an aggregation over the given facility areas.
    #[must_use]
    pub fn new(areas: &[Area]) -> Self {
        let mut out = Self {
            areas: Vec::with_capacity(areas.len()),
            index: HashMap::with_capacity(areas.len()),
            by_name: HashMap::with_capacity(areas.len()),
            last: None,
            unknown_area_seats: 0,
        };
        for a in areas {
            let key = (a.name.clone(), a.floor.clone());
            if out.index.contains_key(&key) {
                continue;
            }
            let i = out.areas.len();
            out.index.insert(key, i);
            out.by_name.entry(a.name.clone()).or_default().push(i);
            out.areas.push(AreaWitnesses {
                name: a.name.clone(),
                floor: a.floor.clone(),
                seats: BTreeMap::new(),
            });
        }
        out
    }

    /// Record every seat in `result` as witnessed at `anchor`.
    ///
    /// # Errors
    /// Returns `OutOfOrder` if `anchor` precedes an anchor already observed; the
    /// aggregation state is left untouched in that case.
    pub fn observe(
        &mut self,
        anchor: NaiveDateTime,
        result: &WindowResult,
    ) -> Result<(), SeatWatchError> {
        if let Some(last) = self.last
            && anchor < last
        {
            return Err(SeatWatchError::OutOfOrder { anchor, last });
        }
        self.last = Some(anchor);

        for s in &result.seats {
            let Some(i) = self.area_of(&s.area, s.floor.as_ref()) else {
                self.unknown_area_seats += 1;
                continue;
            };
            let area = &mut self.areas[i];
            if area.floor.is_none() {
                area.floor.clone_from(&s.floor);
            }
            let witnesses = area.seats.entry(s.seat.clone()).or_default();
            if witnesses.last() != Some(&anchor) {
                witnesses.push(anchor);
            }
        }
        Ok(())
    }

    fn area_of(&self, name: &str, floor: Option<&String>) -> Option<usize> {
        if let Some(&i) = self.index.get(&(name.to_string(), floor.cloned())) {
            return Some(i);
        }
        match self.by_name.get(name).map(Vec::as_slice) {
            Some(&[i]) => Some(i),
            _ => None,
        }
    }

    /// Latest anchor observed so far.
    #[must_use]
    pub const fn last_anchor(&self) -> Option<NaiveDateTime> {
        self.last
    }

    /// Number of seat reports dropped because their area is not in the facility metadata.
    #[must_use]
    pub const fn unknown_area_seats(&self) -> usize {
        self.unknown_area_seats
    }

    /// Freeze the aggregation, yielding areas in metadata order.
    #[must_use]
    pub fn finish(self) -> Vec<AreaWitnesses> {
        #[cfg(feature = "tracing")]
        {
            if self.unknown_area_seats > 0 {
                tracing::debug!(
                    dropped = self.unknown_area_seats,
                    "ignored seats reported for areas missing from facility metadata"
                );
            }
        }
        self.areas
    }
}
