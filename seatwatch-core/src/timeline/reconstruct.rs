//! Rebuild per-slot seat availability from overlapping window observations.
//!
//! The booking service only answers for windows at least as long as a booking
//! (e.g. 30 minutes) while anchors are placed every grid interval (e.g. 15 minutes),
//! so consecutive windows overlap. A window flag is therefore the OR of the seat's
//! true availability over that slot and the following one.
//!
//! [`densify`] turns a sparse witness list into one flag per anchor and [`decode`]
//! spreads each flag back over both slots it may have come from. The result leans
//! toward reporting availability. One loss is accepted and must stay bit-for-bit
//! stable across releases: a seat free only in the very first slot of the grid
//! (`[t, f, ...]`) is observed as `[f, f, ...]` and stays unavailable.

use crate::grid::TimeGrid;
use crate::timeline::aggregate::AreaWitnesses;
use crate::types::{AreaReport, SeatKey, SeatTimeline, Timeline};

/// Expand the sorted witness subsequence `ys` of `xs` into one flag per element of
/// `xs`: slot `i` is `true` iff `xs[i]` is in `ys`.
///
/// Both inputs must be ascending. Elements of `ys` that do not occur in `xs` are
/// ignored.
#[must_use]
pub fn densify<T: Ord>(xs: &[T], ys: &[T]) -> Vec<bool> {
    let mut out = Vec::with_capacity(xs.len());
    let mut ys = ys.iter().peekable();
    for x in xs {
        while ys.next_if(|y| *y < x).is_some() {}
        out.push(ys.next_if(|y| *y == x).is_some());
    }
    out
}

/// OR every window flag with the one before it; the slot before the grid counts
/// as unavailable.
#[must_use]
pub fn decode(bs: &[bool]) -> Vec<bool> {
    let mut prev = false;
    bs.iter()
        .map(|&b| {
            let out = prev || b;
            prev = b;
            out
        })
        .collect()
}

/// Build every seat's timeline over `grid`.
///
/// Within an area, seats are ordered by number of witnesses (fewest first), then
/// by seat name.
#[must_use]
pub fn reconstruct(grid: &TimeGrid, areas: Vec<AreaWitnesses>) -> Vec<AreaReport> {
    let anchors = grid.anchors();
    areas
        .into_iter()
        .map(|area| {
            let mut seats: Vec<SeatTimeline> = area
                .seats
                .into_iter()
                .map(|(seat, witnesses)| SeatTimeline {
                    timeline: Timeline::new(decode(&densify(anchors, &witnesses))),
                    witnesses: witnesses.len(),
                    key: SeatKey::new(area.name.clone(), area.floor.clone(), seat),
                })
                .collect();
            seats.sort_by(|a, b| {
                a.witnesses
                    .cmp(&b.witnesses)
                    .then_with(|| a.key.seat.cmp(&b.key.seat))
            });
            AreaReport {
                name: area.name,
                floor: area.floor,
                seats,
            }
        })
        .collect()
}
