use chrono::{NaiveDateTime, NaiveTime, Timelike};
use seatwatch_core::{Area, AvailableSeat, Facility, WindowResult};

pub const DEMO_FACILITY_ID: u32 = 22;
pub const CLOSED_FACILITY_ID: u32 = 99;

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

pub fn facilities() -> Vec<Facility> {
    vec![
        Facility {
            id: DEMO_FACILITY_ID,
            name: "Central Library".into(),
            areas: vec![
                Area {
                    name: "Study Area".into(),
                    floor: Some("2".into()),
                    opening: hm(9, 0),
                    closing: hm(21, 0),
                },
                Area {
                    name: "Quiet Zone".into(),
                    floor: Some("5".into()),
                    opening: hm(10, 0),
                    closing: hm(18, 0),
                },
                Area {
                    name: "Reading Room".into(),
                    floor: Some("7".into()),
                    opening: hm(10, 0),
                    closing: hm(17, 0),
                },
            ],
        },
        Facility {
            id: CLOSED_FACILITY_ID,
            name: "Annex (renovation)".into(),
            areas: Vec::new(),
        },
    ]
}

/// Seats per area in the demo facility. The reading room never has free seats.
const SEATS: &[(&str, &str, &[&str])] = &[
    ("Study Area", "2", &["S01", "S02", "S03", "S04", "S05", "S06"]),
    ("Quiet Zone", "5", &["Q1", "Q2", "Q3"]),
];

/// Deterministic availability: a seat is free in a window when its index and the
/// window's quarter-hour slot do not collide modulo a per-area period.
pub fn window(anchor: NaiveDateTime) -> WindowResult {
    let slot = anchor.hour() * 4 + anchor.minute() / 15;
    let mut seats = Vec::new();
    for (area_idx, (area, floor, names)) in SEATS.iter().enumerate() {
        let period = 3 + u32::try_from(area_idx).unwrap_or(0);
        for (i, name) in names.iter().enumerate() {
            let i = u32::try_from(i).unwrap_or(0);
            if (slot + i) % period != 0 {
                seats.push(AvailableSeat {
                    area: (*area).to_string(),
                    floor: Some((*floor).to_string()),
                    seat: (*name).to_string(),
                });
            }
        }
    }
    WindowResult::new(seats)
}
