// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use seatwatch::{Area, AvailableSeat, Facility, FixedClock, RetryConfig, SeatWatch, SeatWatchBuilder, WindowResult};
use seatwatch_mock::{DynamicMockConnector, DynamicMockController};

pub const BRANCH: u32 = 22;

/// Calendar day every test runs on.
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
}

/// Facility-local timestamp on the test day.
pub fn t(h: u32, m: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, 0).expect("valid time")
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

/// A UTC instant equal to facility-local `h:m` on the test day (tests run in UTC).
pub fn utc(h: u32, m: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&t(h, m))
}

pub fn area(name: &str, open: (u32, u32), close: (u32, u32)) -> Area {
    Area {
        name: name.to_string(),
        floor: None,
        opening: hm(open.0, open.1),
        closing: hm(close.0, close.1),
    }
}

pub fn area_on(name: &str, floor: &str, open: (u32, u32), close: (u32, u32)) -> Area {
    Area {
        floor: Some(floor.to_string()),
        ..area(name, open, close)
    }
}

pub fn facility(areas: Vec<Area>) -> Facility {
    Facility {
        id: BRANCH,
        name: "Test Branch".to_string(),
        areas,
    }
}

/// Window result listing `seats` of `area_name` as available.
pub fn seats(area_name: &str, names: &[&str]) -> WindowResult {
    WindowResult::new(names.iter().map(|s| AvailableSeat {
        area: area_name.to_string(),
        floor: Some("2".to_string()),
        seat: (*s).to_string(),
    }))
}

/// Window result listing `seats` of `area_name` on `floor` as available.
pub fn seats_on(area_name: &str, floor: &str, names: &[&str]) -> WindowResult {
    WindowResult::new(names.iter().map(|s| AvailableSeat {
        area: area_name.to_string(),
        floor: Some(floor.to_string()),
        seat: (*s).to_string(),
    }))
}

/// Builder preconfigured with a fixed clock at `now`, UTC hours and no retry jitter.
pub fn builder_at(connector: Arc<DynamicMockConnector>, now: DateTime<Utc>) -> SeatWatchBuilder {
    SeatWatch::builder()
        .with_connector(connector)
        .clock(Arc::new(FixedClock(now)))
        .time_zone(chrono_tz::UTC)
        .retry(RetryConfig {
            jitter_percent: 0,
            ..RetryConfig::default()
        })
}

/// Dynamic mock serving `facilities` plus an orchestrator built on it.
pub async fn setup(
    facilities: Vec<Facility>,
    now: DateTime<Utc>,
) -> (SeatWatchBuilder, DynamicMockController) {
    let (conn, ctrl) = DynamicMockConnector::new_with_controller("dyn");
    ctrl.set_facilities(facilities).await;
    (builder_at(conn, now), ctrl)
}
