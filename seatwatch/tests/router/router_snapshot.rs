use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use seatwatch::{FixedClock, GridConfig, SeatWatch, SeatWatchError};
use seatwatch_mock::{DEMO_FACILITY_ID, MockConnector, WindowBehavior};

use crate::helpers::{BRANCH, area, facility, seats, setup, t, utc};

#[tokio::test]
async fn snapshot_covers_today_and_tomorrow() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    ctrl.set_window(t(9, 30), WindowBehavior::Return(seats("Level 2", &["S1"])))
        .await;
    let tomorrow_anchor = t(9, 30) + TimeDelta::days(1);
    ctrl.set_window(tomorrow_anchor, WindowBehavior::Return(seats("Level 2", &["S2"])))
        .await;
    let sw = b.build().unwrap();

    let snap = sw.snapshot(BRANCH).await.unwrap();
    assert_eq!(snap.facility_id, BRANCH);

    // Default grid: aligned start 09:15 both days.
    assert_eq!(snap.today.start, t(9, 15));
    assert_eq!(snap.tomorrow.start, t(9, 15) + TimeDelta::days(1));
    assert!(snap.today.timeline("Level 2", "S1").is_some());
    assert!(snap.today.timeline("Level 2", "S2").is_none());
    assert!(snap.tomorrow.timeline("Level 2", "S2").is_some());

    assert_eq!(ctrl.facility_calls(), 1);
    assert_eq!(ctrl.queries().await.len(), 6);
}

#[tokio::test]
async fn snapshot_fails_if_either_day_fails() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    ctrl.set_window(
        t(9, 45) + TimeDelta::days(1),
        WindowBehavior::Fail(SeatWatchError::Data("schema".into())),
    )
    .await;
    let sw = b.build().unwrap();

    let err = sw.snapshot(BRANCH).await.unwrap_err();
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn snapshot_ignores_tomorrow_flag_in_configured_grid() {
    let (b, _ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    let sw = b
        .grid(GridConfig {
            tomorrow: true,
            ..GridConfig::default()
        })
        .build()
        .unwrap();

    let snap = sw.snapshot(BRANCH).await.unwrap();
    assert_eq!(snap.today.start.date(), t(0, 0).date());
    assert_eq!(snap.tomorrow.start.date(), t(0, 0).date() + TimeDelta::days(1));
}

#[tokio::test]
async fn cached_directory_is_reused_across_runs() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    let sw = b.facility_cache(Duration::from_secs(3600)).build().unwrap();

    sw.snapshot(BRANCH).await.unwrap();
    sw.snapshot(BRANCH).await.unwrap();
    sw.today(BRANCH).await.unwrap();
    assert_eq!(ctrl.facility_calls(), 1);
    assert_eq!(sw.connector_name(), "dyn");
}

#[tokio::test]
async fn demo_connector_snapshot() {
    let sw = SeatWatch::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .clock(Arc::new(FixedClock(utc(1, 0))))
        .time_zone(chrono_tz::UTC)
        .build()
        .unwrap();

    let snap = sw.snapshot(DEMO_FACILITY_ID).await.unwrap();
    assert!(!snap.today.is_empty());
    assert_eq!(snap.today.areas.len(), 3);
    // The reading room never reports a free seat.
    assert!(snap.today.areas[2].seats.is_empty());
    assert!(snap.today.seats().all(|(_, tl)| tl.len() == snap.today.grid.len()));
}
