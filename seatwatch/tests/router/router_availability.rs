use seatwatch::{GridConfig, SeatWatchError};
use seatwatch_mock::WindowBehavior;

use crate::helpers::{BRANCH, area, area_on, facility, hm, seats, seats_on, setup, t, utc};

fn plain() -> GridConfig {
    GridConfig {
        truncate_start: false,
        align_start_minute: None,
        ..GridConfig::default()
    }
}

#[tokio::test]
async fn end_to_end_level_two_seat() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (18, 0))])], utc(6, 0)).await;
    ctrl.set_window(t(9, 0), WindowBehavior::Return(seats("Level 2", &["S1"])))
        .await;
    ctrl.set_window(t(9, 15), WindowBehavior::Return(seats("Level 2", &["S1"])))
        .await;
    let sw = b.build().unwrap();

    let rec = sw.availability(BRANCH, &plain()).await.unwrap();

    assert_eq!(rec.start, t(9, 0));
    assert_eq!(rec.end, t(18, 0));
    assert_eq!(rec.grid.len(), 36);
    assert_eq!(ctrl.queries().await.len(), 36);

    let s1 = rec.timeline("Level 2", "S1").unwrap();
    assert_eq!(s1.len(), 36);
    assert_eq!(&s1.slots()[..4], &[true, true, true, false]);
    assert_eq!(s1.available_slots(), 3);

    let only = &rec.areas[0].seats[0];
    assert_eq!(only.witnesses, 2);
    assert_eq!(rec.areas[0].floor.as_deref(), Some("2"));
}

#[tokio::test]
async fn every_query_uses_the_window_duration() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    let sw = b.build().unwrap();
    sw.availability(BRANCH, &plain()).await.unwrap();

    let qs = ctrl.queries().await;
    assert_eq!(qs.len(), 4);
    assert!(qs.iter().all(|q| q.facility_id == BRANCH && q.duration_minutes() == 30));
}

#[tokio::test]
async fn area_without_seats_has_no_entries() {
    let (b, ctrl) = setup(
        vec![facility(vec![
            area("Level 2", (9, 0), (10, 0)),
            area("Level 7", (9, 0), (10, 0)),
        ])],
        utc(6, 0),
    )
    .await;
    ctrl.set_window(t(9, 30), WindowBehavior::Return(seats("Level 2", &["B", "A"])))
        .await;
    let sw = b.build().unwrap();

    let rec = sw.availability(BRANCH, &plain()).await.unwrap();
    assert_eq!(rec.areas.len(), 2);
    assert_eq!(rec.areas[1].name, "Level 7");
    assert!(rec.areas[1].seats.is_empty());
    let names: Vec<&str> = rec.seats().map(|(k, _)| k.seat.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
}

#[tokio::test]
async fn seats_in_unknown_areas_are_dropped() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    ctrl.set_window(t(9, 0), WindowBehavior::Return(seats("Basement", &["X1"])))
        .await;
    let sw = b.build().unwrap();

    let rec = sw.availability(BRANCH, &plain()).await.unwrap();
    assert!(rec.is_empty());
    assert_eq!(rec.areas.len(), 1);
    assert!(rec.timeline("Basement", "X1").is_none());
}

#[tokio::test]
async fn truncation_and_alignment_follow_the_clock() {
    // 10:07 local: clamp to now, round up to 10:15, then one more unit.
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (11, 0))])], utc(10, 7)).await;
    let sw = b.build().unwrap();

    let rec = sw.today(BRANCH).await.unwrap();
    assert_eq!(rec.start, t(10, 30));
    assert_eq!(rec.grid.anchors(), &[t(10, 30), t(10, 45)]);
    assert_eq!(ctrl.queries().await.len(), 2);
}

#[tokio::test]
async fn after_closing_is_empty_and_offline() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (18, 0))])], utc(19, 0)).await;
    let sw = b.build().unwrap();

    let rec = sw.today(BRANCH).await.unwrap();
    assert!(rec.grid.is_empty());
    assert!(rec.is_empty());
    assert_eq!(rec.areas.len(), 1);
    assert!(ctrl.queries().await.is_empty());
}

#[tokio::test]
async fn facility_without_areas() {
    let (b, ctrl) = setup(vec![facility(Vec::new())], utc(6, 0)).await;
    let sw = b.build().unwrap();

    // Bounds cannot be derived from zero areas.
    let err = sw.availability(BRANCH, &plain()).await.unwrap_err();
    assert!(matches!(err, SeatWatchError::Planning(_)), "{err:?}");

    // With explicit bounds there is simply nothing to ask for.
    let bounded = GridConfig {
        start: Some(hm(9, 0)),
        end: Some(hm(12, 0)),
        ..plain()
    };
    let rec = sw.availability(BRANCH, &bounded).await.unwrap();
    assert!(rec.is_empty());
    assert!(rec.areas.is_empty());
    assert!(ctrl.queries().await.is_empty());
}

#[tokio::test]
async fn invalid_grid_fails_before_any_query() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    let sw = b.build().unwrap();

    let narrow = GridConfig {
        window: std::time::Duration::from_secs(5 * 60),
        ..plain()
    };
    let err = sw.availability(BRANCH, &narrow).await.unwrap_err();
    assert!(matches!(err, SeatWatchError::Planning(_)), "{err:?}");
    assert!(ctrl.queries().await.is_empty());
}

#[tokio::test]
async fn tomorrow_is_planned_on_the_next_day() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(19, 0)).await;
    let sw = b.build().unwrap();

    let rec = sw.tomorrow(BRANCH).await.unwrap();
    let next = t(9, 30) + chrono::TimeDelta::days(1);
    assert_eq!(rec.start, t(9, 15) + chrono::TimeDelta::days(1));
    assert_eq!(rec.grid.anchors()[1], next);
    assert_eq!(ctrl.queries().await.len(), 3);
}

#[tokio::test]
async fn fetch_windows_returns_anchor_ordered_pairs() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    ctrl.set_window(t(9, 45), WindowBehavior::Return(seats("Level 2", &["S9"])))
        .await;
    let sw = b.build().unwrap();

    let grid = seatwatch::TimeGrid::new(t(9, 0), t(10, 0), chrono::TimeDelta::minutes(15)).unwrap();
    let pairs = sw
        .fetch_windows(BRANCH, &grid, chrono::TimeDelta::minutes(30))
        .await
        .unwrap();
    let anchors: Vec<_> = pairs.iter().map(|(a, _)| *a).collect();
    assert_eq!(anchors, grid.anchors());
    assert_eq!(pairs[3].1.seats[0].seat, "S9");
    assert!(pairs[0].1.is_empty());
}

#[tokio::test]
async fn same_area_name_on_two_floors_is_reported_separately() {
    let study = || {
        vec![
            area_on("Study Area", "3", (9, 0), (10, 0)),
            area_on("Study Area", "5", (9, 0), (10, 0)),
            area_on("Study Area", "3", (9, 0), (10, 0)),
        ]
    };
    let (b, ctrl) = setup(vec![facility(study())], utc(6, 0)).await;
    ctrl.set_window(t(9, 0), WindowBehavior::Return(seats_on("Study Area", "3", &["S1"])))
        .await;
    ctrl.set_window(t(9, 30), WindowBehavior::Return(seats_on("Study Area", "5", &["S1"])))
        .await;
    let sw = b.build().unwrap();

    let rec = sw.availability(BRANCH, &plain()).await.unwrap();
    assert_eq!(rec.areas.len(), 2);
    assert_eq!(
        rec.timeline_on("Study Area", Some("3"), "S1").unwrap().slots(),
        &[true, true, false, false]
    );
    assert_eq!(
        rec.timeline_on("Study Area", Some("5"), "S1").unwrap().slots(),
        &[false, false, true, true]
    );
    let floors: Vec<Option<&str>> = rec.seats().map(|(k, _)| k.floor.as_deref()).collect();
    assert_eq!(floors, [Some("3"), Some("5")]);

    let no_slots = GridConfig {
        start: Some(hm(9, 0)),
        end: Some(hm(9, 0)),
        ..plain()
    };
    let empty = sw.availability_for(&facility(study()), &no_slots).await.unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.areas.len(), 2);
}
