use std::time::Duration;

use seatwatch::GridConfig;
use seatwatch_mock::WindowBehavior;

use crate::helpers::{BRANCH, area, facility, seats, setup, t, utc};

fn plain() -> GridConfig {
    GridConfig {
        truncate_start: false,
        align_start_minute: None,
        ..GridConfig::default()
    }
}

async fn delay_every_window(ctrl: &seatwatch_mock::DynamicMockController, hours: u32) {
    for h in 9..9 + hours {
        for m in [0, 15, 30, 45] {
            ctrl.set_window(
                t(h, m),
                WindowBehavior::Delay(Duration::from_millis(50), seats("Level 2", &["S1"])),
            )
            .await;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn in_flight_queries_never_exceed_bound() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (12, 0))])], utc(6, 0)).await;
    delay_every_window(&ctrl, 3).await;
    let sw = b.max_concurrency(Some(3)).build().unwrap();

    let rec = sw.availability(BRANCH, &plain()).await.unwrap();
    assert_eq!(rec.grid.len(), 12);
    assert_eq!(ctrl.peak_in_flight(), 3);
    assert_eq!(ctrl.queries().await.len(), 12);
}

#[tokio::test(start_paused = true)]
async fn single_flight_is_sequential() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    delay_every_window(&ctrl, 1).await;
    let sw = b.max_concurrency(Some(1)).build().unwrap();

    sw.availability(BRANCH, &plain()).await.unwrap();
    assert_eq!(ctrl.peak_in_flight(), 1);
    let order: Vec<_> = ctrl.queries().await.iter().map(|q| q.anchor).collect();
    assert_eq!(order, [t(9, 0), t(9, 15), t(9, 30), t(9, 45)]);
}

#[tokio::test(start_paused = true)]
async fn unbounded_fans_out_the_whole_grid() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (11, 0))])], utc(6, 0)).await;
    delay_every_window(&ctrl, 2).await;
    let sw = b.max_concurrency(None).build().unwrap();

    let rec = sw.availability(BRANCH, &plain()).await.unwrap();
    assert_eq!(ctrl.peak_in_flight(), rec.grid.len());
}
