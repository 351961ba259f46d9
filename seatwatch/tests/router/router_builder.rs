use std::sync::Arc;
use std::time::Duration;

use seatwatch::{SeatWatch, SeatWatchError};
use seatwatch_core::connector::SeatConnector;
use seatwatch_mock::{DEMO_FACILITY_ID, MockConnector};

use crate::helpers::{BRANCH, area, facility, setup, utc};

struct DirectoryOnly;

impl SeatConnector for DirectoryOnly {
    fn name(&self) -> &'static str {
        "directory-only"
    }
}

#[test]
fn build_requires_a_connector() {
    let err = SeatWatch::builder().build().err().unwrap();
    assert!(matches!(err, SeatWatchError::InvalidArg(_)));
}

#[test]
fn build_rejects_zero_concurrency_and_timeout() {
    let mk = || SeatWatch::builder().with_connector(Arc::new(MockConnector::new()));
    assert!(matches!(
        mk().max_concurrency(Some(0)).build().err().unwrap(),
        SeatWatchError::InvalidArg(_)
    ));
    assert!(matches!(
        mk().request_timeout(Duration::ZERO).build().err().unwrap(),
        SeatWatchError::InvalidArg(_)
    ));
    assert!(mk().max_concurrency(None).build().is_ok());
}

#[test]
fn builder_knobs_land_in_config() {
    let sw = SeatWatch::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .max_concurrency(Some(3))
        .request_timeout(Duration::from_secs(2))
        .run_timeout(Some(Duration::from_secs(30)))
        .time_zone(chrono_tz::Europe::London)
        .build()
        .unwrap();
    let cfg = sw.config();
    assert_eq!(cfg.max_concurrency, Some(3));
    assert_eq!(cfg.request_timeout, Duration::from_secs(2));
    assert_eq!(cfg.run_timeout, Some(Duration::from_secs(30)));
    assert_eq!(cfg.time_zone, chrono_tz::Europe::London);
    assert_eq!(sw.connector_name(), "seatwatch-mock");
}

#[tokio::test]
async fn missing_capabilities_are_unsupported() {
    let sw = SeatWatch::builder()
        .with_connector(Arc::new(DirectoryOnly))
        .build()
        .unwrap();
    let err = sw.facilities().await.unwrap_err();
    assert!(matches!(err, SeatWatchError::Unsupported { ref capability } if capability == "facilities"));
}

#[tokio::test]
async fn unknown_facility_is_not_found() {
    let (b, ctrl) = setup(vec![facility(vec![area("Level 2", (9, 0), (10, 0))])], utc(6, 0)).await;
    let sw = b.build().unwrap();

    let err = sw.today(BRANCH + 1).await.unwrap_err();
    assert!(matches!(err, SeatWatchError::NotFound { .. }), "{err:?}");
    assert!(ctrl.queries().await.is_empty());
}

#[tokio::test]
async fn directory_lists_mock_facilities() {
    let sw = SeatWatch::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    let all = sw.facilities().await.unwrap();
    assert!(all.iter().any(|f| f.id == DEMO_FACILITY_ID));
    assert_eq!(sw.facility(DEMO_FACILITY_ID).await.unwrap().areas.len(), 3);
}
