use seatwatch_core::connector::SeatConnector;
use std::sync::Arc;

#[must_use]
pub fn get_connector() -> Arc<dyn SeatConnector> {
    if std::env::var("SEATWATCH_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(seatwatch_mock::MockConnector::new())
    } else {
        Arc::new(seatwatch_nlb::NlbConnector::new_default())
    }
}

/// Facility to query: first CLI argument, else the demo branch.
#[allow(dead_code)]
#[must_use]
pub fn facility_arg() -> u32 {
    std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(seatwatch_mock::DEMO_FACILITY_ID)
}
