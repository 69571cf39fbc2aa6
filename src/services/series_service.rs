use chrono::{DateTime, Utc};
use tracing::warn;

use crate::api::wemix::ChartResponse;
use crate::models::PricePoint;

/// Extract the price series from a fetched payload.
///
/// Returns an empty series when there is no payload or its `Result` code is
/// not the success sentinel. Upstream order is kept as delivered.
pub fn parse_series(payload: Option<&ChartResponse>) -> Vec<PricePoint> {
    let payload = match payload {
        Some(p) => p,
        None => return Vec::new(),
    };

    if !payload.is_success() {
        warn!("Error in data: upstream returned Result={}", payload.result);
        return Vec::new();
    }

    payload
        .entries()
        .iter()
        .filter_map(|entry| match DateTime::<Utc>::from_timestamp(entry.t, 0) {
            Some(timestamp) => Some(PricePoint::new(timestamp, entry.p)),
            None => {
                warn!("Skipping chart entry with out-of-range timestamp {}", entry.t);
                None
            }
        })
        .collect()
}
