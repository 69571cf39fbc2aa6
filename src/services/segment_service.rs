use chrono::Duration;

use crate::models::{PricePoint, Segment, Side};

/// Split the series into drawable segments colored against `threshold`.
///
/// Each consecutive pair gives one segment when both prices sit on the same
/// side (`>= threshold` counts as above), or two segments split at the
/// interpolated crossing. The part before the crossing is always `Below` and
/// the part after it always `Above`, whichever way the price moves.
pub fn segment_series(points: &[PricePoint], threshold: f64) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(points.len().saturating_sub(1));

    for pair in points.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);

        if prev.price < threshold && curr.price < threshold {
            segments.push(Segment { start: prev, end: curr, side: Side::Below });
        } else if prev.price >= threshold && curr.price >= threshold {
            segments.push(Segment { start: prev, end: curr, side: Side::Above });
        } else {
            let crossing = crossing_point(prev, curr, threshold);
            segments.push(Segment { start: prev, end: crossing, side: Side::Below });
            segments.push(Segment { start: crossing, end: curr, side: Side::Above });
        }
    }

    segments
}

/// Point between `prev` and `curr` where the linear interpolation equals `threshold`.
/// Only called when the two prices straddle the threshold, so they differ.
fn crossing_point(prev: PricePoint, curr: PricePoint, threshold: f64) -> PricePoint {
    let fraction = (threshold - prev.price) / (curr.price - prev.price);
    let span_ms = (curr.timestamp - prev.timestamp).num_milliseconds() as f64;
    let offset = Duration::milliseconds((span_ms * fraction).round() as i64);

    PricePoint::new(prev.timestamp + offset, threshold)
}
