//! Chart models

use chrono::{DateTime, Utc};

/// A single data point on a price chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Which side of the threshold a segment is drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Below,
    Above,
}

/// A straight line between two points, colored by side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: PricePoint,
    pub end: PricePoint,
    pub side: Side,
}
