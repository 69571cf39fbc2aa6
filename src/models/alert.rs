//! Average-price alert models

/// Result of comparing the average price with the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertResult {
    pub exceeded: bool,
    pub average_price: f64,
}
