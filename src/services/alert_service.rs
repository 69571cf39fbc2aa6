use crate::models::{AlertResult, PricePoint};

/// Arithmetic mean of the prices, 0 for an empty slice
pub fn calculate_average(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    prices.iter().sum::<f64>() / prices.len() as f64
}

/// Compare the average price of the series with `threshold` (inclusive)
pub fn check_average_price(points: &[PricePoint], threshold: f64) -> AlertResult {
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    let average_price = calculate_average(&prices);

    AlertResult {
        exceeded: average_price >= threshold,
        average_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn points(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(DateTime::<Utc>::from_timestamp(i as i64, 0).unwrap(), *p))
            .collect()
    }

    #[test]
    fn test_average_at_threshold_is_exceeded() {
        let result = check_average_price(&points(&[0.7, 0.8, 0.75]), 0.75);

        assert!((result.average_price - 0.75).abs() < 1e-12);
        assert_eq!(format!("{:.7}", result.average_price), "0.7500000");
        // 0.7 + 0.8 + 0.75 sums exactly to 2.25 in f64
        assert!(result.exceeded);
    }

    #[test]
    fn test_empty_is_zero_and_not_exceeded() {
        let result = check_average_price(&[], 0.75);

        assert_eq!(result.average_price, 0.0);
        assert!(!result.exceeded);
    }

    #[test]
    fn test_below_threshold() {
        let result = check_average_price(&points(&[0.5, 0.6]), 0.75);

        assert!((result.average_price - 0.55).abs() < 1e-12);
        assert!(!result.exceeded);
    }
}
