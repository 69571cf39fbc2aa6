use serde::Deserialize;
use thiserror::Error;

/// Top-level price-chart payload. `Result == 0` means success.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    #[serde(rename = "Result")]
    pub result: i64,
    #[serde(default)]
    pub data: Option<ChartData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub chart: Vec<ChartEntry>,
}

/// One sample: epoch seconds and price
#[derive(Debug, Clone, Deserialize)]
pub struct ChartEntry {
    pub t: i64,
    pub p: f64,
}

impl ChartResponse {
    pub const SUCCESS: i64 = 0;

    pub fn is_success(&self) -> bool {
        self.result == Self::SUCCESS
    }

    /// Chart entries, empty when the payload carries no data block
    pub fn entries(&self) -> &[ChartEntry] {
        self.data.as_ref().map(|d| d.chart.as_slice()).unwrap_or(&[])
    }
}

/// Errors from the price API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-200 status
    #[error("HTTP Error ({0}): {1}")]
    Status(u16, String),
    /// Network/request error, including timeouts
    #[error("Request Error: {0}")]
    Request(String),
    /// Body did not match the expected shape
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
}
