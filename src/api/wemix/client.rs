use std::time::Duration;

use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::models::{ApiError, ChartResponse};

/// Client for the price-chart endpoint
#[derive(Debug, Clone)]
pub struct WemixClient {
    http_client: HttpClient,
    chart_url: String,
}

impl WemixClient {
    /// Create a client whose every request is bounded by `timeout`
    pub fn new(chart_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            chart_url,
        })
    }

    pub fn chart_url(&self) -> &str {
        &self.chart_url
    }

    /// GET the price chart, treating any failure as "no data"
    pub async fn fetch_chart(&self) -> Option<ChartResponse> {
        match self.try_fetch_chart().await {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!("Error fetching data from {}: {}", self.chart_url, e);
                None
            }
        }
    }

    /// GET the price chart
    ///
    /// # Returns
    /// * `Ok(ChartResponse)` - decoded payload, whatever its `Result` code
    /// * `Err(ApiError)` - non-200 status, transport failure or undecodable body
    pub async fn try_fetch_chart(&self) -> Result<ChartResponse, ApiError> {
        debug!("Fetching price chart from {}", self.chart_url);

        let response = self.http_client
            .get(&self.chart_url)
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status(status.as_u16(), body_text));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Request(format!("Failed to read body: {}", e)))?;

        serde_json::from_slice::<ChartResponse>(&body)
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))
    }
}
