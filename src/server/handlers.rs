use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info};

use super::page::{self, FETCH_ERROR_TEXT, RENDER_ERROR_TEXT};
use super::AppState;
use crate::services::{alert_service, chart_service, segment_service, series_service};

/// Price page - GET /
///
/// Fetches the chart, and answers with plain text (still 200) when there is
/// no data to draw.
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let payload = state.client.fetch_chart().await;
    let points = series_service::parse_series(payload.as_ref());

    if points.is_empty() {
        return FETCH_ERROR_TEXT.into_response();
    }

    let threshold = state.config.threshold;
    let segments = segment_service::segment_series(&points, threshold);

    let render_state = state.clone();
    let render_points = points.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        chart_service::render_chart(&segments, &render_points, threshold, &render_state.style)
    })
    .await;

    let png = match rendered {
        Ok(Ok(png)) => png,
        Ok(Err(e)) => {
            error!("Chart rendering failed: {}", e);
            return RENDER_ERROR_TEXT.into_response();
        }
        Err(e) => {
            error!("Chart rendering task failed: {}", e);
            return RENDER_ERROR_TEXT.into_response();
        }
    };

    let alert = alert_service::check_average_price(&points, threshold);
    info!(
        "Served chart: {} points, average {:.7}, alert: {}",
        points.len(),
        alert.average_price,
        alert.exceeded
    );

    let img_base64 = chart_service::encode_png_base64(&png);
    Html(page::render_page(&img_base64, &alert, threshold, state.config.refresh_ms)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wemix::WemixClient;
    use crate::config::Config;
    use crate::server::router;
    use axum::{http::StatusCode, routing::get, Router};
    use std::time::Duration;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{}", addr)
    }

    async fn spawn_page(upstream: Router) -> String {
        let upstream_url = spawn(upstream).await;
        let config = Config {
            price_url: format!("{}/price-chart", upstream_url),
            ..Config::default()
        };
        let client = WemixClient::new(config.price_url.clone(), Duration::from_secs(5))
            .expect("client");
        let state = Arc::new(AppState::new(config, client));
        spawn(router(state)).await
    }

    #[tokio::test]
    async fn test_upstream_failure_gives_plain_text_error() {
        let upstream = Router::new().route(
            "/price-chart",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let page_url = spawn_page(upstream).await;

        let response = reqwest::get(format!("{}/", page_url)).await.expect("page request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers().get(reqwest::header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
        assert!(response.headers()[reqwest::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(response.text().await.unwrap(), FETCH_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_result_code_failure_gives_plain_text_error() {
        let upstream = Router::new().route(
            "/price-chart",
            get(|| async { r#"{"Result":1,"data":{"chart":[{"t":1700000000,"p":0.9}]}}"# }),
        );
        let page_url = spawn_page(upstream).await;

        let body = reqwest::get(format!("{}/", page_url))
            .await
            .expect("page request")
            .text()
            .await
            .unwrap();
        assert_eq!(body, FETCH_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_page_embeds_chart_and_alert() {
        let upstream = Router::new().route(
            "/price-chart",
            get(|| async {
                r#"{"Result":0,"data":{"chart":[
                    {"t":1700000000,"p":0.7},
                    {"t":1700003600,"p":0.8},
                    {"t":1700007200,"p":0.75}
                ]}}"#
            }),
        );
        let page_url = spawn_page(upstream).await;

        let response = reqwest::get(format!("{}/", page_url)).await.expect("page request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers().get(reqwest::header::CACHE_CONTROL).unwrap(),
            "no-store"
        );

        let body = response.text().await.unwrap();
        assert!(body.contains("data:image/png;base64,iVBORw0KGgo"));
        assert!(body.contains("Alert: The average price has reached or exceeded 0.75!"));
        assert!(body.contains("0.7500000"));
    }

    #[tokio::test]
    async fn test_overflowing_prices_give_render_error() {
        let upstream = Router::new().route(
            "/price-chart",
            get(|| async {
                r#"{"Result":0,"data":{"chart":[
                    {"t":1700000000,"p":1.7e308},
                    {"t":1700003600,"p":1.7e308}
                ]}}"#
            }),
        );
        let page_url = spawn_page(upstream).await;

        let response = tokio::time::timeout(
            Duration::from_secs(10),
            reqwest::get(format!("{}/", page_url)),
        )
        .await
        .expect("page should answer")
        .expect("page request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), RENDER_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let upstream = Router::new();
        let page_url = spawn_page(upstream).await;

        let response = reqwest::get(format!("{}/other", page_url)).await.expect("request");
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
