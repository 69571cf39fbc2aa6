//! HTML for the price page

use crate::models::AlertResult;

pub const FETCH_ERROR_TEXT: &str = "Error fetching or parsing data.";
pub const RENDER_ERROR_TEXT: &str = "Error rendering chart.";

/// Alert line shown only when the average reached the threshold
pub fn alert_message(alert: &AlertResult, threshold: f64) -> String {
    if alert.exceeded {
        format!("Alert: The average price has reached or exceeded {}!", threshold)
    } else {
        String::new()
    }
}

/// Full page with the embedded chart, alert line and 7-decimal average
pub fn render_page(img_base64: &str, alert: &AlertResult, threshold: f64, refresh_ms: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Virtual Currency Price Chart</title>
    <script>
        function autoRefresh() {{
            setInterval(function() {{
                window.location.reload();
            }}, {refresh_ms});
        }}
        window.onload = autoRefresh;
    </script>
</head>
<body>
    <h1>CROW Price Chart</h1>
    <img src="data:image/png;base64,{img_base64}" alt="Price Chart">
    <h2>{message}</h2>
    <p><strong>24-Hour Average Price:</strong> {average:.7}</p>
</body>
</html>
"#,
        refresh_ms = refresh_ms,
        img_base64 = img_base64,
        message = alert_message(alert, threshold),
        average = alert.average_price,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_with_alert() {
        let alert = AlertResult { exceeded: true, average_price: 0.75 };
        let html = render_page("QUJD", &alert, 0.75, 1000);

        assert!(html.contains(r#"src="data:image/png;base64,QUJD""#));
        assert!(html.contains("<h2>Alert: The average price has reached or exceeded 0.75!</h2>"));
        assert!(html.contains("<strong>24-Hour Average Price:</strong> 0.7500000</p>"));
        assert!(html.contains("}, 1000);"));
    }

    #[test]
    fn test_page_without_alert() {
        let alert = AlertResult { exceeded: false, average_price: 0.123456789 };
        let html = render_page("QUJD", &alert, 0.75, 300000);

        assert!(html.contains("<h2></h2>"));
        assert!(!html.contains("Alert:"));
        assert!(html.contains("0.1234568"));
        assert!(html.contains("}, 300000);"));
    }
}
