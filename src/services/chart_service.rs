use std::ops::Range;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Duration, Local, Utc};
use plotters::prelude::*;
use plotters::style::FontTransform;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{PricePoint, Segment, Side};

/// Chart rendering errors
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to read chart file: {0}")]
    Io(#[from] std::io::Error),
}

/// Fixed look of the price chart
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub width: u32,
    pub height: u32,
    /// strftime pattern for x tick labels, shown in local time
    pub tick_format: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "CROW Price Chart".to_string(),
            x_desc: "Time".to_string(),
            y_desc: "Price".to_string(),
            width: 1000,
            height: 600,
            tick_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

const BELOW_COLOR: RGBColor = RED;
const ABOVE_COLOR: RGBColor = GREEN;

fn side_color(side: Side) -> RGBColor {
    match side {
        Side::Below => BELOW_COLOR,
        Side::Above => ABOVE_COLOR,
    }
}

/// Render the colored segments as a PNG image.
///
/// `points` only drives the axis bounds; an empty series yields an empty
/// chart over the last hour. When text cannot be drawn (no usable font) the
/// chart is redrawn without captions and labels.
pub fn render_chart(
    segments: &[Segment],
    points: &[PricePoint],
    threshold: f64,
    style: &ChartStyle,
) -> Result<Vec<u8>, ChartError> {
    let (x_range, y_range) = axis_bounds(points, threshold)?;

    // BitMapBackend picks the PNG encoder from the file extension
    let temp_file = std::env::temp_dir().join(format!("crow_chart_{}.png", Uuid::new_v4()));

    let drawn = draw(&temp_file, segments, x_range.clone(), y_range.clone(), style, true)
        .or_else(|e| {
            warn!("Chart with labels failed ({}), retrying without text", e);
            draw(&temp_file, segments, x_range, y_range, style, false)
        });

    let result = drawn.and_then(|_| std::fs::read(&temp_file).map_err(ChartError::from));
    let _ = std::fs::remove_file(&temp_file);

    if let Ok(bytes) = &result {
        debug!("Rendered chart: {} segments, {} bytes", segments.len(), bytes.len());
    }
    result
}

/// Base64 for embedding in a `data:` URI
pub fn encode_png_base64(png: &[u8]) -> String {
    BASE64.encode(png)
}

fn draw(
    path: &Path,
    segments: &[Segment],
    x_range: Range<DateTime<Utc>>,
    y_range: Range<f64>,
    style: &ChartStyle,
    with_text: bool,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Draw(format!("Failed to fill canvas: {}", e)))?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if with_text {
        builder
            .caption(&style.title, ("sans-serif", 30.0).into_font())
            .x_label_area_size(150)
            .y_label_area_size(70);
    }

    let hours = (x_range.end - x_range.start).num_hours();
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| ChartError::Draw(format!("Failed to build chart: {}", e)))?;

    if with_text {
        let tick_format = style.tick_format.as_str();
        let format_tick =
            |t: &DateTime<Utc>| t.with_timezone(&Local).format(tick_format).to_string();

        chart
            .configure_mesh()
            .x_desc(&style.x_desc)
            .y_desc(&style.y_desc)
            // one tick per hour; spans past 47h get plotters' coarser periods
            .x_labels((hours + 1).clamp(2, 48) as usize)
            .x_label_formatter(&format_tick)
            .x_label_style(("sans-serif", 12.0).into_font().transform(FontTransform::Rotate90))
            .draw()
            .map_err(|e| ChartError::Draw(format!("Failed to draw mesh: {}", e)))?;
    }

    chart
        .draw_series(segments.iter().map(|s| {
            PathElement::new(
                vec![
                    (s.start.timestamp, s.start.price),
                    (s.end.timestamp, s.end.price),
                ],
                side_color(s.side).stroke_width(2),
            )
        }))
        .map_err(|e| ChartError::Draw(format!("Failed to draw line: {}", e)))?;

    root.present()
        .map_err(|e| ChartError::Draw(format!("Failed to render chart: {}", e)))?;

    Ok(())
}

/// Time and price ranges covering every point, never empty.
/// Fails when the padded price axis does not fit in a finite `f64` span.
fn axis_bounds(
    points: &[PricePoint],
    threshold: f64,
) -> Result<(Range<DateTime<Utc>>, Range<f64>), ChartError> {
    let times = points.iter().map(|p| p.timestamp);
    let (x_min, x_max) = match (times.clone().min(), times.max()) {
        (Some(min), Some(max)) if min < max => (min, max),
        (Some(t), _) => (t - Duration::minutes(30), t + Duration::minutes(30)),
        _ => {
            let now = Utc::now();
            (now - Duration::hours(1), now)
        }
    };

    let (min_price, max_price) = if points.is_empty() {
        (threshold, threshold)
    } else {
        points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.price), hi.max(p.price))
        })
    };

    let price_range = max_price - min_price;
    let padding = if price_range > 0.0 {
        price_range * 0.1
    } else {
        (max_price.abs() * 0.1).max(0.01)
    };
    let y_min = if min_price >= 0.0 {
        (min_price - padding).max(0.0)
    } else {
        min_price - padding
    };
    let y_max = max_price + padding;

    if !(y_min.is_finite() && y_max.is_finite() && (y_max - y_min).is_finite()) {
        return Err(ChartError::Draw(format!(
            "Price axis out of range: {}..{}",
            min_price, max_price
        )));
    }

    Ok((x_min..x_max, y_min..y_max))
}
