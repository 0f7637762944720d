mod raster;

pub use raster::rasterize_svg;

use std::ops::Range;

use chrono::{Days, NaiveDate};
use fonviz_api_types::{DateRange, PriceSeries};
use itertools::{Itertools, MinMaxResult};
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Nothing to draw, no prices and no date range")]
    NoData,
    #[error("Unable to draw chart {0}")]
    Draw(String),
    #[error("Unable to rasterize chart {0}")]
    Rasterize(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    /// Width and height in pixels.
    pub size: (u32, u32),
    pub title: Option<String>,
    /// Date axis to use when none of the series has a single price.
    pub date_range: Option<DateRange>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            size: (1280, 960),
            title: None,
            date_range: None,
        }
    }
}

// matplotlib tab10
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

fn date_axis(series: &[PriceSeries], fallback: Option<DateRange>) -> Option<Range<NaiveDate>> {
    let (first, last) = match series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.date))
        .minmax()
    {
        MinMaxResult::NoElements => {
            let range = fallback?;
            (range.start, range.end)
        }
        MinMaxResult::OneElement(date) => (date, date),
        MinMaxResult::MinMax(first, last) => (first, last),
    };
    if first < last {
        return Some(first..last);
    }
    // a single day still needs some width on the axis
    Some(
        first.checked_sub_days(Days::new(1)).unwrap_or(first)
            ..last.checked_add_days(Days::new(1)).unwrap_or(last),
    )
}

fn price_axis(series: &[PriceSeries]) -> Range<f64> {
    let (low, high) = match series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.price))
        .filter(|price| price.is_finite())
        .minmax_by(|a, b| a.total_cmp(b))
    {
        MinMaxResult::NoElements => return 0.0..1.0,
        MinMaxResult::OneElement(price) => (price, price),
        MinMaxResult::MinMax(low, high) => (low, high),
    };
    let pad = ((high - low) * 0.05)
        .max(high.abs().max(low.abs()) * 0.01)
        .max(1e-6);
    (low - pad)..(high + pad)
}

/// Draws one line per series, dates along x and prices along y, with the
/// fund code as the legend label.
pub fn draw_price_chart<'a, T>(
    backend: T,
    series: &[PriceSeries],
    options: &ChartOptions,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'a>>
where
    T: 'a + DrawingBackend,
{
    let dates = date_axis(series, options.date_range).ok_or(ChartError::NoData)?;
    let prices = price_axis(series);

    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .x_label_area_size(60)
        .y_label_area_size(80)
        .margin(20);
    if let Some(title) = &options.title {
        builder.caption(title, ("sans-serif", 28).into_font());
    }
    let mut chart = builder.build_cartesian_2d(dates, prices)?;

    chart
        .configure_mesh()
        .light_line_style(RGBColor(220, 220, 220).mix(0.3))
        .x_desc("date")
        .y_desc("price")
        .x_label_formatter(&|date| date.format("%Y-%m-%d").to_string())
        .y_label_formatter(&|price| format!("{price:.3}"))
        .x_labels(6)
        .draw()?;

    for (line, color) in series.iter().zip(PALETTE.iter().cycle()) {
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                line.points.iter().map(|point| (point.date, point.price)),
                color.stroke_width(2),
            ))?
            .label(line.code.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // surface io errors instead of losing them on drop
    root.present()?;
    Ok(())
}

/// Renders the chart as a standalone svg document.
pub fn render_svg(series: &[PriceSeries], options: &ChartOptions) -> Result<String, ChartError> {
    if date_axis(series, options.date_range).is_none() {
        return Err(ChartError::NoData);
    }
    let mut buffer = String::new();
    {
        let backend = SVGBackend::with_string(&mut buffer, options.size);
        draw_price_chart(backend, series, options).map_err(|e| ChartError::Draw(e.to_string()))?;
    }
    debug!("rendered svg chart, {} bytes", buffer.len());
    Ok(buffer)
}

/// Renders the chart as png bytes.
pub fn render_png(series: &[PriceSeries], options: &ChartOptions) -> Result<Vec<u8>, ChartError> {
    let svg = render_svg(series, options)?;
    rasterize_svg(&svg, options.size)
}
