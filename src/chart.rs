//! PNG price chart
//!
//! Draws VAT-inclusive raw and adjusted prices with the alert thresholds into an
//! in-memory RGB bitmap and encodes it as PNG. Text uses a bundled DejaVu Sans
//! so no system fonts are needed.

use crate::classify::{PriceLevel, classify};
use crate::config::{ChartConfig, MAX_CHART_SIDE, ThresholdConfig};
use crate::error::{Result, StromError};
use crate::prices::PriceRecord;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use once_cell::sync::OnceCell;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static FONT_READY: OnceCell<bool> = OnceCell::new();

const RAW_COLOR: RGBColor = RGBColor(255, 140, 0);
const ADJUSTED_COLOR: RGBColor = RGBColor(110, 110, 110);
const LOW_COLOR: RGBColor = RGBColor(30, 90, 220);
const NORMAL_COLOR: RGBColor = RGBColor(40, 160, 60);
const HIGH_COLOR: RGBColor = RGBColor(210, 30, 30);

/// Tick stride along the time axis
const TICK_STRIDE: usize = 4;

fn ensure_font() -> Result<()> {
    let ready = *FONT_READY
        .get_or_init(|| register_font("sans-serif", FontStyle::Normal, DEJAVU_SANS).is_ok());
    if ready {
        Ok(())
    } else {
        Err(StromError::render("bundled font could not be loaded"))
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> StromError {
    StromError::render(err.to_string())
}

/// Indices of the points that get a time label: every 4th plus the last
pub fn tick_label_indices(n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..n).step_by(TICK_STRIDE).collect();
    if indices.last() != Some(&(n - 1)) {
        indices.push(n - 1);
    }
    indices
}

fn level_color(level: PriceLevel) -> RGBColor {
    match level {
        PriceLevel::Low => LOW_COLOR,
        PriceLevel::Normal => NORMAL_COLOR,
        PriceLevel::High => HIGH_COLOR,
    }
}

fn y_range(records: &[PriceRecord], thresholds: &ThresholdConfig) -> (f64, f64) {
    let values = records
        .iter()
        .flat_map(|r| [r.raw_price_with_vat, r.adjusted_price_with_vat])
        .chain([thresholds.low, thresholds.high]);
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let pad = ((hi - lo) * 0.1).max(0.05);
    let y_min = if lo < 0.0 { lo - pad } else { 0.0 };
    (y_min, hi + pad)
}

/// Render the price chart for `records` (which must be non-empty) as PNG bytes.
pub fn render_price_chart(
    records: &[PriceRecord],
    area: &str,
    thresholds: &ThresholdConfig,
    chart_cfg: &ChartConfig,
    currency: &str,
) -> Result<Vec<u8>> {
    let Some(first) = records.first() else {
        return Err(StromError::render("no price records to plot"));
    };
    ensure_font()?;

    let (width, height) = (chart_cfg.width, chart_cfg.height);
    if width > MAX_CHART_SIDE || height > MAX_CHART_SIDE {
        return Err(StromError::render(format!(
            "chart size {}x{} exceeds {}x{}",
            width, height, MAX_CHART_SIDE, MAX_CHART_SIDE
        )));
    }
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let labels: Vec<String> = records.iter().map(PriceRecord::time_label).collect();
        let ticks = tick_label_indices(records.len());
        // A single point still needs a non-degenerate axis
        let x_end = (records.len() as i32 - 1).max(1);
        let (y_min, y_max) = y_range(records, thresholds);

        let title = format!(
            "Spot price {} (incl. VAT) - {}",
            area,
            first.timestamp.format("%d.%m.%Y")
        );

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(65)
            .build_cartesian_2d(0..x_end, y_min..y_max)
            .map_err(render_err)?;

        let x_label = |i: &i32| -> String {
            usize::try_from(*i)
                .ok()
                .filter(|i| ticks.contains(i))
                .and_then(|i| labels.get(i).cloned())
                .unwrap_or_default()
        };
        let y_label = |v: &f64| format!("{:.2}", v);

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc(format!("{}/kWh incl. VAT", currency))
            .x_labels(x_end as usize + 1)
            .y_labels(10)
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .label_style(("sans-serif", 12))
            .light_line_style(WHITE)
            .draw()
            .map_err(render_err)?;

        let raw_points: Vec<(i32, f64)> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (i as i32, r.raw_price_with_vat))
            .collect();
        let adjusted_points: Vec<(i32, f64)> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (i as i32, r.adjusted_price_with_vat))
            .collect();

        chart
            .draw_series(DashedLineSeries::new(
                raw_points,
                8,
                5,
                RAW_COLOR.stroke_width(2),
            ))
            .map_err(render_err)?
            .label("Raw + VAT")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RAW_COLOR.stroke_width(2)));

        chart
            .draw_series(LineSeries::new(
                adjusted_points.iter().copied(),
                ADJUSTED_COLOR.stroke_width(2),
            ))
            .map_err(render_err)?
            .label("Adjusted + VAT")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], ADJUSTED_COLOR.stroke_width(2))
            });

        chart
            .draw_series(records.iter().zip(&adjusted_points).map(|(r, &point)| {
                Circle::new(point, 4, level_color(classify(r, thresholds)).filled())
            }))
            .map_err(render_err)?;
        chart
            .draw_series(
                adjusted_points
                    .iter()
                    .map(|&point| Circle::new(point, 4, BLACK.stroke_width(1))),
            )
            .map_err(render_err)?;

        for (value, color, name) in [
            (thresholds.low, LOW_COLOR, "Low threshold"),
            (thresholds.high, HIGH_COLOR, "High threshold"),
        ] {
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(0, value), (x_end, value)],
                    10,
                    6,
                    color.stroke_width(1),
                ))
                .map_err(render_err)?
                .label(format!("{} ({:.2} {})", name, value, currency))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font(("sans-serif", 13))
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, width, height, image::ExtendedColorType::Rgb8)
        .map_err(render_err)?;
    Ok(png)
}
