//! Off-screen chart rendering for Save Plot.
//!
//! Draws with the `plotters` bitmap backend into an RGB buffer, then hands
//! the buffer to `image` for PNG encoding.

use std::ops::Range;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use plotters::prelude::*;

use super::ExportError;
use crate::color::to_plotters;
use crate::config::ChartStyle;
use crate::data::model::{Dataset, finite_bounds};
use crate::fit::FitResult;

/// Fraction of the data span added on each side of the axes.
const AXIS_PADDING: f64 = 0.05;

fn draw_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Draw(e.to_string())
}

/// Render the chart for `dataset` (and `fit`, when present) to an image.
pub fn render_chart(
    dataset: &Dataset,
    fit: Option<&FitResult>,
    style: &ChartStyle,
    (width, height): (u32, u32),
) -> Result<RgbImage, ExportError> {
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    let curve = fit.map(|f| f.curve(dataset)).unwrap_or_default();

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (x_range, y_range) = chart_ranges(dataset, &curve);
        let mut chart = ChartBuilder::on(&root)
            .caption(&style.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(style.x_label.as_str())
            .y_desc(style.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        let data_color = to_plotters(style.colors.data);
        let radius = style.marker_radius.round().max(1.0) as u32;
        chart
            .draw_series(
                dataset
                    .points()
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|(x, y)| Circle::new((x, y), radius, data_color.filled())),
            )
            .map_err(draw_err)?
            .label(style.data_label.as_str())
            .legend(move |(x, y)| Circle::new((x, y), radius, data_color.filled()));

        if let Some(fit) = fit {
            let curve_color = to_plotters(style.colors.curve);
            let stroke = style.line_width.round().max(1.0) as u32;
            chart
                .draw_series(LineSeries::new(
                    curve.iter().map(|p| (p[0], p[1])),
                    curve_color.stroke_width(stroke),
                ))
                .map_err(draw_err)?
                .label(fit.label())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], curve_color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ExportError::Draw("bitmap buffer has the wrong size".to_string()))
}

/// Render the chart and write it to `path` as PNG.
pub fn save_plot(
    path: &Path,
    dataset: &Dataset,
    fit: Option<&FitResult>,
    style: &ChartStyle,
    size: (u32, u32),
) -> Result<(), ExportError> {
    let image = render_chart(dataset, fit, style, size)?;
    image.save_with_format(path, ImageFormat::Png)?;
    log::debug!("wrote {}x{} plot to {}", size.0, size.1, path.display());
    Ok(())
}

/// Axis ranges covering the data points and the fitted curve.
pub fn chart_ranges(dataset: &Dataset, curve: &[[f64; 2]]) -> (Range<f64>, Range<f64>) {
    let curve_y = finite_bounds(curve.iter().map(|p| p[1]));
    let y = match (dataset.y_bounds(), curve_y) {
        (Some((lo, hi)), Some((c_lo, c_hi))) => Some((lo.min(c_lo), hi.max(c_hi))),
        (data, curve) => data.or(curve),
    };
    (padded(dataset.x_bounds()), padded(y))
}

fn padded(bounds: Option<(f64, f64)>) -> Range<f64> {
    match bounds {
        None => 0.0..1.0,
        Some((lo, hi)) if hi - lo <= f64::EPSILON * lo.abs().max(1.0) => (lo - 1.0)..(hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * AXIS_PADDING;
            (lo - pad)..(hi + pad)
        }
    }
}
