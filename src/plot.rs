//! Composite figure generation: one subplot per metric, one curve pair per run.

use crate::aggregate::AggregateResult;
use crate::config::{PlotConfig, XAxis};
use crate::events::Series;
use crate::smooth::exponential_moving_average;
use crate::timeunit::{shared_unit, TimeUnit};
use anyhow::{anyhow, bail, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// Run colors, assigned by run position and cycled.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Size of one subplot in inches
const SUBPLOT_INCHES: (f64, f64) = (6.4, 4.8);
const LEGEND_POINTS: f64 = 28.0;
const RAW_OPACITY: f64 = 0.25;
const SMOOTH_STROKE: u32 = 2;

pub fn run_color(run: usize) -> RGBColor {
    PALETTE[run % PALETTE.len()]
}

/// Raw and smoothed values of one run for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Position of the run in the aggregate result
    pub run: usize,
    pub x: Vec<f64>,
    pub raw: Vec<f64>,
    pub smoothed: Vec<f64>,
}

impl Curve {
    fn points<'a>(&'a self, ys: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.x
            .iter()
            .copied()
            .zip(ys.iter().copied())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}

/// One subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub metric: String,
    pub x_label: String,
    /// Shared elapsed-time unit, when the x-axis is time
    pub unit: Option<TimeUnit>,
    pub curves: Vec<Curve>,
}

impl Panel {
    fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let xs = self.curves.iter().flat_map(|c| c.x.iter());
        let ys = self
            .curves
            .iter()
            .flat_map(|c| c.raw.iter().chain(c.smoothed.iter()));
        (padded_range(xs, 0.0), padded_range(ys, 0.05))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub run: usize,
    pub label: String,
}

impl LegendEntry {
    pub fn color(&self) -> RGBColor {
        run_color(self.run)
    }
}

/// Everything needed to draw the composite figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub rows: usize,
    pub columns: usize,
    pub panels: Vec<Panel>,
    pub legend: Vec<LegendEntry>,
}

impl Figure {
    /// Image size in pixels at `dpi`, legend strip included.
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let dpi = f64::from(dpi);
        let width = self.columns as f64 * SUBPLOT_INCHES.0 * dpi;
        let height = self.rows as f64 * SUBPLOT_INCHES.1 * dpi;
        (
            width.round() as u32,
            height.round() as u32 + legend_height(dpi),
        )
    }
}

fn legend_height(dpi: f64) -> u32 {
    (LEGEND_POINTS * dpi / 72.0).round() as u32
}

/// Convert a size in typographic points to pixels.
fn points(pt: f64, dpi: u32) -> u32 {
    ((pt * f64::from(dpi) / 72.0).round() as u32).max(1)
}

fn padded_range<'a, I>(values: I, pad: f64) -> Range<f64>
where
    I: Iterator<Item = &'a f64>,
{
    let (lo, hi) = values
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 0.5)..(hi + 0.5);
    }
    let margin = (hi - lo) * pad;
    (lo - margin)..(hi + margin)
}

/// Seconds since the series' first sample.
fn elapsed_secs(series: &Series) -> Vec<f64> {
    let origin = series.first().map_or(0.0, |s| s.wall_time);
    series.iter().map(|s| s.wall_time - origin).collect()
}

fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Lay out every metric of `data` as a subplot and compute its curves.
///
/// Metrics are ordered by name. In time mode every run on a subplot is
/// rescaled to the coarsest unit any of them selects. Fails when there is
/// no metric at all.
pub fn build_figure(data: &AggregateResult, config: &PlotConfig) -> Result<Figure> {
    let metrics = data.metric_names();
    if metrics.is_empty() {
        bail!(
            "nothing to plot: no scalar metrics found in {} run director{}",
            data.len(),
            if data.len() == 1 { "y" } else { "ies" }
        );
    }

    let columns = config.columns.min(metrics.len()).max(1);
    let rows = metrics.len().div_ceil(columns);
    let mut contributed = vec![false; data.len()];
    let mut panels = Vec::with_capacity(metrics.len());

    for metric in metrics {
        let mut curves = Vec::new();
        for (run, (_, log)) in data.runs().enumerate() {
            let Some(series) = log.get(metric) else {
                continue;
            };
            let x = match config.x_axis {
                XAxis::Step => series.iter().map(|s| s.step as f64).collect(),
                XAxis::Time => elapsed_secs(series),
            };
            let raw: Vec<f64> = series.iter().map(|s| s.value).collect();
            let smoothed = exponential_moving_average(&raw, config.smoothing);
            curves.push(Curve { run, x, raw, smoothed });
            contributed[run] = true;
        }

        let (x_label, unit) = match config.x_axis {
            XAxis::Step => ("step".to_string(), None),
            XAxis::Time => {
                let unit = shared_unit(curves.iter().map(|c| max_value(&c.x)))
                    .unwrap_or(TimeUnit::Seconds);
                for curve in &mut curves {
                    unit.rescale(&mut curve.x);
                }
                (format!("time ({unit})"), Some(unit))
            }
        };

        panels.push(Panel {
            metric: metric.to_string(),
            x_label,
            unit,
            curves,
        });
    }

    let legend = data
        .dirs()
        .enumerate()
        .filter(|(run, _)| contributed[*run])
        .map(|(run, dir)| LegendEntry {
            run,
            label: dir.to_string(),
        })
        .collect();

    Ok(Figure {
        rows,
        columns,
        panels,
        legend,
    })
}

const SANS_SERIF: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Make the bundled DejaVu Sans available as "sans-serif" for text drawn by
/// plotters. Registering again replaces the same entry.
fn register_fonts() -> Result<()> {
    plotters::style::register_font("sans-serif", FontStyle::Normal, SANS_SERIF)
        .map_err(|_| anyhow!("bundled sans-serif font could not be loaded"))
}

/// Draw `figure` to `path`. A `.svg` extension selects SVG output; anything
/// else is written as a bitmap in the format the extension names.
pub fn render(figure: &Figure, path: &Path, dpi: u32) -> Result<()> {
    register_fonts()?;
    let size = figure.pixel_size(dpi);
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_figure(&root, figure, dpi)?;
        root.present()
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_figure(&root, figure, dpi)?;
        root.present()
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure, dpi: u32) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (legend_area, grid) = root.split_vertically(legend_height(f64::from(dpi)));
    draw_legend(&legend_area, &figure.legend, dpi)?;

    // Cells past the last metric stay blank.
    let cells = grid.split_evenly((figure.rows, figure.columns));
    for (panel, cell) in figure.panels.iter().zip(cells.iter()) {
        draw_panel(cell, panel, dpi)?;
    }
    Ok(())
}

fn draw_legend<DB>(area: &DrawingArea<DB, Shift>, entries: &[LegendEntry], dpi: u32) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let font_px = points(10.0, dpi) as i32;
    let style = TextStyle::from(("sans-serif", font_px).into_font());
    let (_, height) = area.dim_in_pixel();
    let y = height as i32 / 2;
    let swatch = font_px * 2;

    let mut x = font_px;
    for entry in entries {
        area.draw(&PathElement::new(
            vec![(x, y), (x + swatch, y)],
            entry.color().stroke_width(SMOOTH_STROKE),
        ))?;
        let label_x = x + swatch + font_px / 2;
        area.draw(&Text::new(
            entry.label.clone(),
            (label_x, y - font_px / 2),
            style.clone(),
        ))?;
        let (text_width, _) = area.estimate_text_size(&entry.label, &style)?;
        x = label_x + text_width as i32 + font_px;
    }
    Ok(())
}

fn draw_panel<DB>(area: &DrawingArea<DB, Shift>, panel: &Panel, dpi: u32) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_range, y_range) = panel.bounds();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.metric, ("sans-serif", points(12.0, dpi)))
        .margin(points(6.0, dpi))
        .x_label_area_size(points(26.0, dpi))
        .y_label_area_size(points(44.0, dpi))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .label_style(("sans-serif", points(9.0, dpi)))
        .axis_desc_style(("sans-serif", points(10.0, dpi)))
        .x_labels(6)
        .y_labels(6)
        .draw()?;

    for curve in &panel.curves {
        let color = run_color(curve.run);
        chart.draw_series(LineSeries::new(curve.points(&curve.raw), color.mix(RAW_OPACITY)))?;
        chart.draw_series(LineSeries::new(
            curve.points(&curve.smoothed),
            color.stroke_width(SMOOTH_STROKE),
        ))?;
    }
    Ok(())
}
