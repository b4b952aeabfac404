//! Scatter grid rendering onto an in-memory canvas.

mod canvas;
mod font;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::debug;

pub use canvas::Canvas;

use crate::config::PlotConfig;
use crate::error::{PlotError, PlotResult};
use crate::panel::{AxisRange, PanelSpec, identity_dashes, identity_segment, visible_points};
use crate::table::ScoreTable;

const POINT_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const POINT_ALPHA: f64 = 0.3;
const GRID_ALPHA: f64 = 0.3;
const COLUMNS: usize = 2;
/// Tick values at or above this magnitude are printed in scientific notation.
const SCIENTIFIC_FROM: f64 = 1e9;

/// What was drawn in one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelReport {
    pub title: String,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    /// Points drawn inside the axes
    pub points_drawn: usize,
    /// Visible part of `y = x` as `(start, end)`, if any
    pub identity: Option<(f64, f64)>,
}

/// What was drawn, and the size of the saved image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub panels: Vec<PanelReport>,
    /// Image width after trimming, in pixels
    pub width: u32,
    /// Image height after trimming, in pixels
    pub height: u32,
}

/// Pixel sizes derived from the configured resolution.
struct Style {
    title_font: TextStyle<'static>,
    tick_font: TextStyle<'static>,
    label_font: TextStyle<'static>,
    margin: u32,
    x_label_area: u32,
    y_label_area: u32,
    point_radius: u32,
    grid_width: u32,
    line_width: u32,
    dash: u32,
    gap: u32,
}

impl Style {
    fn new(config: &PlotConfig) -> Self {
        let font = |points: f64| -> TextStyle<'static> {
            let px = f64::from(config.points_to_px(points));
            TextStyle::from(FontDesc::new(FontFamily::SansSerif, px, FontStyle::Normal))
        };
        Self {
            title_font: font(12.0),
            tick_font: font(10.0),
            label_font: font(10.0),
            margin: config.points_to_px(8.0),
            x_label_area: config.points_to_px(30.0),
            y_label_area: config.points_to_px(45.0),
            point_radius: config.points_to_px(0.5),
            grid_width: config.points_to_px(0.8),
            line_width: config.points_to_px(1.5),
            dash: config.points_to_px(5.5),
            gap: config.points_to_px(2.4),
        }
    }
}

/// Draw `panels` in a two-column grid.
///
/// Returns the untrimmed canvas and one report per panel.
pub fn render_grid(
    table: &ScoreTable,
    panels: &[PanelSpec],
    config: &PlotConfig,
) -> PlotResult<(Canvas, Vec<PanelReport>)> {
    let (width, height) = config.canvas_size()?;
    if panels.is_empty() {
        return Err(PlotError::InvalidConfig {
            message: "at least one panel is required".to_string(),
        });
    }
    font::ensure_fonts()?;

    let style = Style::new(config);
    let rows = panels.len().div_ceil(COLUMNS);
    let mut canvas = Canvas::new(width, height);
    let mut reports = Vec::with_capacity(panels.len());

    {
        let root = BitMapBackend::with_buffer(canvas.pixels_mut(), (width, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(PlotError::render)?;

        let areas = root.split_evenly((rows, COLUMNS));
        for (area, spec) in areas.iter().zip(panels) {
            reports.push(draw_panel(area, spec, table, &style)?);
        }
        root.present().map_err(PlotError::render)?;
    }

    Ok((canvas, reports))
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    spec: &PanelSpec,
    table: &ScoreTable,
    style: &Style,
) -> PlotResult<PanelReport> {
    let (x, y) = spec.ranges(table);
    // Chart coordinates are data values divided by these factors.
    let (sx, sy) = (x.render_scale(), y.render_scale());

    let mut chart = ChartBuilder::on(area)
        .margin(style.margin)
        .caption(&spec.title, style.title_font.clone())
        .x_label_area_size(style.x_label_area)
        .y_label_area_size(style.y_label_area)
        .build_cartesian_2d(x.min / sx..x.max / sx, y.min / sy..y.max / sy)
        .map_err(PlotError::render)?;

    {
        let x_tick = |value: &f64| format_tick(&(value * sx));
        let y_tick = |value: &f64| format_tick(&(value * sy));
        let mut mesh = chart.configure_mesh();
        mesh.max_light_lines(0)
            .bold_line_style(BLACK.mix(GRID_ALPHA).stroke_width(style.grid_width))
            .axis_style(BLACK.stroke_width(style.grid_width))
            .label_style(style.tick_font.clone())
            .x_labels(7)
            .y_labels(7)
            .x_label_formatter(&x_tick)
            .y_label_formatter(&y_tick);
        if let Some((x_desc, y_desc)) = &spec.labels {
            mesh.x_desc(x_desc.as_str())
                .y_desc(y_desc.as_str())
                .axis_desc_style(style.label_font.clone());
        }
        mesh.draw().map_err(PlotError::render)?;
    }

    let points = visible_points(table, x, y);
    let point_style = POINT_COLOR.mix(POINT_ALPHA).filled();
    chart
        .draw_series(
            points
                .iter()
                .map(|&(a, b)| Circle::new((a / sx, b / sy), style.point_radius, point_style)),
        )
        .map_err(PlotError::render)?;

    let identity = identity_segment(x, y);
    if let Some((start, end)) = identity {
        let dashes = identity_dashes(
            (start, end),
            chart.backend_coord(&(start / sx, start / sy)),
            chart.backend_coord(&(end / sx, end / sy)),
            f64::from(style.dash),
            f64::from(style.gap),
        );
        let line_style = RED.stroke_width(style.line_width);
        chart
            .draw_series(dashes.into_iter().map(|(a, b)| {
                PathElement::new(vec![(a / sx, a / sy), (b / sx, b / sy)], line_style)
            }))
            .map_err(PlotError::render)?;
    }

    debug!(
        panel = %spec.title,
        x_min = x.min,
        x_max = x.max,
        y_min = y.min,
        y_max = y.max,
        points = points.len(),
        "drew panel"
    );

    Ok(PanelReport {
        title: spec.title.clone(),
        x_range: x,
        y_range: y,
        points_drawn: points.len(),
        identity,
    })
}

/// Tick label: integers without decimals, others with at most three, large
/// magnitudes in scientific notation.
fn format_tick(value: &f64) -> String {
    let text = if value.abs() >= SCIENTIFIC_FROM {
        let sci = format!("{value:.2e}");
        match sci.split_once('e') {
            Some((mantissa, exponent)) => {
                let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
                format!("{mantissa}e{exponent}")
            }
            None => sci,
        }
    } else if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        let fixed = format!("{value:.3}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    };
    if text == "-0" { "0".to_string() } else { text }
}
