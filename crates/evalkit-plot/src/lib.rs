#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod config;
mod error;
mod output;
mod panel;
mod plotter;
mod render;
mod table;

pub use config::{DEFAULT_INPUT, DEFAULT_OUTPUT, PlotConfig};
pub use error::{PlotError, PlotResult};
pub use output::{encode_png, write_png};
pub use panel::{
    AxisLimits, AxisRange, PanelSpec, X_LABEL, Y_LABEL, auto_range, default_panels,
    identity_segment, visible_points,
};
pub use plotter::{ScatterPlot, plot_score_pairs};
pub use render::{Canvas, PanelReport, RenderReport, render_grid};
pub use table::{ScorePair, ScoreTable};
