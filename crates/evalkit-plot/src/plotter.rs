//! Figure assembly: load, render, trim, save.

use std::path::Path;

use tracing::debug;

use crate::config::PlotConfig;
use crate::error::PlotResult;
use crate::output::write_png;
use crate::panel::{PanelSpec, default_panels};
use crate::render::{RenderReport, render_grid};
use crate::table::ScoreTable;

/// Renders score tables as a grid of scatter panels.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    config: PlotConfig,
    panels: Vec<PanelSpec>,
}

impl ScatterPlot {
    /// A plot with the standard full-range and zoom panels.
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            panels: default_panels(),
        }
    }

    /// Render `table` and save the trimmed image to `output`.
    pub fn save(&self, table: &ScoreTable, output: &Path) -> PlotResult<RenderReport> {
        let (canvas, panels) = render_grid(table, &self.panels, &self.config)?;
        let canvas = canvas.trimmed(self.config.trim_pad_px());
        write_png(&canvas, output, self.config.pixels_per_meter())?;

        Ok(RenderReport {
            panels,
            width: canvas.width(),
            height: canvas.height(),
        })
    }
}

/// Load the table at `input` and save its scatter grid to `output`.
pub fn plot_score_pairs(input: &Path, output: &Path, config: &PlotConfig) -> PlotResult<RenderReport> {
    let table = ScoreTable::load(input)?;
    debug!(rows = table.len(), finite = table.finite_len(), "plotting score pairs");
    ScatterPlot::new(config.clone()).save(&table, output)
}
