//! Plot command handler.

use std::path::Path;

use anyhow::Result;
use evalkit_plot::{PlotConfig, plot_score_pairs};

use crate::error::CliError;

/// Execute the plot command and print the path of the written image.
pub fn execute(input: &Path, output: &Path, dpi: u32) -> Result<()> {
    let config = PlotConfig::new().with_dpi(dpi);
    let report = plot_score_pairs(input, output, &config).map_err(CliError::from)?;

    let drawn = report.panels.first().map_or(0, |panel| panel.points_drawn);
    println!(
        "Saved {} ({}x{} px, {} points)",
        output.display(),
        report.width,
        report.height,
        drawn
    );
    Ok(())
}
