//! Figure configuration.

use crate::error::{PlotError, PlotResult};

/// Default input table, relative to the working directory.
pub const DEFAULT_INPUT: &str = "score_pairs.txt";

/// Default output image, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "eval_scatter_zoom.png";

/// Largest canvas side accepted, in pixels.
const MAX_CANVAS_PX: f64 = 20_000.0;

/// Points per inch; sizes below are given in points like a print layout.
const POINTS_PER_INCH: f64 = 72.0;

/// Figure size, resolution and trimming.
///
/// # Example
///
/// ```
/// use evalkit_plot::PlotConfig;
///
/// let config = PlotConfig::new().with_dpi(100);
/// assert_eq!(config.canvas_size().unwrap(), (1200, 1200));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Output resolution
    pub dpi: u32,
    /// Whitespace kept around the content when trimming, in inches
    pub trim_pad_in: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width_in: 12.0,
            height_in: 12.0,
            dpi: 300,
            trim_pad_in: 0.1,
        }
    }
}

impl PlotConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    #[must_use]
    pub const fn with_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.width_in = width_in;
        self.height_in = height_in;
        self
    }

    #[must_use]
    pub const fn with_trim_pad(mut self, pad_in: f64) -> Self {
        self.trim_pad_in = pad_in;
        self
    }

    /// Canvas size in pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn canvas_size(&self) -> PlotResult<(u32, u32)> {
        let dpi = f64::from(self.dpi);
        let width = (self.width_in * dpi).round();
        let height = (self.height_in * dpi).round();
        let valid = |px: f64| px.is_finite() && (1.0..=MAX_CANVAS_PX).contains(&px);
        if self.dpi == 0 || !valid(width) || !valid(height) {
            return Err(PlotError::InvalidConfig {
                message: format!(
                    "{}x{} in at {} dpi gives a {width}x{height} px canvas",
                    self.width_in, self.height_in, self.dpi
                ),
            });
        }
        if !(self.trim_pad_in.is_finite() && self.trim_pad_in >= 0.0) {
            return Err(PlotError::InvalidConfig {
                message: format!("trim padding must be non-negative, got {}", self.trim_pad_in),
            });
        }
        Ok((width as u32, height as u32))
    }

    /// Convert a length in points to pixels at this resolution (at least 1).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn points_to_px(&self, points: f64) -> u32 {
        (points * f64::from(self.dpi) / POINTS_PER_INCH).round().max(1.0) as u32
    }

    /// Trim padding in pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn trim_pad_px(&self) -> u32 {
        (self.trim_pad_in * f64::from(self.dpi)).round().max(0.0) as u32
    }

    /// Resolution in pixels per metre, as stored in the PNG `pHYs` chunk.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixels_per_meter(&self) -> u32 {
        (f64::from(self.dpi) / 0.0254).round() as u32
    }
}
