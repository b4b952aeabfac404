//! Panel layout: titles, axis limits and the geometry drawn in each panel.

use crate::table::ScoreTable;

/// Fraction of the data span added on each side of an auto-fitted axis.
const AUTO_MARGIN: f64 = 0.05;

/// Label of the x axis of the full-range panel.
pub const X_LABEL: &str = "Original Eval";

/// Label of the y axis of the full-range panel.
pub const Y_LABEL: &str = "Rescored Eval";

/// How a panel chooses its axis limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisLimits {
    /// Fit both axes to the data.
    Auto,
    /// `[-bound, bound]` on both axes.
    Symmetric(f64),
}

/// One panel of the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    /// Axis descriptions `(x, y)`, if the panel shows them
    pub labels: Option<(String, String)>,
    pub limits: AxisLimits,
}

impl PanelSpec {
    pub fn new(title: impl Into<String>, limits: AxisLimits) -> Self {
        Self {
            title: title.into(),
            labels: None,
            limits,
        }
    }

    #[must_use]
    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.labels = Some((x.into(), y.into()));
        self
    }

    /// Axis ranges for `table`.
    pub fn ranges(&self, table: &ScoreTable) -> (AxisRange, AxisRange) {
        match self.limits {
            AxisLimits::Auto => {
                let finite = table.rows().iter().filter(|row| row.is_finite());
                let x = auto_range(finite.clone().map(|row| row.original));
                let y = auto_range(finite.map(|row| row.rescored));
                (x, y)
            }
            AxisLimits::Symmetric(bound) => {
                let range = AxisRange::new(-bound, bound);
                (range, range)
            }
        }
    }
}

/// The four panels of the evaluation comparison figure, row-major.
pub fn default_panels() -> Vec<PanelSpec> {
    vec![
        PanelSpec::new("Full Range", AxisLimits::Auto).with_labels(X_LABEL, Y_LABEL),
        PanelSpec::new("Zoom: ±10000", AxisLimits::Symmetric(10_000.0)),
        PanelSpec::new("Zoom: ±1000", AxisLimits::Symmetric(1_000.0)),
        PanelSpec::new("Zoom: ±100", AxisLimits::Symmetric(100.0)),
    ]
}

/// A closed interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Width of the interval; infinite when it exceeds `f64::MAX`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Factor the renderer divides this axis by so that its span stays finite.
    ///
    /// Both ends are finite, so halving always brings the span back under
    /// `f64::MAX`; a power of two keeps the division exact.
    pub fn render_scale(&self) -> f64 {
        if self.span().is_finite() { 1.0 } else { 2.0 }
    }
}

/// Fit an axis to `values`, ignoring non-finite ones.
///
/// The data span is padded by 5% on each side. A single distinct value is
/// padded by 5% of its magnitude (1 for zero); no values at all give
/// `[-1, 1]`. Both ends are always finite, clamped to `f64::MIN..=f64::MAX`.
pub fn auto_range(values: impl Iterator<Item = f64>) -> AxisRange {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return AxisRange::new(-1.0, 1.0);
    }

    // Halves cannot overflow, unlike `max - min` for values of opposite sign.
    let half_span = max / 2.0 - min / 2.0;
    let pad = if half_span > 0.0 {
        2.0 * (half_span * AUTO_MARGIN)
    } else if min == 0.0 {
        1.0
    } else {
        min.abs() * AUTO_MARGIN
    };
    AxisRange::new((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
}

/// Points of `table` lying inside both ranges; non-finite rows never are.
pub fn visible_points(table: &ScoreTable, x: AxisRange, y: AxisRange) -> Vec<(f64, f64)> {
    table
        .rows()
        .iter()
        .filter(|row| row.is_finite() && x.contains(row.original) && y.contains(row.rescored))
        .map(|row| (row.original, row.rescored))
        .collect()
}

/// Part of the line `y = x` visible in the panel, as `(start, end)` along x.
///
/// `None` when the two ranges do not overlap.
pub fn identity_segment(x: AxisRange, y: AxisRange) -> Option<(f64, f64)> {
    let start = x.min.max(y.min);
    let end = x.max.min(y.max);
    (start < end).then_some((start, end))
}

/// Dashes along the identity segment `(start, end)`, sized in pixels.
///
/// `from` and `to` are the pixel positions of the segment ends, so `dash`
/// and `gap` are measured along the drawn line whatever the panel aspect.
/// Returns the dashes as `(start, end)` along x in data units.
pub fn identity_dashes(
    segment: (f64, f64),
    from: (i32, i32),
    to: (i32, i32),
    dash: f64,
    gap: f64,
) -> Vec<(f64, f64)> {
    let (start, end) = segment;
    let length = f64::from(to.0 - from.0).hypot(f64::from(to.1 - from.1));
    dash_pattern(0.0, length, dash, gap)
        .into_iter()
        .map(|(a, b)| (lerp(start, end, a / length), lerp(start, end, b / length)))
        .collect()
}

// Convex combination: stays finite for any finite ends.
fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start.mul_add(1.0 - t, end * t)
}

/// Split `[start, end]` into dashes of length `dash` separated by `gap`.
///
/// The last dash is cut at `end`.
pub fn dash_pattern(start: f64, end: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut dashes = Vec::new();
    if !(dash > 0.0 && gap >= 0.0 && start < end) {
        return dashes;
    }

    let mut at = start;
    while at < end {
        dashes.push((at, (at + dash).min(end)));
        at += dash + gap;
    }
    dashes
}
