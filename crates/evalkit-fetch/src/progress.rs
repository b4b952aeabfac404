//! CLI progress rendering for snapshot fetches.
//!
//! Presentation only: one line per file. On a terminal each file gets an
//! indicatif bar that stays on screen when done; otherwise throttled plain
//! lines are written. Output goes to stderr so stdout stays free for results.

use std::io::{self, IsTerminal};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use evalkit_core::ProgressCallback;
use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};

// ============================================================================
// Constants
// ============================================================================

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Smoothing factor for exponentially weighted average speed calculation.
const EWA_SMOOTHING: f64 = 0.02;

/// Longest label shown before truncation.
const MAX_LABEL: usize = 48;

// ============================================================================
// CLI Progress Printer
// ============================================================================

/// CLI progress display that automatically selects terminal or plain output.
pub struct CliProgressPrinter {
    inner: ProgressRender,
}

enum ProgressRender {
    Fancy(FancyProgress),
    Plain(PlainProgress),
}

impl CliProgressPrinter {
    /// Create a new progress printer, auto-detecting terminal capability.
    pub fn new() -> Self {
        if io::stderr().is_terminal() {
            Self {
                inner: ProgressRender::Fancy(FancyProgress::new()),
            }
        } else {
            Self {
                inner: ProgressRender::Plain(PlainProgress::new()),
            }
        }
    }

    /// Update the display with the state of the file named `label`.
    pub fn update(&mut self, label: &str, downloaded: u64, total: u64) {
        match &mut self.inner {
            ProgressRender::Fancy(inner) => inner.update(label, downloaded, total),
            ProgressRender::Plain(inner) => inner.update(label, downloaded, total),
        }
    }

    /// Finish the line of the current file.
    pub fn finish(&mut self) {
        match &mut self.inner {
            ProgressRender::Fancy(inner) => inner.finish(),
            ProgressRender::Plain(inner) => inner.finish(),
        }
    }

    /// Wrap the printer into a callback for `SnapshotFetcher::with_progress`.
    ///
    /// The returned handle is kept to call [`finish`](Self::finish) at the end.
    pub fn into_callback(self) -> (Arc<Mutex<Self>>, ProgressCallback) {
        let shared = Arc::new(Mutex::new(self));
        let handle = Arc::clone(&shared);
        let callback: ProgressCallback = Arc::new(move |label, downloaded, total| {
            if let Ok(mut printer) = handle.lock() {
                printer.update(label, downloaded, total);
            }
        });
        (shared, callback)
    }
}

impl Default for CliProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Fancy Terminal Progress (indicatif)
// ============================================================================

struct FancyProgress {
    bar: Option<ProgressBar>,
    label: Option<String>,
}

impl FancyProgress {
    const fn new() -> Self {
        Self {
            bar: None,
            label: None,
        }
    }

    fn update(&mut self, label: &str, downloaded: u64, total: u64) {
        if self.label.as_deref() != Some(label) {
            self.finish();
            let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
            bar.set_style(Self::bar_style());
            bar.set_message(format_label(label));
            self.bar = Some(bar);
            self.label = Some(label.to_string());
        }

        if let Some(bar) = &self.bar {
            if bar.length() != Some(total) {
                bar.set_length(total);
            }
            bar.set_position(downloaded.min(total));
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
        self.label = None;
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg} {bar:28.cyan/blue} {human_bytes:>9} / {human_total:>9} ({percent:>3}%) @ {binary_bytes_per_sec} ETA {eta}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("human_bytes", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{}", HumanBytes(state.pos()));
        })
        .with_key("human_total", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let value = state
                .len()
                .map_or_else(|| "?".to_string(), |len| HumanBytes(len).to_string());
            let _ = write!(w, "{value}");
        })
    }
}

// ============================================================================
// Plain Progress (non-terminal)
// ============================================================================

struct PlainProgress {
    label: Option<String>,
    last_emit: Instant,
    last_bytes: u64,
    /// Exponentially weighted average speed in bytes/sec
    ewa_speed: f64,
    done: bool,
}

impl PlainProgress {
    fn new() -> Self {
        Self {
            label: None,
            last_emit: Instant::now(),
            last_bytes: 0,
            ewa_speed: 0.0,
            done: false,
        }
    }

    fn update(&mut self, label: &str, downloaded: u64, total: u64) {
        const MIN_INTERVAL: Duration = Duration::from_millis(1000);

        let now = Instant::now();
        let new_file = self.label.as_deref() != Some(label);
        if new_file {
            self.label = Some(label.to_string());
            self.last_emit = now;
            self.last_bytes = 0;
            self.ewa_speed = 0.0;
            self.done = false;
        }

        let finished = total > 0 && downloaded >= total;
        if self.done || (!new_file && !finished && now.duration_since(self.last_emit) < MIN_INTERVAL) {
            return;
        }

        let elapsed_secs = now.duration_since(self.last_emit).as_secs_f64();
        let bytes_delta = downloaded.saturating_sub(self.last_bytes);
        #[allow(clippy::cast_precision_loss)]
        let instant_speed = if elapsed_secs > 0.0 {
            bytes_delta as f64 / elapsed_secs
        } else {
            0.0
        };
        self.ewa_speed = if self.ewa_speed > 0.0 {
            EWA_SMOOTHING.mul_add(instant_speed, (1.0 - EWA_SMOOTHING) * self.ewa_speed)
        } else {
            instant_speed
        };

        self.last_emit = now;
        self.last_bytes = downloaded;
        self.done = finished;

        eprintln!("{}", self.render(label, downloaded, total));
    }

    fn render(&self, label: &str, downloaded: u64, total: u64) -> String {
        let (down_div, down_unit) = pick_display_unit(downloaded);
        let (total_div, total_unit) = pick_display_unit(total);

        #[allow(clippy::cast_precision_loss)]
        let downloaded_str = format_scaled(downloaded as f64 / down_div, down_unit, downloaded);
        #[allow(clippy::cast_precision_loss)]
        let total_str = format_scaled(total as f64 / total_div, total_unit, total);

        #[allow(clippy::cast_precision_loss)]
        let percent = if total > 0 {
            (downloaded as f64 / total as f64) * 100.0
        } else {
            100.0
        };
        let speed_mib = self.ewa_speed / (1024.0 * 1024.0);

        format!(
            "{}: {downloaded_str} {down_unit} / {total_str} {total_unit} ({percent:5.1}%) @ {speed_mib:5.1} MiB/s",
            format_label(label)
        )
    }

    fn finish(&mut self) {
        self.label = None;
        self.done = false;
    }
}

// ============================================================================
// Display Helpers
// ============================================================================

/// Shorten long labels, keeping the end (the file name) visible.
fn format_label(raw: &str) -> String {
    let char_count = raw.chars().count();
    if char_count <= MAX_LABEL {
        return raw.to_string();
    }
    let tail: String = raw.chars().skip(char_count - (MAX_LABEL - 1)).collect();
    format!("…{tail}")
}

/// Select the appropriate display unit based on the reference value.
#[allow(clippy::cast_precision_loss)]
const fn pick_display_unit(reference: u64) -> (f64, &'static str) {
    if reference >= GIB {
        (GIB as f64, "GiB")
    } else if reference >= MIB {
        (MIB as f64, "MiB")
    } else if reference >= KIB {
        (KIB as f64, "KiB")
    } else {
        (1.0, "B")
    }
}

/// Format a scaled value with appropriate precision.
fn format_scaled(value: f64, unit: &str, raw: u64) -> String {
    if unit == "B" {
        return raw.to_string();
    }

    if value >= 100.0 {
        format!("{value:.1}")
    } else if value >= 10.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.3}")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_display_unit() {
        assert_eq!(pick_display_unit(500).1, "B");
        assert_eq!(pick_display_unit(2 * KIB).1, "KiB");
        assert_eq!(pick_display_unit(50 * MIB).1, "MiB");
        assert_eq!(pick_display_unit(2 * GIB).1, "GiB");
    }

    #[test]
    fn test_format_scaled() {
        assert_eq!(format_scaled(123.0, "B", 123), "123");
        assert_eq!(format_scaled(150.54, "MiB", 0), "150.5");
        assert_eq!(format_scaled(0.5, "MiB", 0), "0.500");
    }

    #[test]
    fn test_format_label_keeps_file_name() {
        assert_eq!(format_label("a.pgn.gz"), "a.pgn.gz");

        let long = format!("{}/games.pgn.gz", "d".repeat(60));
        let label = format_label(&long);
        assert_eq!(label.chars().count(), MAX_LABEL);
        assert!(label.starts_with('…'));
        assert!(label.ends_with("games.pgn.gz"));
    }

    #[test]
    fn test_plain_render_line() {
        let plain = PlainProgress::new();
        let line = plain.render("r/a.pgn.gz", 512 * KIB, MIB);
        assert!(line.starts_with("r/a.pgn.gz: 512.0 KiB / 1.000 MiB"));
        assert!(line.contains("50.0%"));
    }

    #[test]
    fn test_callback_reaches_printer() {
        let (printer, callback) = CliProgressPrinter::new().into_callback();
        callback("a.pgn.gz", 1, 2);
        callback("a.pgn.gz", 2, 2);
        printer.lock().unwrap().finish();
    }
}
