//! Embedded font registration.
//!
//! The bitmap backend has no access to system fonts, so DejaVu Sans is
//! compiled in and registered as the `sans-serif` family once per process.

use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};

use crate::error::{PlotError, PlotResult};

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Make `FontFamily::SansSerif` available to the renderer.
pub fn ensure_fonts() -> PlotResult<()> {
    let ok = *REGISTERED
        .get_or_init(|| register_font("sans-serif", FontStyle::Normal, DEJAVU_SANS).is_ok());
    if ok { Ok(()) } else { Err(PlotError::Font) }
}
