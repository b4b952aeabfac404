//! PNG persistence.
//!
//! The image is encoded into a temporary file next to the destination and
//! renamed over it once complete; a failed run leaves any previous image
//! untouched.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{PlotError, PlotResult};
use crate::render::Canvas;

/// Encode `canvas` as an RGB PNG carrying `pixels_per_meter` and write it
/// to `path`.
pub fn write_png(canvas: &Canvas, path: &Path, pixels_per_meter: u32) -> PlotResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PlotError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode_png(canvas, pixels_per_meter, &mut writer)?;
        writer.flush().map_err(|e| PlotError::io(path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| PlotError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| PlotError::io(path, e.error))?;

    info!(
        path = %path.display(),
        width = canvas.width(),
        height = canvas.height(),
        "wrote plot"
    );
    Ok(())
}

/// Encode `canvas` as PNG into `out`.
pub fn encode_png<W: Write>(canvas: &Canvas, pixels_per_meter: u32, out: W) -> PlotResult<()> {
    let mut encoder = png::Encoder::new(out, canvas.width(), canvas.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_meter,
        yppu: pixels_per_meter,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(canvas.pixels())?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_png_carries_dpi() {
        let canvas = Canvas::new(3, 2);
        let mut bytes = Vec::new();
        encode_png(&canvas, 11_811, &mut bytes).unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        let dims = info.pixel_dims.unwrap();
        assert_eq!(dims.xppu, 11_811);
        assert_eq!(dims.unit, png::Unit::Meter);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.png");
        std::fs::write(&path, b"stale").unwrap();

        write_png(&Canvas::new(4, 4), &path, 3_937).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("plot.png");

        let result = write_png(&Canvas::new(1, 1), &path, 3_937);

        assert!(matches!(result, Err(PlotError::Io { .. })));
    }
}
