//! In-memory RGB canvas.

use tracing::debug;

const BACKGROUND: [u8; 3] = [255, 255, 255];

/// An owned RGB8 pixel buffer.
///
/// The buffer is freed when the canvas is dropped, whichever way rendering
/// or encoding ends.
pub struct Canvas {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Allocate a white canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 3;
        debug!(width, height, bytes = len, "allocated canvas");
        Self {
            pixels: vec![255; len],
            width,
            height,
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Bounding box `(left, top, right, bottom)` of non-background pixels,
    /// inclusive. `None` for a blank canvas.
    pub fn content_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let width = self.width as usize;
        let mut bounds: Option<(usize, usize, usize, usize)> = None;

        for (y, row) in self.pixels.chunks_exact(width * 3).enumerate() {
            let mut xs = row
                .chunks_exact(3)
                .enumerate()
                .filter(|(_, px)| **px != BACKGROUND)
                .map(|(x, _)| x);
            let Some(first) = xs.next() else {
                continue;
            };
            let last = xs.last().unwrap_or(first);
            bounds = Some(match bounds {
                None => (first, y, last, y),
                Some((l, t, r, _)) => (l.min(first), t, r.max(last), y),
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        bounds.map(|(l, t, r, b)| (l as u32, t as u32, r as u32, b as u32))
    }

    /// Crop to the content plus `pad` pixels on every side, clamped to the
    /// canvas. A blank canvas is returned unchanged.
    #[must_use]
    pub fn trimmed(self, pad: u32) -> Self {
        let Some((left, top, right, bottom)) = self.content_bounds() else {
            return self;
        };

        let left = left.saturating_sub(pad);
        let top = top.saturating_sub(pad);
        let right = right.saturating_add(pad).min(self.width - 1);
        let bottom = bottom.saturating_add(pad).min(self.height - 1);
        let width = right - left + 1;
        let height = bottom - top + 1;
        if width == self.width && height == self.height {
            return self;
        }

        let stride = self.width as usize * 3;
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for y in top..=bottom {
            let start = y as usize * stride + left as usize * 3;
            pixels.extend_from_slice(&self.pixels[start..start + width as usize * 3]);
        }
        debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "trimmed canvas"
        );

        Self {
            pixels,
            width,
            height,
        }
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        debug!(width = self.width, height = self.height, "released canvas");
    }
}
