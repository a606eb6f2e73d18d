//! Disc geometry derived from the drawing surface size.
//!
//! The disc sits in the upper-left third of the surface so the colorbar and
//! label have room to its right and below it.

use crate::settings::PlotSettings;

/// Center and radius of the plotted disc, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Disc {
    /// True when the disc covers no pixels (zero-area surface).
    pub fn is_degenerate(&self) -> bool {
        self.radius.is_nan() || self.radius <= 0.0
    }

    /// Square bounding box of the disc: `ceil(2r) + 1` pixels on a side,
    /// anchored at `(cx - r, cy - r)`.
    pub fn bounding_box(&self) -> BoundingBox {
        let side = (2.0 * self.radius.max(0.0)).ceil() as usize + 1;
        BoundingBox {
            left: self.center_x - self.radius,
            top: self.center_y - self.radius,
            width: side,
            height: side,
        }
    }

    /// Map a surface pixel to normalized disc coordinates, where the unit
    /// circle is the disc edge. `None` for a degenerate disc.
    pub fn normalize(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        if self.is_degenerate() {
            return None;
        }
        Some([
            (x - self.center_x) / self.radius,
            (y - self.center_y) / self.radius,
        ])
    }
}

/// Pixel-aligned rectangle covering the disc. `left`/`top` may be fractional.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: usize,
    pub height: usize,
}

impl BoundingBox {
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Surface position of buffer index `i`.
    ///
    /// The buffer is addressed relative to `height`: `x = i % height`,
    /// `y = i / height`. Width and height are equal by construction, so this
    /// is a square buffer, but the convention must not be swapped for
    /// row-major-by-width or the heatmap transposes.
    #[inline]
    pub fn pixel_position(&self, i: usize) -> (f64, f64) {
        (
            self.left + (i % self.height) as f64,
            self.top + (i / self.height) as f64,
        )
    }
}

/// Derive the disc from the surface size using the default layout.
pub fn compute_disc(width: f64, height: f64) -> Disc {
    compute_disc_with(width, height, &PlotSettings::default())
}

/// Derive the disc: `radius = min(|w|, |h|) / divisor`, center at
/// `(w / 3, h / 3 + offset_y)`.
pub fn compute_disc_with(width: f64, height: f64, settings: &PlotSettings) -> Disc {
    let radius = if settings.radius_divisor > 0.0 {
        (width.abs().min(height.abs()) / settings.radius_divisor).max(0.0)
    } else {
        0.0
    };
    Disc {
        center_x: width / 3.0,
        center_y: height / 3.0 + settings.center_offset_y,
        radius: if radius.is_finite() { radius } else { 0.0 },
    }
}
