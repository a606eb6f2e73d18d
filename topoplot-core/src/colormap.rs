//! Discretized color lookup built from a list of gradient stops.
//!
//! The gradient is sampled once into a small table of packed colors; the
//! per-pixel lookup is then a clamp, a multiply and an index.
//!
//! Stops are ordered by their `t` before sampling, so the table does not
//! depend on input order. The legend (`colorbar::legend_gradient`) ignores
//! `t` and places stops by list index, so the two agree only when the stops
//! are given evenly spaced and in order.

use crate::color::{ColorStop, Rgba};

/// Default table size used by the heatmap.
pub const DEFAULT_BUCKETS: usize = 40;

pub struct ColorMap {
    /// `lut[i]` is the gradient color at `i / (len - 1)`. Empty when no
    /// usable stops were given.
    lut: Vec<u32>,
    min: f64,
    max: f64,
}

impl ColorMap {
    /// Build the lookup table. Stops whose color fails to parse are skipped.
    pub fn new(stops: &[ColorStop], buckets: usize) -> Self {
        let mut parsed: Vec<(f64, Rgba)> = stops
            .iter()
            .filter_map(|stop| match Rgba::parse(&stop.color) {
                Ok(rgba) if stop.t.is_finite() => Some((stop.t.clamp(0.0, 1.0), rgba)),
                Ok(_) => {
                    log::warn!("skipping color stop with non-finite position {}", stop.t);
                    None
                }
                Err(e) => {
                    log::warn!("skipping color stop: {e}");
                    None
                }
            })
            .collect();
        parsed.sort_by(|a, b| a.0.total_cmp(&b.0));

        let lut = if parsed.is_empty() || buckets == 0 {
            Vec::new()
        } else {
            (0..buckets)
                .map(|i| {
                    let t = if buckets == 1 { 0.5 } else { i as f64 / (buckets - 1) as f64 };
                    sample_gradient(&parsed, t).pack()
                })
                .collect()
        };

        Self { lut, min: 0.0, max: 1.0 }
    }

    /// Set the sample range mapped onto the gradient.
    pub fn set_domain(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn bucket_count(&self) -> usize {
        self.lut.len()
    }

    /// Packed color for a sample. Transparent for NaN or an empty map.
    #[inline]
    pub fn interpolate(&self, sample: f64) -> u32 {
        if self.lut.is_empty() || sample.is_nan() {
            return Rgba::TRANSPARENT.pack();
        }
        let span = self.max - self.min;
        let t = if span.abs() > f64::EPSILON {
            ((sample - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let idx = (t * (self.lut.len() - 1) as f64).round() as usize;
        self.lut[idx.min(self.lut.len() - 1)]
    }
}

/// Evaluate a sorted, non-empty stop list at `t`.
fn sample_gradient(stops: &[(f64, Rgba)], t: f64) -> Rgba {
    let (first_t, first) = stops[0];
    if t <= first_t {
        return first;
    }
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let span = t1 - t0;
            let s = if span > 0.0 { (t - t0) / span } else { 1.0 };
            return c0.lerp(c1, s);
        }
    }
    stops[stops.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_map() -> ColorMap {
        ColorMap::new(&[ColorStop::new(0.0, "#000"), ColorStop::new(1.0, "#fff")], DEFAULT_BUCKETS)
    }

    #[test]
    fn test_bucket_count_and_ends() {
        let map = grey_map();
        assert_eq!(map.bucket_count(), 40);
        assert_eq!(Rgba::unpack(map.interpolate(0.0)), Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::unpack(map.interpolate(1.0)), Rgba::rgb(255, 255, 255));
    }

    #[test]
    fn test_out_of_range_clamps() {
        let map = grey_map();
        assert_eq!(map.interpolate(-3.0), map.interpolate(0.0));
        assert_eq!(map.interpolate(7.0), map.interpolate(1.0));
    }

    #[test]
    fn test_domain_rescales_samples() {
        let mut map = grey_map();
        map.set_domain(-1.0, 2.0);
        assert_eq!(map.interpolate(-1.0), grey_map().interpolate(0.0));
        assert_eq!(map.interpolate(2.0), grey_map().interpolate(1.0));
        let mid = Rgba::unpack(map.interpolate(0.5));
        assert!(mid.r > 100 && mid.r < 155, "mid grey was {}", mid.r);
    }

    #[test]
    fn test_values_are_discretized() {
        let map = grey_map();
        let distinct: std::collections::HashSet<u32> =
            (0..1000).map(|i| map.interpolate(i as f64 / 999.0)).collect();
        assert_eq!(distinct.len(), 40);
    }

    #[test]
    fn test_empty_stops_never_fail() {
        let map = ColorMap::new(&[], DEFAULT_BUCKETS);
        assert_eq!(map.bucket_count(), 0);
        assert_eq!(map.interpolate(0.3), 0);
    }

    #[test]
    fn test_invalid_stops_are_skipped() {
        let map = ColorMap::new(
            &[ColorStop::new(0.0, "not-a-color"), ColorStop::new(1.0, "#f00")],
            8,
        );
        assert_eq!(Rgba::unpack(map.interpolate(0.0)), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_unsorted_stops_are_ordered_by_position() {
        let map = ColorMap::new(&[ColorStop::new(1.0, "#fff"), ColorStop::new(0.0, "#000")], 2);
        assert_eq!(Rgba::unpack(map.interpolate(0.0)), Rgba::rgb(0, 0, 0));
    }

    #[test]
    fn test_nan_is_transparent() {
        assert_eq!(grey_map().interpolate(f64::NAN), Rgba::TRANSPARENT.pack());
    }
}
