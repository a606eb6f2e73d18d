//! Interpolated disc heatmap with a per-frequency pixel cache.
//!
//! Filling the buffer samples the data series once per pixel inside the
//! disc, which is by far the most expensive part of a redraw. The filled
//! buffer is kept and blitted unchanged for as long as the requested
//! frequency stays the same.

use crate::colormap::ColorMap;
use crate::geometry::{compute_disc_with, BoundingBox, Disc};
use crate::process::{Draw, PlotProps};
use crate::settings::PlotSettings;
use crate::surface::DrawContext;

/// Packed RGBA pixels for the disc's bounding box.
pub struct PixelBuffer {
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(len: usize) -> Self {
        Self { pixels: vec![0; len] }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// The same memory viewed as RGBA bytes, ready for ImageData.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

struct Layout {
    disc: Disc,
    hbox: BoundingBox,
    buffer: PixelBuffer,
    color_map: ColorMap,
}

pub struct HeatmapProcess {
    settings: PlotSettings,
    layout: Option<Layout>,
    /// Frequency the buffer was last filled for.
    frequency: Option<f64>,
    fills: usize,
}

impl HeatmapProcess {
    pub fn new(settings: &PlotSettings) -> Self {
        Self {
            settings: settings.clone(),
            layout: None,
            frequency: None,
            fills: 0,
        }
    }

    pub fn frequency(&self) -> Option<f64> {
        self.frequency
    }

    /// Number of times the buffer has been recomputed.
    pub fn fill_count(&self) -> usize {
        self.fills
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.layout.as_ref().map(|l| l.hbox)
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.layout.as_ref().map(|l| &l.buffer)
    }

    fn fill(layout: &mut Layout, props: &PlotProps, neighborhood: usize, frequency: f64) -> usize {
        let Layout { disc, hbox, buffer, color_map } = layout;
        if disc.is_degenerate() {
            return 0;
        }
        let extent = props.data.extent();
        color_map.set_domain(extent.min, extent.max);

        let mut written = 0;
        for (i, pixel) in buffer.pixels_mut().iter_mut().enumerate() {
            let (x, y) = hbox.pixel_position(i);
            let Some([px, py]) = disc.normalize(x, y) else {
                continue;
            };
            if px * px + py * py < 1.0 {
                let sample = props.data.interpolate(neighborhood, frequency, [px, py]);
                *pixel = color_map.interpolate(sample);
                written += 1;
            }
        }
        written
    }

    fn blit(layout: &Layout, ctx: &mut dyn DrawContext) {
        let hbox = layout.hbox;
        ctx.put_pixels(layout.buffer.as_bytes(), hbox.left, hbox.top, hbox.width, hbox.height);
    }
}

impl Draw for HeatmapProcess {
    fn init(&mut self, ctx: &mut dyn DrawContext, props: &PlotProps) {
        let (width, height) = ctx.size();
        let disc = compute_disc_with(width, height, &self.settings);
        let hbox = disc.bounding_box();
        self.layout = Some(Layout {
            disc,
            hbox,
            buffer: PixelBuffer::new(hbox.pixel_count()),
            color_map: ColorMap::new(&props.color_map, self.settings.color_buckets),
        });
        self.frequency = None;
        log::debug!("heatmap buffer {}x{} for radius {:.1}", hbox.width, hbox.height, disc.radius);
    }

    fn update(&mut self, ctx: &mut dyn DrawContext, props: &PlotProps) {
        let Some(frequency) = props.cursor_freq else {
            return;
        };
        let Some(layout) = self.layout.as_mut() else {
            log::warn!("heatmap updated before init");
            return;
        };

        if self.frequency == Some(frequency) {
            log::trace!("heatmap cache hit at {frequency}");
            Self::blit(layout, ctx);
            return;
        }

        self.frequency = Some(frequency);
        let written = Self::fill(layout, props, self.settings.neighborhood, frequency);
        self.fills += 1;
        log::debug!("heatmap filled {written} pixels at {frequency}");
        Self::blit(layout, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorStop, Rgba};
    use crate::series::{DataSeries, Extent};
    use crate::surface::RecordingSurface;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Value depends on frequency only; counts samples taken.
    struct CountingSeries {
        calls: AtomicUsize,
    }

    impl DataSeries for CountingSeries {
        fn extent(&self) -> Extent {
            Extent::new(0.0, 20.0)
        }
        fn units(&self) -> &str {
            "µV"
        }
        fn label(&self) -> &str {
            "count"
        }
        fn interpolate(&self, _n: usize, frequency: f64, _p: [f64; 2]) -> f64 {
            self.calls.fetch_add(1, Ordering::Relaxed);
            frequency
        }
    }

    fn setup(freq: Option<f64>) -> (Arc<CountingSeries>, PlotProps) {
        let series = Arc::new(CountingSeries { calls: AtomicUsize::new(0) });
        let props = PlotProps {
            cursor_freq: freq,
            color_map: vec![ColorStop::new(0.0, "#000"), ColorStop::new(1.0, "#fff")],
            data: series.clone(),
        };
        (series, props)
    }

    fn mounted(props: &PlotProps, surface: &mut RecordingSurface) -> HeatmapProcess {
        let mut heatmap = HeatmapProcess::new(&PlotSettings::default());
        heatmap.init(surface, props);
        heatmap
    }

    #[test]
    fn test_same_frequency_fills_once() {
        let mut surface = RecordingSurface::new(120.0, 120.0);
        let (series, props) = setup(Some(10.0));
        let mut heatmap = mounted(&props, &mut surface);

        heatmap.update(&mut surface, &props);
        let after_first = series.calls.load(Ordering::Relaxed);
        assert!(after_first > 0);
        heatmap.update(&mut surface, &props);
        assert_eq!(series.calls.load(Ordering::Relaxed), after_first);
        assert_eq!(heatmap.fill_count(), 1);

        let blits = surface.blits();
        assert_eq!(blits.len(), 2);
        assert_eq!(blits[0], blits[1]);
    }

    #[test]
    fn test_new_frequency_recomputes() {
        let mut surface = RecordingSurface::new(120.0, 120.0);
        let (series, mut props) = setup(Some(5.0));
        let mut heatmap = mounted(&props, &mut surface);

        heatmap.update(&mut surface, &props);
        let after_first = series.calls.load(Ordering::Relaxed);
        props.cursor_freq = Some(15.0);
        heatmap.update(&mut surface, &props);

        assert_eq!(series.calls.load(Ordering::Relaxed), after_first * 2);
        assert_eq!(heatmap.frequency(), Some(15.0));
        let blits = surface.blits();
        assert_ne!(blits[0], blits[1]);
    }

    #[test]
    fn test_missing_frequency_draws_nothing() {
        let mut surface = RecordingSurface::new(120.0, 120.0);
        let (series, props) = setup(None);
        let mut heatmap = mounted(&props, &mut surface);
        heatmap.update(&mut surface, &props);
        assert!(surface.commands().is_empty());
        assert_eq!(series.calls.load(Ordering::Relaxed), 0);
        assert_eq!(heatmap.frequency(), None);
    }

    #[test]
    fn test_pixels_outside_disc_are_never_written() {
        let mut surface = RecordingSurface::new(120.0, 120.0);
        let (_, props) = setup(Some(20.0));
        let mut heatmap = mounted(&props, &mut surface);
        heatmap.update(&mut surface, &props);

        let hbox = heatmap.bounding_box().unwrap();
        let disc = compute_disc_with(120.0, 120.0, &PlotSettings::default());
        let white = Rgba::rgb(255, 255, 255).pack();
        let pixels = heatmap.buffer().unwrap().pixels();
        let mut inside = 0;
        for (i, &p) in pixels.iter().enumerate() {
            let (x, y) = hbox.pixel_position(i);
            let [px, py] = disc.normalize(x, y).unwrap();
            if px * px + py * py >= 1.0 {
                assert_eq!(p, 0, "pixel {i} outside the disc was written");
            } else {
                assert_eq!(p, white);
                inside += 1;
            }
        }
        assert!(inside > 0);
        // Corners of the bounding box are always outside.
        assert_eq!(pixels[0], 0);
    }

    #[test]
    fn test_refill_leaves_outside_pixels_untouched() {
        let mut surface = RecordingSurface::new(120.0, 120.0);
        let (_, mut props) = setup(Some(1.0));
        let mut heatmap = mounted(&props, &mut surface);
        heatmap.layout.as_mut().unwrap().buffer.pixels_mut()[0] = 0xdead_beef;

        heatmap.update(&mut surface, &props);
        props.cursor_freq = Some(2.0);
        heatmap.update(&mut surface, &props);

        assert_eq!(heatmap.fill_count(), 2);
        assert_eq!(heatmap.buffer().unwrap().pixels()[0], 0xdead_beef);
    }

    #[test]
    fn test_samples_inside_disc_only() {
        let mut surface = RecordingSurface::new(120.0, 120.0);
        let (series, props) = setup(Some(1.0));
        let mut heatmap = mounted(&props, &mut surface);
        heatmap.update(&mut surface, &props);
        let total = heatmap.bounding_box().unwrap().pixel_count();
        let sampled = series.calls.load(Ordering::Relaxed);
        // Disc covers about pi/4 of its bounding square.
        assert!(sampled < total);
        let ratio = sampled as f64 / total as f64;
        assert!((ratio - std::f64::consts::FRAC_PI_4).abs() < 0.05, "ratio {ratio}");
    }

    #[test]
    fn test_degenerate_surface_skips_sampling() {
        let mut surface = RecordingSurface::new(0.0, 0.0);
        let (series, props) = setup(Some(3.0));
        let mut heatmap = mounted(&props, &mut surface);
        heatmap.update(&mut surface, &props);
        assert_eq!(series.calls.load(Ordering::Relaxed), 0);
        assert_eq!(surface.blits().len(), 1);
    }

    #[test]
    fn test_blit_is_byte_view_of_buffer() {
        let mut surface = RecordingSurface::new(60.0, 60.0);
        let (_, props) = setup(Some(20.0));
        let mut heatmap = mounted(&props, &mut surface);
        heatmap.update(&mut surface, &props);
        let hbox = heatmap.bounding_box().unwrap();
        assert_eq!(surface.blits()[0].len(), hbox.pixel_count() * 4);
        assert_eq!(surface.blits()[0], heatmap.buffer().unwrap().as_bytes());
    }

    #[test]
    fn test_byte_view_is_rgba_order() {
        let mut buffer = PixelBuffer::new(2);
        buffer.pixels_mut()[1] = Rgba { r: 1, g: 2, b: 3, a: 4 }.pack();
        assert_eq!(buffer.as_bytes(), &[0, 0, 0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_update_before_init_is_ignored() {
        let mut surface = RecordingSurface::new(60.0, 60.0);
        let (_, props) = setup(Some(1.0));
        let mut heatmap = HeatmapProcess::new(&PlotSettings::default());
        heatmap.update(&mut surface, &props);
        assert!(surface.commands().is_empty());
    }
}
