use crate::color::ColorStop;
use crate::geometry::compute_disc_with;
use crate::label::format_rounded;
use crate::process::{Draw, PlotProps};
use crate::settings::PlotSettings;
use crate::surface::{DrawContext, LinearGradient, TextAlign, TextBaseline};

/// Gradient for the legend bar, running bottom (`y_bottom`) to top (`y_top`).
///
/// Stop `i` of `n` is placed at `(i + 0.5) / n`, the middle of its band, so
/// the end colors are not squeezed into the bar's edges.
pub fn legend_gradient(stops: &[ColorStop], x: f64, y_top: f64, y_bottom: f64) -> LinearGradient {
    let mut gradient = LinearGradient::new(x, y_bottom, x, y_top);
    let count = stops.len() as f64;
    for (i, stop) in stops.iter().enumerate() {
        gradient.add_color_stop((i as f64 + 0.5) / count, &stop.color);
    }
    gradient
}

/// Vertical legend to the right of the disc: gradient bar, max label at the
/// top, min label at the bottom, and the unit caption underneath.
pub struct ColorbarProcess {
    settings: PlotSettings,
}

impl ColorbarProcess {
    pub fn new(settings: &PlotSettings) -> Self {
        Self { settings: settings.clone() }
    }
}

impl Draw for ColorbarProcess {
    fn update(&mut self, ctx: &mut dyn DrawContext, props: &PlotProps) {
        let (width, height) = ctx.size();
        let disc = compute_disc_with(width, height, &self.settings);
        let layout = &self.settings.colorbar;
        let x = disc.center_x + disc.radius + layout.left;
        let y = disc.center_y - disc.radius + layout.top;
        let w = layout.width;
        let h = 2.0 * disc.radius;

        if !props.color_map.is_empty() {
            let gradient = legend_gradient(&props.color_map, x, y, y + h);
            ctx.fill_gradient_rect(&gradient, x, y, w, h);
        }
        ctx.set_stroke_style(&self.settings.stroke_style);
        ctx.set_line_width(self.settings.line_width);
        ctx.stroke_rect(x, y, w, h);

        let extent = props.data.extent();
        let text_x = x + w + layout.label_gap;
        ctx.set_font(&self.settings.font);
        ctx.set_fill_style(&self.settings.text_style);
        ctx.set_text_align(TextAlign::Left);
        ctx.set_text_baseline(TextBaseline::Top);
        ctx.fill_text(&format_rounded(extent.max, 2), text_x, y);
        ctx.set_text_baseline(TextBaseline::Bottom);
        ctx.fill_text(&format_rounded(extent.min, 2), text_x, y + h);

        ctx.set_text_align(TextAlign::Center);
        ctx.set_text_baseline(TextBaseline::Top);
        ctx.fill_text(props.data.units(), x + w / 2.0, y + h + layout.label_gap);
    }
}
