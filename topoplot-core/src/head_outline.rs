use std::f64::consts::TAU;

use crate::geometry::compute_disc_with;
use crate::process::{Draw, PlotProps};
use crate::settings::PlotSettings;
use crate::surface::DrawContext;

/// Head circle with a nose marker on top, stroked on every update.
pub struct HeadOutlineProcess {
    settings: PlotSettings,
}

impl HeadOutlineProcess {
    pub fn new(settings: &PlotSettings) -> Self {
        Self { settings: settings.clone() }
    }
}

impl Draw for HeadOutlineProcess {
    fn update(&mut self, ctx: &mut dyn DrawContext, _props: &PlotProps) {
        let (width, height) = ctx.size();
        let disc = compute_disc_with(width, height, &self.settings);
        if disc.is_degenerate() {
            return;
        }
        let (cx, cy, r) = (disc.center_x, disc.center_y, disc.radius);

        ctx.set_stroke_style(&self.settings.stroke_style);
        ctx.set_line_width(self.settings.line_width);

        ctx.begin_path();
        ctx.arc(cx, cy, r, 0.0, TAU);
        ctx.stroke();

        // Base corners sit on the circle so the nose meets the outline.
        let half = (self.settings.nose_half_width * r).min(r);
        let base_y = cy - (r * r - half * half).sqrt();
        let tip_y = cy - r - self.settings.nose_height * r;
        ctx.begin_path();
        ctx.move_to(cx - half, base_y);
        ctx.line_to(cx, tip_y);
        ctx.line_to(cx + half, base_y);
        ctx.stroke();
    }
}
