use crate::geometry::compute_disc_with;
use crate::process::{Draw, PlotProps};
use crate::settings::PlotSettings;
use crate::surface::{DrawContext, TextAlign, TextBaseline};

/// Round to `places` decimals and print without trailing zeros.
pub fn format_rounded(value: f64, places: i32) -> String {
    let scale = 10f64.powi(places);
    let rounded = (value * scale).round() / scale;
    // Avoid printing "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Series label plus the selected frequency, e.g. `Ch1 10 Hz`.
pub fn label_text(label: &str, frequency: Option<f64>, unit: &str) -> String {
    match frequency {
        Some(f) => format!("{label} {} {unit}", format_rounded(f, 3)),
        None => label.to_string(),
    }
}

/// Text label left of and below the disc.
pub struct LabelProcess {
    settings: PlotSettings,
}

impl LabelProcess {
    pub fn new(settings: &PlotSettings) -> Self {
        Self { settings: settings.clone() }
    }
}

impl Draw for LabelProcess {
    fn update(&mut self, ctx: &mut dyn DrawContext, props: &PlotProps) {
        let (width, height) = ctx.size();
        let disc = compute_disc_with(width, height, &self.settings);
        let x = disc.center_x - disc.radius + self.settings.label.left;
        let y = disc.center_y + disc.radius + self.settings.label.below;

        let text = label_text(props.data.label(), props.cursor_freq, &self.settings.frequency_unit);
        ctx.set_font(&self.settings.font);
        ctx.set_fill_style(&self.settings.text_style);
        ctx.set_text_align(TextAlign::Left);
        ctx.set_text_baseline(TextBaseline::Alphabetic);
        ctx.fill_text(&text, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use crate::test_support::ConstSeries;
    use std::sync::Arc;

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(2.0, 2), "2");
        assert_eq!(format_rounded(-1.0, 2), "-1");
        assert_eq!(format_rounded(1.23456, 2), "1.23");
        assert_eq!(format_rounded(10.12345, 3), "10.123");
        assert_eq!(format_rounded(-0.001, 2), "0");
    }

    #[test]
    fn test_label_text() {
        assert_eq!(label_text("Ch1", Some(10.0), "Hz"), "Ch1 10 Hz");
        assert_eq!(label_text("Ch1", Some(7.12345), "Hz"), "Ch1 7.123 Hz");
        assert_eq!(label_text("Ch1", None, "Hz"), "Ch1");
    }

    #[test]
    fn test_label_is_left_and_below_disc() {
        let mut surface = RecordingSurface::new(300.0, 300.0);
        let props = PlotProps { cursor_freq: Some(12.5), color_map: Vec::new(), data: Arc::new(ConstSeries(0.0)) };
        LabelProcess::new(&PlotSettings::default()).update(&mut surface, &props);

        let disc = compute_disc_with(300.0, 300.0, &PlotSettings::default());
        let drawn = surface.commands().iter().find_map(|c| match c {
            DrawCommand::FillText { text, x, y } => Some((text.clone(), *x, *y)),
            _ => None,
        });
        let (text, x, y) = drawn.unwrap();
        assert_eq!(text, "const 12.5 Hz");
        assert!(x < disc.center_x - disc.radius);
        assert!(y > disc.center_y + disc.radius);
    }
}
