//! The full plot: heatmap, head outline, colorbar and label in one chain.

use crate::colorbar::ColorbarProcess;
use crate::head_outline::HeadOutlineProcess;
use crate::heatmap::HeatmapProcess;
use crate::label::LabelProcess;
use crate::process::{DrawProcess, PlotProps};
use crate::settings::PlotSettings;
use crate::surface::DrawContext;

/// What the host has to show: nothing loaded yet, or a series to plot.
#[derive(Clone, Debug)]
pub enum PlotView {
    NoData,
    Ready(PlotProps),
}

/// Heatmap first so its blit never covers the vector strokes drawn after it.
pub fn standard_process(settings: &PlotSettings) -> DrawProcess {
    DrawProcess::new(HeatmapProcess::new(settings))
        .chain(&DrawProcess::new(HeadOutlineProcess::new(settings)))
        .chain(&DrawProcess::new(ColorbarProcess::new(settings)))
        .chain(&DrawProcess::new(LabelProcess::new(settings)))
}

/// Runs a draw process over the mount/redraw lifecycle of one surface.
pub struct Compositor {
    process: DrawProcess,
    mounted: bool,
}

impl Compositor {
    pub fn new(settings: &PlotSettings) -> Self {
        Self::with_process(standard_process(settings))
    }

    pub fn with_process(process: DrawProcess) -> Self {
        Self { process, mounted: false }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// First draw: initialize every step once, then update.
    pub fn mount(&mut self, ctx: &mut dyn DrawContext, props: &PlotProps) {
        let (w, h) = ctx.size();
        log::debug!("mounting plot on {w}x{h} surface");
        self.process.initialize(ctx, props).update(ctx, props);
        self.mounted = true;
    }

    /// Later draws: clear the surface and update. Mounts on first use.
    pub fn redraw(&mut self, ctx: &mut dyn DrawContext, props: &PlotProps) {
        if !self.mounted {
            self.mount(ctx, props);
            return;
        }
        ctx.clear();
        self.process.update(ctx, props);
    }

    /// Dispatch on the view. Returns whether the plot was drawn; `NoData`
    /// leaves the surface to the host's placeholder.
    pub fn render(&mut self, ctx: &mut dyn DrawContext, view: &PlotView) -> bool {
        match view {
            PlotView::NoData => false,
            PlotView::Ready(props) => {
                self.redraw(ctx, props);
                true
            }
        }
    }
}
