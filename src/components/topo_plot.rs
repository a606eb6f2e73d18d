use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use topoplot_core::{ColorStop, Compositor, DataSeries, PlotProps, PlotSettings};
use web_sys::HtmlCanvasElement;

use crate::canvas::web_canvas::WebCanvas;

/// Plot input owned by the host. `None` in the component prop means no data
/// is loaded and a placeholder is shown instead of the canvas.
#[derive(Clone)]
pub struct PlotState {
    pub data: Arc<dyn DataSeries>,
}

/// A compositor bound to one canvas element and one data snapshot.
struct Mounted {
    canvas: WebCanvas,
    compositor: Compositor,
    data: Arc<dyn DataSeries>,
}

impl Mounted {
    fn is_for(&self, canvas: &HtmlCanvasElement, data: &Arc<dyn DataSeries>) -> bool {
        self.canvas.element() == canvas && Arc::ptr_eq(&self.data, data)
    }
}

#[component]
pub fn TopoPlot(
    #[prop(into)] cursor_freq: Signal<Option<f64>>,
    #[prop(into)] plot_state: Signal<Option<PlotState>>,
    color_map: Vec<ColorStop>,
    #[prop(optional)] settings: Option<PlotSettings>,
) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let settings = settings.unwrap_or_default();
    let mounted: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
    let has_data = Memo::new(move |_| plot_state.with(Option::is_some));

    // Mount on first draw (and whenever the canvas or the data snapshot is
    // replaced), then clear and redraw on every later change.
    Effect::new(move || {
        let freq = cursor_freq.get();
        let Some(state) = plot_state.get() else {
            mounted.borrow_mut().take();
            return;
        };
        let Some(canvas_el) = canvas_ref.get() else { return };
        let canvas_el: &HtmlCanvasElement = canvas_el.as_ref();

        let props = PlotProps {
            cursor_freq: freq,
            color_map: color_map.clone(),
            data: state.data.clone(),
        };

        let mut slot = mounted.borrow_mut();
        if let Some(m) = slot.as_mut().filter(|m| m.is_for(canvas_el, &state.data)) {
            m.compositor.redraw(&mut m.canvas, &props);
            return;
        }

        let Some(mut canvas) = WebCanvas::new(canvas_el.clone()) else {
            log::error!("canvas has no 2d context");
            return;
        };
        if !canvas.fit_to_display() {
            return;
        }
        let mut compositor = Compositor::new(&settings);
        compositor.mount(&mut canvas, &props);
        *slot = Some(Mounted { canvas, compositor, data: state.data });
    });

    view! {
        <div class="topo-plot">
            {move || {
                if has_data.get() {
                    view! { <canvas class="topo-plot-canvas" node_ref=canvas_ref /> }.into_any()
                } else {
                    view! { <div class="empty-state">"No data"</div> }.into_any()
                }
            }}
        </div>
    }
}
