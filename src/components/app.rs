use std::sync::Arc;

use leptos::prelude::*;
use serde::Deserialize;
use topoplot_core::{ColorStop, Electrode, ElectrodeSeries, PlotSettings};

use crate::components::topo_plot::{PlotState, TopoPlot};

/// Bundled plot configuration: layout settings plus the colormap.
#[derive(Debug, Deserialize)]
struct PlotConfig {
    #[serde(default)]
    settings: PlotSettings,
    color_map: Vec<ColorStop>,
}

const DEFAULT_CONFIG: &str = r##"{
    "color_map": [
        { "t": 0.0, "color": "#313695" },
        { "t": 0.25, "color": "#74add1" },
        { "t": 0.5, "color": "#ffffbf" },
        { "t": 0.75, "color": "#f46d43" },
        { "t": 1.0, "color": "#a50026" }
    ]
}"##;

/// Approximate 10-20 positions, nose up (negative y is frontal).
const MONTAGE: &[(&str, f64, f64)] = &[
    ("Fp1", -0.3, -0.85), ("Fp2", 0.3, -0.85),
    ("F7", -0.7, -0.5), ("F3", -0.35, -0.45), ("Fz", 0.0, -0.4), ("F4", 0.35, -0.45), ("F8", 0.7, -0.5),
    ("T7", -0.85, 0.0), ("C3", -0.42, 0.0), ("Cz", 0.0, 0.0), ("C4", 0.42, 0.0), ("T8", 0.85, 0.0),
    ("P7", -0.7, 0.5), ("P3", -0.35, 0.45), ("Pz", 0.0, 0.4), ("P4", 0.35, 0.45), ("P8", 0.7, 0.5),
    ("O1", -0.3, 0.85), ("O2", 0.3, 0.85),
];

fn bump(f: f64, center: f64, width: f64) -> f64 {
    (-((f - center) / width).powi(2) / 2.0).exp()
}

/// Synthetic spectra: occipital alpha around 10 Hz, frontal theta around 6 Hz.
fn demo_series() -> Option<ElectrodeSeries> {
    let frequencies: Vec<f64> = (1..=40).map(f64::from).collect();
    let electrodes = MONTAGE
        .iter()
        .map(|&(name, x, y)| {
            let posterior = (y + 1.0) / 2.0;
            let values = frequencies
                .iter()
                .map(|&f| 2.0 * posterior * bump(f, 10.0, 1.5) + (1.0 - posterior) * bump(f, 6.0, 1.5) - 0.2)
                .collect();
            Electrode { name: name.to_string(), position: [x, y], values }
        })
        .collect();

    match ElectrodeSeries::new("Power", "µV²/Hz", frequencies, electrodes) {
        Ok(series) => Some(series),
        Err(e) => {
            log::error!("demo series: {e}");
            None
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config: PlotConfig = match serde_json::from_str(DEFAULT_CONFIG) {
        Ok(c) => c,
        Err(e) => {
            log::error!("bad plot config: {e}");
            PlotConfig { settings: PlotSettings::default(), color_map: Vec::new() }
        }
    };
    let cursor_freq = RwSignal::new(Some(10.0));
    let plot_state = Signal::stored(demo_series().map(|s| PlotState { data: Arc::new(s) }));

    view! {
        <div class="app">
            <div class="toolbar">
                <input
                    type="range" min="1" max="40" step="0.5" value="10"
                    on:input=move |ev| cursor_freq.set(event_target_value(&ev).parse::<f64>().ok())
                />
                <span>{move || match cursor_freq.get() {
                    Some(f) => format!("{f:.1} Hz"),
                    None => "-".into(),
                }}</span>
            </div>
            <TopoPlot
                cursor_freq=cursor_freq
                plot_state=plot_state
                color_map=config.color_map
                settings=config.settings
            />
        </div>
    }
}
