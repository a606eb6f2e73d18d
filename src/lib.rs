//! Browser front end for the topographic plot: a canvas-backed drawing
//! surface and Leptos components around the `topoplot-core` pipeline.

pub mod canvas;
pub mod components;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(components::app::App);
}
