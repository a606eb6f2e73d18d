//! Rendering core for circular topographic plots.
//!
//! A plot is a chain of [`process::DrawProcess`] steps drawn onto any
//! [`surface::DrawContext`]: an interpolated heatmap clipped to a disc, a
//! head outline, a color legend and a frequency label.

pub mod color;
pub mod colorbar;
pub mod colormap;
pub mod compositor;
pub mod geometry;
pub mod head_outline;
pub mod heatmap;
pub mod label;
pub mod process;
pub mod series;
pub mod settings;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_support;

pub use color::{ColorStop, Rgba};
pub use compositor::{Compositor, PlotView};
pub use process::{Draw, DrawProcess, PlotProps};
pub use series::{DataSeries, Electrode, ElectrodeSeries, Extent};
pub use settings::PlotSettings;
pub use surface::{DrawContext, RecordingSurface};
