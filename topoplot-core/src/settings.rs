use serde::{Deserialize, Serialize};

/// Layout and style knobs shared by the draw processes.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Number of precomputed colors in the heatmap lookup table.
    pub color_buckets: usize,
    /// Electrodes considered when interpolating one pixel.
    pub neighborhood: usize,
    /// `radius = min(width, height) / radius_divisor`.
    pub radius_divisor: f64,
    /// Extra downward shift of the disc center, in pixels.
    pub center_offset_y: f64,
    pub colorbar: ColorbarLayout,
    pub label: LabelLayout,
    /// Nose half-width and height as fractions of the radius.
    pub nose_half_width: f64,
    pub nose_height: f64,
    pub line_width: f64,
    pub font: String,
    pub stroke_style: String,
    pub text_style: String,
    pub frequency_unit: String,
}

/// Colorbar placement relative to the disc's right edge and top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorbarLayout {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    /// Gap between the bar and its extent/unit labels.
    pub label_gap: f64,
}

/// Frequency label placement relative to the disc's left edge and bottom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelLayout {
    pub left: f64,
    pub below: f64,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            color_buckets: 40,
            neighborhood: 6,
            radius_divisor: 2.9,
            center_offset_y: 15.0,
            colorbar: ColorbarLayout::default(),
            label: LabelLayout::default(),
            nose_half_width: 0.1,
            nose_height: 0.1,
            line_width: 1.0,
            font: "12px sans-serif".to_string(),
            stroke_style: "#000".to_string(),
            text_style: "#000".to_string(),
            frequency_unit: "Hz".to_string(),
        }
    }
}

impl Default for ColorbarLayout {
    fn default() -> Self {
        Self { top: -5.0, left: 20.0, width: 15.0, label_gap: 4.0 }
    }
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self { left: -20.0, below: 30.0 }
    }
}

impl PlotSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
