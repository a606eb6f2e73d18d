//! Data series contract and an electrode-based implementation.
//!
//! Points are in normalized disc coordinates: `x, y` in `[-1, 1]` with the
//! unit circle on the disc edge.

use thiserror::Error;

/// Minimum and maximum of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// A snapshot of measured values that can be sampled anywhere on the disc.
pub trait DataSeries: Send + Sync {
    fn extent(&self) -> Extent;
    fn units(&self) -> &str;
    fn label(&self) -> &str;
    /// Sample the series at `point` for `frequency`, blending the
    /// `neighborhood` nearest sources.
    fn interpolate(&self, neighborhood: usize, frequency: f64, point: [f64; 2]) -> f64;
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("series has no electrodes")]
    NoElectrodes,
    #[error("frequency axis is empty")]
    EmptyAxis,
    #[error("frequency axis must be strictly increasing")]
    UnsortedAxis,
    #[error("electrode {index} has {got} values, expected {expected}")]
    ShapeMismatch { index: usize, got: usize, expected: usize },
}

/// One sensor: its position on the disc and one value per frequency bin.
#[derive(Clone, Debug, PartialEq)]
pub struct Electrode {
    pub name: String,
    pub position: [f64; 2],
    pub values: Vec<f64>,
}

/// Values measured at fixed electrodes over a shared frequency axis.
///
/// Sampling interpolates linearly along frequency, then takes an
/// inverse-distance-squared average of the nearest electrodes.
#[derive(Clone, Debug)]
pub struct ElectrodeSeries {
    label: String,
    units: String,
    frequencies: Vec<f64>,
    electrodes: Vec<Electrode>,
    extent: Extent,
}

impl ElectrodeSeries {
    pub fn new(
        label: impl Into<String>,
        units: impl Into<String>,
        frequencies: Vec<f64>,
        electrodes: Vec<Electrode>,
    ) -> Result<Self, SeriesError> {
        if electrodes.is_empty() {
            return Err(SeriesError::NoElectrodes);
        }
        if frequencies.is_empty() {
            return Err(SeriesError::EmptyAxis);
        }
        if frequencies.windows(2).any(|w| w[1].is_nan() || w[1] <= w[0]) {
            return Err(SeriesError::UnsortedAxis);
        }
        for (index, e) in electrodes.iter().enumerate() {
            if e.values.len() != frequencies.len() {
                return Err(SeriesError::ShapeMismatch {
                    index,
                    got: e.values.len(),
                    expected: frequencies.len(),
                });
            }
        }

        let (min, max) = electrodes
            .iter()
            .flat_map(|e| e.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let extent = if min <= max { Extent::new(min, max) } else { Extent::new(0.0, 0.0) };

        Ok(Self {
            label: label.into(),
            units: units.into(),
            frequencies,
            electrodes,
            extent,
        })
    }

    /// Value of one electrode at `frequency`, linear between bins and
    /// clamped to the axis ends.
    fn value_at(&self, electrode: &Electrode, frequency: f64) -> f64 {
        let freqs = &self.frequencies;
        let last = freqs.len() - 1;
        if frequency.is_nan() {
            return f64::NAN;
        }
        if frequency <= freqs[0] {
            return electrode.values[0];
        }
        if frequency >= freqs[last] {
            return electrode.values[last];
        }
        let hi = freqs.partition_point(|&f| f < frequency);
        let lo = hi - 1;
        let s = (frequency - freqs[lo]) / (freqs[hi] - freqs[lo]);
        electrode.values[lo] + (electrode.values[hi] - electrode.values[lo]) * s
    }
}

impl DataSeries for ElectrodeSeries {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn units(&self) -> &str {
        &self.units
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn interpolate(&self, neighborhood: usize, frequency: f64, point: [f64; 2]) -> f64 {
        let mut nearest: Vec<(f64, &Electrode)> = self
            .electrodes
            .iter()
            .map(|e| {
                let dx = e.position[0] - point[0];
                let dy = e.position[1] - point[1];
                (dx * dx + dy * dy, e)
            })
            .collect();
        nearest.sort_by(|a, b| a.0.total_cmp(&b.0));
        nearest.truncate(neighborhood.max(1));

        let mut weighted = 0.0;
        let mut total = 0.0;
        for (dist_sq, electrode) in nearest {
            let value = self.value_at(electrode, frequency);
            if dist_sq < 1e-12 {
                return value;
            }
            let w = 1.0 / dist_sq;
            weighted += w * value;
            total += w;
        }
        weighted / total
    }
}
