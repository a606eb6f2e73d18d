use crate::series::{DataSeries, Extent};

/// Series returning the same value everywhere, over the extent `0..1`.
pub(crate) struct ConstSeries(pub f64);

impl DataSeries for ConstSeries {
    fn extent(&self) -> Extent {
        Extent::new(0.0, 1.0)
    }

    fn units(&self) -> &str {
        "u"
    }

    fn label(&self) -> &str {
        "const"
    }

    fn interpolate(&self, _neighborhood: usize, _frequency: f64, _point: [f64; 2]) -> f64 {
        self.0
    }
}
