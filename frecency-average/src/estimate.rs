use serde::{Deserialize, Serialize};

/// Present best estimates of a decaying weighted average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub mean: f64,
    /// Weighted population standard deviation, without finite-sample bias correction.
    pub std: f64,
    /// Estimated error of `mean`: `std / sqrt(total weight)`.
    pub uncertainty: f64,
}

impl From<Estimate> for (f64, f64, f64) {
    fn from(e: Estimate) -> Self {
        (e.mean, e.std, e.uncertainty)
    }
}
