//! Fixed partition of the sample axis into electrode windows.
use serde::{Deserialize, Serialize};

use crate::error::StimError;
use crate::{ELECTRODE_WINDOW, NUM_ELECTRODES};

/// Returns the half-open sample range `[start, end)` covered by the (1-indexed) electrode `k`.
/// The function returns an error if `k` is not in `1..=NUM_ELECTRODES`.
pub fn electrode_window(k: usize) -> Result<(usize, usize), StimError> {
    if !(1..=NUM_ELECTRODES).contains(&k) {
        return Err(StimError::OutOfRange(format!(
            "electrode {} is not in 1..={}",
            k, NUM_ELECTRODES
        )));
    }
    Ok(((k - 1) * ELECTRODE_WINDOW, k * ELECTRODE_WINDOW))
}

/// The voltage of one electrode during one repetition, ready to be plotted.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ElectrodeTrace {
    /// The (1-indexed) electrode number.
    pub electrode: usize,
    /// The position within the window, i.e., 1 to the window length.
    pub x: Vec<usize>,
    /// The voltage values of the window.
    pub y: Vec<f64>,
}

impl ElectrodeTrace {
    pub fn new(electrode: usize, y: Vec<f64>) -> Self {
        let x = (1..=y.len()).collect();
        ElectrodeTrace { electrode, x, y }
    }

    /// Returns the number of samples in the trace.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Returns the trace as (x, y) points.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(x, y)| (*x as f64, *y))
            .collect()
    }
}
