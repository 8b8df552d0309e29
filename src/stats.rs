//! Summary statistics over a set of values.
use serde::{Deserialize, Serialize};

/// Mean, (population) standard deviation and median of a non-empty set of values.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub std: f64,
    pub median: f64,
}

impl SummaryStats {
    /// Returns the statistics of the values, or `None` if there are no values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        Some(SummaryStats {
            mean: mean(values)?,
            std: std(values)?,
            median: median(values)?,
        })
    }
}

/// Returns the arithmetic mean of the values, or `None` if there are no values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Returns the population standard deviation (divisor n) of the values, or `None` if there are no values.
pub fn std(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let var = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Returns the median of the values, or `None` if there are no values.
/// For an even number of values, the median is the average of the two middle ones.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_std_median() {
        let values = [0.1, 0.3, 0.5];
        assert!((mean(&values).unwrap() - 0.3).abs() < 1e-12);
        assert!((std(&values).unwrap() - 0.163299).abs() < 1e-6);
        assert!((median(&values).unwrap() - 0.3).abs() < 1e-12);

        // even number of values, unsorted
        assert!((median(&[4.0, 1.0, 3.0, 2.0]).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(std(&[2.0]), Some(0.0));
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(mean(&[]), None);
        assert_eq!(std(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(SummaryStats::from_values(&[]), None);
    }

    #[test]
    fn test_summary_stats() {
        let stats = SummaryStats::from_values(&[1.0, 3.0]).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.std, 1.0);
        assert_eq!(stats.median, 2.0);
    }
}
