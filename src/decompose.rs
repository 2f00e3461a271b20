//! Decomposition result contract and a classical additive decomposition
//!
//! The chart pipeline only consumes [`DecompositionResult`]. The additive
//! decomposition here exists so the CLI can run end to end without an
//! external STL engine.

use crate::error::{DataShapeError, DecomposeError};

/// Five parallel sequences produced by a seasonal-trend decomposition.
///
/// `times` are epoch milliseconds. All sequences share one index, and
/// `series[i] ≈ seasonal[i] + trend[i] + remainder[i]` is assumed but not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionResult {
    pub times: Vec<i64>,
    pub series: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub trend: Vec<f64>,
    pub remainder: Vec<f64>,
}

impl DecompositionResult {
    pub fn new(
        times: Vec<i64>,
        series: Vec<f64>,
        seasonal: Vec<f64>,
        trend: Vec<f64>,
        remainder: Vec<f64>,
    ) -> Self {
        Self {
            times,
            series,
            seasonal,
            trend,
            remainder,
        }
    }

    /// Number of observations, if every value sequence matches `times`.
    pub fn check_shape(&self) -> Result<usize, DataShapeError> {
        let expected = self.times.len();
        let columns: [(&'static str, usize); 4] = [
            ("series", self.series.len()),
            ("seasonal", self.seasonal.len()),
            ("trend", self.trend.len()),
            ("remainder", self.remainder.len()),
        ];

        if let Some(&(channel, actual)) = columns.iter().find(|(_, len)| *len != expected) {
            return Err(DataShapeError::LengthMismatch {
                channel,
                expected,
                actual,
            });
        }

        if expected == 0 {
            return Err(DataShapeError::Empty);
        }

        Ok(expected)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Split `series` into trend, seasonal and remainder components.
///
/// Trend is a centered moving average over one period (2×m for even periods),
/// held flat at both edges. Seasonal is the per-phase mean of the detrended
/// series, centered to sum to zero over one period.
pub fn decompose_additive(
    times: Vec<i64>,
    series: Vec<f64>,
    period: usize,
) -> Result<DecompositionResult, DecomposeError> {
    let n = series.len();
    if times.len() != n {
        return Err(DataShapeError::LengthMismatch {
            channel: "series",
            expected: times.len(),
            actual: n,
        }
        .into());
    }
    if n == 0 {
        return Err(DataShapeError::Empty.into());
    }
    if period < 2 || n < period * 2 {
        return Err(DecomposeError::InvalidPeriod { period, len: n });
    }

    let trend = centered_moving_average(&series, period);

    let mut phase_sums = vec![0.0f64; period];
    let mut phase_counts = vec![0usize; period];
    for (i, (value, t)) in series.iter().zip(&trend).enumerate() {
        phase_sums[i % period] += value - t;
        phase_counts[i % period] += 1;
    }

    let phase_means: Vec<f64> = phase_sums
        .iter()
        .zip(&phase_counts)
        .map(|(sum, &count)| sum / count as f64)
        .collect();
    let offset = phase_means.iter().sum::<f64>() / period as f64;

    let seasonal: Vec<f64> = (0..n).map(|i| phase_means[i % period] - offset).collect();

    let remainder: Vec<f64> = series
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((x, t), s)| x - t - s)
        .collect();

    Ok(DecompositionResult {
        times,
        series,
        seasonal,
        trend,
        remainder,
    })
}

fn centered_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let half = period / 2;
    let mut trend = vec![0.0f64; n];

    for i in half..(n - half) {
        trend[i] = if period % 2 == 1 {
            values[i - half..=i + half].iter().sum::<f64>() / period as f64
        } else {
            let inner: f64 = values[i - half + 1..i + half].iter().sum();
            (inner + 0.5 * (values[i - half] + values[i + half])) / period as f64
        };
    }

    let first = trend[half];
    let last = trend[n - half - 1];
    trend[..half].fill(first);
    trend[n - half..].fill(last);

    trend
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(n: usize) -> Vec<i64> {
        (0..n as i64).map(|i| i * 60_000).collect()
    }

    #[test]
    fn test_check_shape_reports_offending_channel() {
        let result = DecompositionResult::new(
            vec![0, 1, 2],
            vec![1.0, 2.0, 3.0],
            vec![0.0, 0.0, 0.0],
            vec![1.0, 2.0],
            vec![0.0, 0.0, 0.0],
        );
        assert_eq!(
            result.check_shape(),
            Err(DataShapeError::LengthMismatch {
                channel: "trend",
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_check_shape_empty() {
        let result = DecompositionResult::new(vec![], vec![], vec![], vec![], vec![]);
        assert_eq!(result.check_shape(), Err(DataShapeError::Empty));
    }

    #[test]
    fn test_alternating_series_splits_cleanly() {
        let series: Vec<f64> = (0..8).map(|i| if i % 2 == 0 { 1.0 } else { 3.0 }).collect();
        let result = decompose_additive(minutes(8), series, 2).unwrap();

        for (i, t) in result.trend.iter().enumerate() {
            assert!((t - 2.0).abs() < 1e-12, "trend[{}] = {}", i, t);
        }
        assert!((result.seasonal[0] + 1.0).abs() < 1e-12);
        assert!((result.seasonal[1] - 1.0).abs() < 1e-12);
        assert!(result.remainder.iter().all(|r| r.abs() < 1e-12));
    }

    #[test]
    fn test_components_sum_to_series() {
        let series: Vec<f64> = (0..48)
            .map(|i| 0.5 * i as f64 + (i as f64 * std::f64::consts::PI / 6.0).sin() * 4.0)
            .collect();
        let result = decompose_additive(minutes(48), series.clone(), 12).unwrap();

        assert_eq!(result.check_shape(), Ok(48));
        for i in 0..48 {
            let sum = result.seasonal[i] + result.trend[i] + result.remainder[i];
            assert!((sum - series[i]).abs() < 1e-9, "identity broken at {}", i);
        }
    }

    #[test]
    fn test_seasonal_is_centered() {
        let series: Vec<f64> = (0..30).map(|i| 10.0 + (i % 5) as f64).collect();
        let result = decompose_additive(minutes(30), series, 5).unwrap();
        let one_period: f64 = result.seasonal[..5].iter().sum();
        assert!(one_period.abs() < 1e-9);
    }

    #[test]
    fn test_period_too_long_rejected() {
        let err = decompose_additive(minutes(5), vec![1.0; 5], 3).unwrap_err();
        assert_eq!(err, DecomposeError::InvalidPeriod { period: 3, len: 5 });
    }

    #[test]
    fn test_period_of_one_rejected() {
        let err = decompose_additive(minutes(10), vec![1.0; 10], 1).unwrap_err();
        assert!(matches!(err, DecomposeError::InvalidPeriod { period: 1, .. }));
    }
}
