//! Deterministic energy-threshold backend.
//!
//! This stands in for a compiled gesture model so the binary, the demo and
//! the integration tests can run the pipeline end-to-end. The real
//! deployment swaps in a trained backend behind the same
//! [`GestureClassifier`] trait; nothing upstream changes.
//!
//! The heuristic bins the window by mean absolute value: a resting wrist
//! barely moves, an O stroke is gentle, a Z stroke is brisk, a V chop is
//! violent. Each bin maps to a fixed score vector over the model's labels.

use crate::classify::adapter::{ClassScore, Classification, ClassifierError, GestureClassifier};
use crate::core::buffer::FeatureSignal;
use statrs::statistics::Statistics;

/// Labels in model output order.
pub const LABELS: [&str; 4] = ["idle", "O", "Z", "V"];

// Mean-absolute-value bin edges separating the four labels.
const REST_CEILING: f64 = 0.15;
const CIRCLE_CEILING: f64 = 0.5;
const ZIGZAG_CEILING: f64 = 1.0;

/// Summary statistics of one window, for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Mean absolute value across every axis of every sample.
    pub mean_abs: f64,
    /// Sample standard deviation of the absolute values.
    pub spread: f64,
}

/// Compute the energy statistics the heuristic bins on.
pub fn window_stats(signal: &FeatureSignal<'_>) -> WindowStats {
    let magnitudes: Vec<f64> = signal
        .values()
        .iter()
        .map(|v| f64::from(v.abs()))
        .collect();

    WindowStats {
        mean_abs: magnitudes.iter().mean(),
        spread: magnitudes.iter().std_dev(),
    }
}

/// Threshold backend over window energy.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyClassifier;

impl EnergyClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl GestureClassifier for EnergyClassifier {
    fn classify(&self, signal: &FeatureSignal<'_>) -> Result<Classification, ClassifierError> {
        if signal.total_length() == 0 {
            return Err(ClassifierError::new(-1));
        }

        let stats = window_stats(signal);

        let scores: [f32; 4] = if stats.mean_abs < REST_CEILING {
            [0.90, 0.04, 0.03, 0.03]
        } else if stats.mean_abs < CIRCLE_CEILING {
            [0.02, 0.92, 0.03, 0.01]
        } else if stats.mean_abs < ZIGZAG_CEILING {
            [0.02, 0.03, 0.93, 0.02]
        } else {
            [0.02, 0.02, 0.03, 0.93]
        };

        Ok(Classification::new(
            LABELS
                .iter()
                .zip(scores)
                .map(|(label, score)| ClassScore {
                    label: (*label).to_string(),
                    score,
                })
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::FeatureBuffer;
    use crate::core::decision::select_winner;
    use crate::hardware::AccelSample;

    fn window_of(sample: AccelSample, count: usize) -> FeatureBuffer {
        let mut buffer = FeatureBuffer::new(count);
        for _ in 0..count {
            buffer.write(sample);
        }
        buffer
    }

    fn winning_label(buffer: &FeatureBuffer) -> String {
        let result = EnergyClassifier::new()
            .classify(&buffer.as_signal())
            .unwrap();
        select_winner(&result).unwrap().label.clone()
    }

    #[test]
    fn test_empty_signal_is_a_classifier_error() {
        let buffer = FeatureBuffer::new(4);
        let err = EnergyClassifier::new()
            .classify(&buffer.as_signal())
            .unwrap_err();
        assert_eq!(err.code, -1);
    }

    #[test]
    fn test_energy_bins() {
        // Quiet window: idle.
        let rest = window_of(AccelSample::new(0.01, 0.01, 0.02), 10);
        assert_eq!(winning_label(&rest), "idle");

        // Unit pulse on one axis: mean |v| = 1/3, the O band.
        let circle = window_of(AccelSample::new(1.0, 0.0, 0.0), 10);
        assert_eq!(winning_label(&circle), "O");

        // Two hot axes: mean |v| = 0.7, the Z band.
        let zigzag = window_of(AccelSample::new(1.0, 1.0, 0.1), 10);
        assert_eq!(winning_label(&zigzag), "Z");

        // Violent swing: the V band.
        let chop = window_of(AccelSample::new(2.0, 2.0, 0.1), 10);
        assert_eq!(winning_label(&chop), "V");
    }

    #[test]
    fn test_scores_cover_every_label() {
        let buffer = window_of(AccelSample::new(1.0, 0.0, 0.0), 10);
        let result = EnergyClassifier::new()
            .classify(&buffer.as_signal())
            .unwrap();

        assert_eq!(result.len(), LABELS.len());
        for (entry, label) in result.scores().iter().zip(LABELS) {
            assert_eq!(entry.label, label);
            assert!(entry.score > 0.0 && entry.score <= 1.0);
        }
    }

    #[test]
    fn test_window_stats_constant_signal_has_no_spread() {
        let buffer = window_of(AccelSample::new(0.5, 0.5, 0.5), 10);
        let stats = window_stats(&buffer.as_signal());

        assert!((stats.mean_abs - 0.5).abs() < 1e-6);
        assert!(stats.spread.abs() < 1e-6);
    }
}
