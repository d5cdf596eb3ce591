//! Sample and indicator types shared across the pipeline.

use serde::{Deserialize, Serialize};

/// One accelerometer reading (x, y, z), in g units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude of the triple.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Tri-color indicator output states.
///
/// `Off` is the neutral state: it is what the decision policy emits when no
/// class clears the confidence floor or the winning label has no table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    Red,
    Green,
    Blue,
    Off,
}

impl IndicatorState {
    /// Lowercase name for display and logs.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorState::Red => "red",
            IndicatorState::Green => "green",
            IndicatorState::Blue => "blue",
            IndicatorState::Off => "off",
        }
    }
}

impl std::fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_magnitude() {
        let sample = AccelSample::new(3.0, 4.0, 0.0);
        assert!((sample.magnitude() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_indicator_serde_names() {
        let json = serde_json::to_string(&IndicatorState::Green).unwrap();
        assert_eq!(json, "\"green\"");

        let state: IndicatorState = serde_json::from_str("\"off\"").unwrap();
        assert_eq!(state, IndicatorState::Off);
    }
}
