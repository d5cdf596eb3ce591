//! Simulated hardware backends.
//!
//! These exist so the binary, the demo, and the tests can exercise the full
//! capture pipeline without a physical sensor board. The waveform sensor
//! produces a deterministic signal per gesture shape; triggers come either
//! scripted or over a channel fed by another thread.

use crate::hardware::types::{AccelSample, IndicatorState};
use crate::hardware::{Indicator, MotionSensor, SensorError, TriggerInput};
use crossbeam_channel::Receiver;

/// Gesture shapes the simulated sensor can produce.
///
/// Amplitudes are chosen so each shape lands in a distinct energy band of the
/// built-in classifier: rest stays near zero, circle is gentle, zigzag is
/// brisk, chop is violent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureShape {
    Rest,
    Circle,
    Zigzag,
    Chop,
}

impl GestureShape {
    /// Parse a shape from its CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "rest" => Some(Self::Rest),
            "circle" => Some(Self::Circle),
            "zigzag" => Some(Self::Zigzag),
            "chop" => Some(Self::Chop),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Circle => "circle",
            Self::Zigzag => "zigzag",
            Self::Chop => "chop",
        }
    }
}

/// A motion sensor that synthesizes a fixed waveform per gesture shape.
///
/// Each `read` advances one step, so sample values depend only on the shape
/// and how many reads have occurred. Two sensors with the same shape produce
/// identical sequences.
pub struct WaveformSensor {
    shape: GestureShape,
    step: u32,
}

impl WaveformSensor {
    pub fn new(shape: GestureShape) -> Self {
        Self { shape, step: 0 }
    }

    pub fn shape(&self) -> GestureShape {
        self.shape
    }
}

impl MotionSensor for WaveformSensor {
    fn read(&mut self) -> Result<AccelSample, SensorError> {
        let step = self.step;
        self.step = self.step.wrapping_add(1);

        let t = step as f32;
        let sample = match self.shape {
            GestureShape::Rest => {
                AccelSample::new(0.03 * (t * 0.7).sin(), 0.03 * (t * 0.7).cos(), 0.02)
            }
            GestureShape::Circle => {
                let theta = t * 0.2;
                AccelSample::new(0.6 * theta.sin(), 0.6 * theta.cos(), 0.1)
            }
            GestureShape::Zigzag => {
                let a = if (step / 5) % 2 == 0 { 1.0 } else { -1.0 };
                AccelSample::new(a, -a, 0.1)
            }
            GestureShape::Chop => {
                let a = if (step / 4) % 2 == 0 { 2.0 } else { -2.0 };
                AccelSample::new(a, a, 0.1)
            }
        };

        Ok(sample)
    }
}

/// A trigger that reports a fixed number of presses, one per poll.
///
/// Poll it only while the controller is idle, otherwise presses are burned
/// against the refractory window.
pub struct ScriptedTrigger {
    remaining: u32,
}

impl ScriptedTrigger {
    pub fn with_presses(presses: u32) -> Self {
        Self { remaining: presses }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl TriggerInput for ScriptedTrigger {
    fn poll(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            true
        } else {
            false
        }
    }
}

/// A trigger fed by another thread through a bounded channel.
///
/// The sending side decides what a "press" is (a console keypress, a GPIO
/// edge relayed from an interrupt thread); each queued unit becomes one
/// trigger edge here.
pub struct ChannelTrigger {
    receiver: Receiver<()>,
}

impl ChannelTrigger {
    pub fn new(receiver: Receiver<()>) -> Self {
        Self { receiver }
    }
}

impl TriggerInput for ChannelTrigger {
    fn poll(&mut self) -> bool {
        self.receiver.try_recv().is_ok()
    }
}

/// An indicator that prints state changes and remembers the last command.
pub struct ConsoleIndicator {
    last: IndicatorState,
}

impl ConsoleIndicator {
    pub fn new() -> Self {
        Self {
            last: IndicatorState::Off,
        }
    }

    pub fn last(&self) -> IndicatorState {
        self.last
    }
}

impl Default for ConsoleIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for ConsoleIndicator {
    fn set_state(&mut self, state: IndicatorState) {
        if state != self.last {
            println!("[indicator] {state}");
        }
        self.last = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn test_shape_parsing() {
        assert_eq!(GestureShape::from_name("circle"), Some(GestureShape::Circle));
        assert_eq!(GestureShape::from_name(" ZigZag "), Some(GestureShape::Zigzag));
        assert_eq!(GestureShape::from_name("wiggle"), None);
    }

    #[test]
    fn test_waveform_is_deterministic() {
        let mut a = WaveformSensor::new(GestureShape::Circle);
        let mut b = WaveformSensor::new(GestureShape::Circle);

        for _ in 0..10 {
            assert_eq!(a.read().unwrap(), b.read().unwrap());
        }
    }

    #[test]
    fn test_rest_stays_quiet() {
        let mut sensor = WaveformSensor::new(GestureShape::Rest);
        for _ in 0..50 {
            let sample = sensor.read().unwrap();
            assert!(sample.magnitude() < 0.1);
        }
    }

    #[test]
    fn test_scripted_trigger_counts_down() {
        let mut trigger = ScriptedTrigger::with_presses(2);
        assert!(trigger.poll());
        assert!(trigger.poll());
        assert!(!trigger.poll());
        assert_eq!(trigger.remaining(), 0);
    }

    #[test]
    fn test_channel_trigger() {
        let (tx, rx) = bounded(4);
        let mut trigger = ChannelTrigger::new(rx);

        assert!(!trigger.poll());
        tx.send(()).unwrap();
        assert!(trigger.poll());
        assert!(!trigger.poll());
    }

    #[test]
    fn test_console_indicator_remembers_last() {
        let mut indicator = ConsoleIndicator::new();
        assert_eq!(indicator.last(), IndicatorState::Off);

        indicator.set_state(IndicatorState::Red);
        assert_eq!(indicator.last(), IndicatorState::Red);
    }
}
