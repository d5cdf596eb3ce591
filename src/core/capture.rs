//! Capture state machine: trigger, windowed sampling, completion.
//!
//! The controller owns the feature buffer and the session timestamps; no
//! other component mutates them, which is what makes the single-threaded
//! pipeline lock-free by construction. Every transition is an explicit
//! method call taking the current time, so tests drive it with synthetic
//! instants and never sleep.

use std::time::{Duration, Instant};

use crate::classify::{run_classifier, Classification, GestureClassifier, InferenceError};
use crate::core::buffer::FeatureBuffer;
use crate::core::clock::SampleClock;
use crate::core::decision::{decide, ActionTable, Decision};
use crate::hardware::{MotionSensor, SensorError};

/// Pipeline phase. At most one capture session is live at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
}

/// Timestamps of the live session.
#[derive(Debug, Clone, Copy)]
struct Session {
    started_at: Instant,
    last_sample_at: Instant,
}

/// Result of a completed capture session.
///
/// Both variants return the machine to idle within the completing tick;
/// a failed session is re-armed, never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Classification ran; the decision carries the indicator instruction.
    Decided {
        classification: Classification,
        decision: Decision,
    },
    /// Session abandoned. The indicator must be left untouched.
    Abandoned(InferenceError),
}

/// What a single tick observed, for callers that report progress.
///
/// `outcome` is set only on the tick that completes a session; that same
/// tick may also have written the window's final sample.
#[derive(Debug, Default)]
pub struct TickReport {
    /// A due sample was read and written this tick.
    pub sampled: bool,
    /// A due sample was lost to a sensor fault this tick.
    pub sensor_fault: Option<SensorError>,
    /// The session completed this tick.
    pub outcome: Option<SessionOutcome>,
}

/// The windowed capture-and-classify state machine.
pub struct CaptureController {
    clock: SampleClock,
    buffer: FeatureBuffer,
    actions: ActionTable,
    refractory: Duration,
    session: Option<Session>,
    refractory_until: Option<Instant>,
}

impl CaptureController {
    pub fn new(
        clock: SampleClock,
        samples_per_window: usize,
        actions: ActionTable,
        refractory: Duration,
    ) -> Self {
        Self {
            clock,
            buffer: FeatureBuffer::new(samples_per_window),
            actions,
            refractory,
            session: None,
            refractory_until: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        if self.session.is_some() {
            CaptureState::Capturing
        } else {
            CaptureState::Idle
        }
    }

    /// Samples written for the current or most recently completed session.
    pub fn sample_count(&self) -> usize {
        self.buffer.sample_count()
    }

    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    /// Start a capture session.
    ///
    /// Accepted only from idle and once the refractory period after the
    /// previous accepted trigger has passed; anything else is ignored, so a
    /// bouncing edge or a press mid-capture can never reset the buffer or
    /// restart the timer. Returns whether the trigger was accepted.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.session.is_some() {
            return false;
        }
        if let Some(until) = self.refractory_until {
            if now < until {
                return false;
            }
        }

        self.buffer.reset();
        self.session = Some(Session {
            started_at: now,
            last_sample_at: now,
        });
        self.refractory_until = Some(now + self.refractory);
        true
    }

    /// Advance the pipeline by one control-loop pass.
    ///
    /// While capturing: read one sensor sample if the interval gate says one
    /// is due, then complete the session if the window duration has elapsed.
    /// Completion runs the classifier and the decision policy exactly once
    /// and returns to idle whatever the outcome. Idle ticks do nothing.
    pub fn tick<S, C>(&mut self, now: Instant, sensor: &mut S, classifier: &C) -> TickReport
    where
        S: MotionSensor + ?Sized,
        C: GestureClassifier + ?Sized,
    {
        let mut report = TickReport::default();

        let Some(session) = self.session.as_mut() else {
            return report;
        };

        if self.clock.sample_due(now, session.last_sample_at) {
            // The due slot is consumed even when the read fails; a dead
            // sensor must not turn the loop into a busy retry.
            session.last_sample_at = now;
            match sensor.read() {
                Ok(sample) => {
                    self.buffer.write(sample);
                    report.sampled = true;
                }
                Err(e) => report.sensor_fault = Some(e),
            }
        }

        let started_at = session.started_at;
        if !self.clock.window_elapsed(now, started_at) {
            return report;
        }

        self.session = None;
        report.outcome = Some(match run_classifier(&self.buffer, classifier) {
            Ok(classification) => {
                let decision = decide(&classification, &self.actions);
                SessionOutcome::Decided {
                    classification,
                    decision,
                }
            }
            Err(err) => SessionOutcome::Abandoned(err),
        });

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ClassScore, Classification, ClassifierError, GestureClassifier};
    use crate::core::buffer::FeatureSignal;
    use crate::hardware::{AccelSample, IndicatorState};

    struct ConstantSensor(AccelSample);

    impl MotionSensor for ConstantSensor {
        fn read(&mut self) -> Result<AccelSample, SensorError> {
            Ok(self.0)
        }
    }

    struct FaultySensor;

    impl MotionSensor for FaultySensor {
        fn read(&mut self) -> Result<AccelSample, SensorError> {
            Err(SensorError::NotReady)
        }
    }

    struct FixedClassifier(Vec<(&'static str, f32)>);

    impl GestureClassifier for FixedClassifier {
        fn classify(&self, _: &FeatureSignal<'_>) -> Result<Classification, ClassifierError> {
            Ok(Classification::new(
                self.0
                    .iter()
                    .map(|(label, score)| ClassScore {
                        label: (*label).to_string(),
                        score: *score,
                    })
                    .collect(),
            ))
        }
    }

    fn controller(samples: usize, interval_ms: u64, window_ms: u64) -> CaptureController {
        CaptureController::new(
            SampleClock::new(
                Duration::from_millis(interval_ms),
                Duration::from_millis(window_ms),
            ),
            samples,
            ActionTable::default(),
            Duration::from_millis(200),
        )
    }

    #[test]
    fn test_idle_tick_is_a_no_op() {
        let mut ctl = controller(4, 10, 100);
        let mut sensor = ConstantSensor(AccelSample::new(1.0, 0.0, 0.0));
        let classifier = FixedClassifier(vec![("O", 0.9)]);

        let report = ctl.tick(Instant::now(), &mut sensor, &classifier);
        assert!(!report.sampled);
        assert!(report.outcome.is_none());
        assert_eq!(ctl.state(), CaptureState::Idle);
    }

    #[test]
    fn test_trigger_enters_capturing_and_resets_buffer() {
        let mut ctl = controller(4, 10, 100);
        let base = Instant::now();

        assert!(ctl.trigger(base));
        assert_eq!(ctl.state(), CaptureState::Capturing);
        assert_eq!(ctl.sample_count(), 0);
    }

    #[test]
    fn test_trigger_during_capture_is_ignored() {
        let mut ctl = controller(10, 10, 1000);
        let mut sensor = ConstantSensor(AccelSample::new(1.0, 0.0, 0.0));
        let classifier = FixedClassifier(vec![("O", 0.9)]);
        let base = Instant::now();

        assert!(ctl.trigger(base));
        for i in 1..=3 {
            ctl.tick(base + Duration::from_millis(10 * i), &mut sensor, &classifier);
        }
        assert_eq!(ctl.sample_count(), 3);

        // A bounce mid-session neither resets the buffer nor the timer.
        assert!(!ctl.trigger(base + Duration::from_millis(35)));
        assert_eq!(ctl.sample_count(), 3);
        assert_eq!(ctl.state(), CaptureState::Capturing);
    }

    #[test]
    fn test_refractory_rejects_immediate_retrigger() {
        let mut ctl = controller(2, 10, 30);
        let mut sensor = ConstantSensor(AccelSample::new(1.0, 0.0, 0.0));
        let classifier = FixedClassifier(vec![("O", 0.9)]);
        let base = Instant::now();

        assert!(ctl.trigger(base));
        // Window (30ms) completes well inside the 200ms refractory.
        for i in 1..=3 {
            ctl.tick(base + Duration::from_millis(10 * i), &mut sensor, &classifier);
        }
        assert_eq!(ctl.state(), CaptureState::Idle);

        assert!(!ctl.trigger(base + Duration::from_millis(50)));
        assert!(ctl.trigger(base + Duration::from_millis(200)));
    }

    #[test]
    fn test_session_completes_with_decision() {
        let mut ctl = controller(2, 10, 20);
        let mut sensor = ConstantSensor(AccelSample::new(1.0, 0.0, 0.0));
        let classifier = FixedClassifier(vec![("Z", 0.95)]);
        let base = Instant::now();

        ctl.trigger(base);
        let r1 = ctl.tick(base + Duration::from_millis(10), &mut sensor, &classifier);
        assert!(r1.sampled);
        assert!(r1.outcome.is_none());

        let r2 = ctl.tick(base + Duration::from_millis(20), &mut sensor, &classifier);
        assert!(r2.sampled);
        match r2.outcome {
            Some(SessionOutcome::Decided { decision, .. }) => {
                assert_eq!(decision.indicator, IndicatorState::Green);
                assert_eq!(decision.winner, Some(("Z".to_string(), 0.95)));
            }
            other => panic!("expected a decision, got {other:?}"),
        }
        assert_eq!(ctl.state(), CaptureState::Idle);
    }

    #[test]
    fn test_underfilled_window_is_abandoned() {
        let mut ctl = controller(4, 10, 30);
        let mut sensor = ConstantSensor(AccelSample::new(1.0, 0.0, 0.0));
        let classifier = FixedClassifier(vec![("O", 0.9)]);
        let base = Instant::now();

        ctl.trigger(base);
        // Only 3 of 4 samples fit in the window.
        let mut outcome = None;
        for i in 1..=3 {
            let report = ctl.tick(base + Duration::from_millis(10 * i), &mut sensor, &classifier);
            if report.outcome.is_some() {
                outcome = report.outcome;
            }
        }

        match outcome {
            Some(SessionOutcome::Abandoned(InferenceError::InsufficientData { have, need })) => {
                assert_eq!(have, 9);
                assert_eq!(need, 12);
            }
            other => panic!("expected insufficient data, got {other:?}"),
        }
        assert_eq!(ctl.state(), CaptureState::Idle);
    }

    #[test]
    fn test_sensor_fault_consumes_the_slot() {
        let mut ctl = controller(4, 10, 1000);
        let mut sensor = FaultySensor;
        let classifier = FixedClassifier(vec![("O", 0.9)]);
        let base = Instant::now();

        ctl.trigger(base);
        let report = ctl.tick(base + Duration::from_millis(10), &mut sensor, &classifier);
        assert!(!report.sampled);
        assert_eq!(report.sensor_fault, Some(SensorError::NotReady));
        assert_eq!(ctl.sample_count(), 0);

        // The very next pass is not due again.
        let report = ctl.tick(base + Duration::from_millis(11), &mut sensor, &classifier);
        assert!(report.sensor_fault.is_none());
    }
}
