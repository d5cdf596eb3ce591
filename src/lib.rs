//! Gesturewand - button-triggered gesture capture and classification.
//!
//! This library implements the capture-and-classify pipeline of a wand-style
//! gesture controller: a trigger press starts a fixed-duration accelerometer
//! capture, the filled window goes through a scored classifier once, and the
//! winning class drives a tri-color indicator.
//!
//! # Pipeline Guarantees
//!
//! - **Bounded memory**: the feature buffer is fixed-capacity; writes past
//!   capacity are silently dropped by policy, never an error
//! - **One session at a time**: triggers during a capture are ignored, and a
//!   refractory period absorbs switch bounce
//! - **Duration-authoritative windows**: elapsed time ends a session even
//!   when loop jitter costs samples; short windows are abandoned, never
//!   partially classified
//! - **Every failure re-arms**: all error paths return the machine to idle
//!   for the next trigger
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Gesturewand                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │   Trigger   │──▶│   Capture   │──▶│ Classifier  │       │
//! │  │   (edge)    │   │  (2s @ 10ms)│   │  (scored)   │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │         │                 │                  │              │
//! │         ▼                 ▼                  ▼              │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │  Telemetry  │   │   Sensor    │   │  Decision   │       │
//! │  │  (counters) │   │  (triples)  │   │ (indicator) │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::time::{Duration, Instant};
//! use gesturewand::{
//!     classify::EnergyClassifier,
//!     core::{ActionTable, CaptureController, SampleClock},
//!     hardware::sim::{GestureShape, WaveformSensor},
//! };
//!
//! let clock = SampleClock::new(Duration::from_millis(10), Duration::from_secs(2));
//! let mut controller =
//!     CaptureController::new(clock, 200, ActionTable::default(), Duration::from_millis(200));
//! let mut sensor = WaveformSensor::new(GestureShape::Circle);
//! let classifier = EnergyClassifier::new();
//!
//! controller.trigger(Instant::now());
//! loop {
//!     let report = controller.tick(Instant::now(), &mut sensor, &classifier);
//!     if let Some(outcome) = report.outcome {
//!         println!("{outcome:?}");
//!         break;
//!     }
//! }
//! ```

pub mod classify;
pub mod config;
pub mod core;
pub mod hardware;
pub mod telemetry;

// Re-export key types at crate root for convenience
pub use crate::classify::{
    run_classifier, ClassScore, Classification, ClassifierError, EnergyClassifier,
    GestureClassifier, InferenceError,
};
pub use crate::config::Config;
pub use crate::core::{
    decide, select_winner, ActionTable, CaptureController, CaptureState, Decision, FeatureBuffer,
    FeatureSignal, SampleClock, SessionOutcome, TickReport,
};
pub use crate::hardware::{
    AccelSample, Indicator, IndicatorState, MotionSensor, SensorError, TriggerInput,
};
pub use crate::telemetry::{PipelineLog, PipelineStats, SharedPipelineLog};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
