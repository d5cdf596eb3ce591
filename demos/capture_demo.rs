//! Demonstration of the gesture capture-and-classify pipeline.
//!
//! This example shows how to:
//! 1. Build the capture controller from a configuration
//! 2. Trigger a session and drive ticks with explicit timestamps
//! 3. Classify the filled window and apply the decision to an indicator
//!
//! Run with: cargo run --example capture_demo
//!
//! Time is synthesized rather than slept on, so the demo captures one window
//! per gesture shape and finishes immediately.

use std::time::{Duration, Instant};

use gesturewand::{
    classify::{window_stats, EnergyClassifier},
    config::Config,
    core::{CaptureController, CaptureState, FeatureBuffer, SampleClock, SessionOutcome},
    hardware::sim::{ConsoleIndicator, GestureShape, WaveformSensor},
    hardware::{Indicator, MotionSensor},
    telemetry::PipelineLog,
    VERSION,
};

fn main() {
    println!("Gesturewand - Capture Demo");
    println!("==========================");
    println!();

    let config = Config::default();
    println!("Pipeline v{VERSION}");
    println!(
        "  {} samples per window, one every {}ms, window {}ms",
        config.samples_per_window,
        config.sample_interval.as_millis(),
        config.window_duration.as_millis()
    );
    println!();

    let clock = SampleClock::new(config.sample_interval, config.window_duration);
    let classifier = EnergyClassifier::new();
    let log = PipelineLog::new();
    let mut indicator = ConsoleIndicator::new();

    let shapes = [
        GestureShape::Rest,
        GestureShape::Circle,
        GestureShape::Zigzag,
        GestureShape::Chop,
    ];

    for shape in shapes {
        println!("=== Capturing '{}' ===", shape.name());

        let mut controller = CaptureController::new(
            clock,
            config.samples_per_window,
            config.actions.clone(),
            config.trigger_refractory,
        );
        let mut sensor = WaveformSensor::new(shape);

        let base = Instant::now();
        assert!(controller.trigger(base));
        log.record_trigger_accepted();

        // Drive the loop with synthetic 1ms ticks until the window closes.
        let mut outcome = None;
        let mut elapsed = Duration::ZERO;
        while outcome.is_none() {
            elapsed += Duration::from_millis(1);
            let report = controller.tick(base + elapsed, &mut sensor, &classifier);
            if report.sampled {
                log.record_sample();
            }
            outcome = report.outcome;
        }
        log.record_window_completed();

        match outcome.unwrap() {
            SessionOutcome::Decided {
                classification,
                decision,
            } => {
                log.record_decision();

                // Recompute the window energy for display.
                let mut replay = WaveformSensor::new(shape);
                let mut buffer = FeatureBuffer::new(config.samples_per_window);
                for _ in 0..config.samples_per_window {
                    buffer.write(replay.read().expect("waveform sensor never faults"));
                }
                let stats = window_stats(&buffer.as_signal());
                println!(
                    "  Window energy: mean {:.3}, spread {:.3}",
                    stats.mean_abs, stats.spread
                );

                for entry in classification.scores() {
                    println!("    {}: {:.1}%", entry.label, entry.score * 100.0);
                }
                match &decision.winner {
                    Some((label, score)) => {
                        println!("  Prediction: {} ({:.1}%)", label, score * 100.0)
                    }
                    None => println!("  No confident prediction"),
                }
                indicator.set_state(decision.indicator);
            }
            SessionOutcome::Abandoned(err) => {
                log.record_session_abandoned();
                println!("  Capture abandoned: {err}");
            }
        }

        assert_eq!(controller.state(), CaptureState::Idle);
        println!();
    }

    println!("{}", log.summary());
    println!();
    println!("Demo complete!");
}
