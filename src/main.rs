//! Gesturewand CLI
//!
//! Runs the capture-and-classify pipeline against the simulated hardware
//! backends and reports what the controller did.

use clap::{Parser, Subcommand};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use uuid::Uuid;

use gesturewand::{
    classify::EnergyClassifier,
    config::Config,
    core::{CaptureController, CaptureState, SampleClock, SessionOutcome},
    hardware::sim::{ChannelTrigger, ConsoleIndicator, GestureShape, ScriptedTrigger, WaveformSensor},
    hardware::{Indicator, TriggerInput},
    telemetry::create_shared_log_with_persistence,
    VERSION,
};

#[derive(Parser)]
#[command(name = "gesturewand")]
#[command(version = VERSION)]
#[command(about = "Button-triggered gesture capture and classification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline against the simulated hardware
    Run {
        /// Gesture waveform fed by the simulated sensor (rest, circle, zigzag, chop)
        #[arg(long, default_value = "circle")]
        gesture: String,

        /// Number of scripted capture sessions
        #[arg(long, default_value = "3")]
        captures: u32,

        /// Wait for Enter between captures instead of auto-triggering
        #[arg(long)]
        interactive: bool,
    },

    /// Show persisted pipeline statistics
    Status,

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            gesture,
            captures,
            interactive,
        } => {
            cmd_run(&gesture, captures, interactive);
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn cmd_run(gesture: &str, captures: u32, interactive: bool) {
    println!("Gesturewand v{VERSION}");
    println!();

    let Some(shape) = GestureShape::from_name(gesture) else {
        eprintln!("Error: unknown gesture '{gesture}' (expected rest, circle, zigzag or chop)");
        std::process::exit(1);
    };

    let config = Config::load().unwrap_or_default();
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    let run_id = Uuid::new_v4();
    println!("Run ID: {run_id}");
    println!("Starting capture pipeline...");
    println!("  Gesture waveform: {}", shape.name());
    println!(
        "  Sample interval: {}ms",
        config.sample_interval.as_millis()
    );
    println!(
        "  Window duration: {}ms",
        config.window_duration.as_millis()
    );
    println!(
        "  Feature length: {} ({} samples x 3 axes)",
        config.feature_len(),
        config.samples_per_window
    );
    for entry in config.actions.entries() {
        println!("  Action: {} -> {}", entry.label, entry.indicator);
    }
    println!();

    // Set up telemetry
    let log = create_shared_log_with_persistence(config.data_path.join("telemetry.json"));

    // Build the pipeline
    let clock = SampleClock::new(config.sample_interval, config.window_duration);
    let mut controller = CaptureController::new(
        clock,
        config.samples_per_window,
        config.actions.clone(),
        config.trigger_refractory,
    );
    let mut sensor = WaveformSensor::new(shape);
    let classifier = EnergyClassifier::new();
    let mut indicator = ConsoleIndicator::new();

    // Trigger source: scripted presses, or Enter keypresses relayed from a
    // reader thread.
    let mut trigger: Box<dyn TriggerInput> = if interactive {
        let (tx, rx) = crossbeam_channel::bounded(16);
        thread::spawn(move || {
            let mut line = String::new();
            loop {
                line.clear();
                if std::io::stdin().read_line(&mut line).is_err() {
                    return;
                }
                if tx.send(()).is_err() {
                    return;
                }
            }
        });
        println!("Press Enter to capture, Ctrl+C to stop");
        Box::new(ChannelTrigger::new(rx))
    } else {
        println!("Scripting {captures} capture(s)");
        Box::new(ScriptedTrigger::with_presses(captures))
    };
    println!();

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let mut completed: u32 = 0;

    while running.load(Ordering::SeqCst) {
        let now = Instant::now();

        // Poll the trigger only while idle so scripted presses are not
        // burned against a session in progress.
        if controller.state() == CaptureState::Idle
            && trigger.poll()
            && controller.trigger(now)
        {
            log.record_trigger_accepted();
            println!("Trigger accepted. Capturing...");
        }

        let report = controller.tick(now, &mut sensor, &classifier);
        if report.sampled {
            log.record_sample();
        }
        if let Some(fault) = report.sensor_fault {
            log.record_sensor_fault();
            eprintln!("Warning: sample lost: {fault}");
        }

        if let Some(outcome) = report.outcome {
            log.record_window_completed();
            completed += 1;

            match outcome {
                SessionOutcome::Decided {
                    classification,
                    decision,
                } => {
                    log.record_decision();
                    for entry in classification.scores() {
                        println!("  {}: {:.2}%", entry.label, entry.score * 100.0);
                    }
                    match &decision.winner {
                        Some((label, score)) => {
                            println!(
                                "Prediction: {} ({:.1}%) -> indicator {}",
                                label,
                                score * 100.0,
                                decision.indicator
                            );
                        }
                        None => println!("No confident prediction -> indicator off"),
                    }
                    indicator.set_state(decision.indicator);
                }
                SessionOutcome::Abandoned(err) => {
                    log.record_session_abandoned();
                    eprintln!(
                        "Capture abandoned ({} of {} samples): {err}",
                        controller.sample_count(),
                        config.samples_per_window
                    );
                }
            }
            println!();
        }

        if !interactive && completed >= captures {
            break;
        }

        thread::sleep(Duration::from_millis(1));
    }

    // Save telemetry
    if let Err(e) = log.save() {
        eprintln!("Warning: Could not save pipeline stats: {e}");
    }

    println!("{}", log.summary());
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("Gesturewand Status");
    println!("==================");
    println!();

    println!("Configuration:");
    println!(
        "  Sample interval: {}ms",
        config.sample_interval.as_millis()
    );
    println!(
        "  Window duration: {}ms",
        config.window_duration.as_millis()
    );
    println!("  Samples per window: {}", config.samples_per_window);
    println!(
        "  Trigger refractory: {}ms",
        config.trigger_refractory.as_millis()
    );
    println!();

    // Load and show cumulative counters if available
    let stats_path = config.data_path.join("telemetry.json");
    if stats_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&stats_path) {
            if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                println!("Cumulative Statistics:");
                if let Some(triggers) = stats.get("triggers_accepted") {
                    println!("  Triggers accepted: {triggers}");
                }
                if let Some(samples) = stats.get("samples_captured") {
                    println!("  Samples captured: {samples}");
                }
                if let Some(windows) = stats.get("windows_completed") {
                    println!("  Windows completed: {windows}");
                }
                if let Some(decisions) = stats.get("decisions") {
                    println!("  Decisions: {decisions}");
                }
                if let Some(abandoned) = stats.get("sessions_abandoned") {
                    println!("  Sessions abandoned: {abandoned}");
                }
                if let Some(device) = stats.get("device") {
                    println!("  Device: {device}");
                }
            }
        }
    } else {
        println!("No previous run data found.");
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}
