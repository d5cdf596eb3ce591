//! Pipeline activity counters.
//!
//! This module tracks what the controller did (triggers, samples, windows,
//! decisions) without retaining any captured sensor data. Counters can be
//! persisted across runs; failure to persist never affects the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Activity counters for the current run.
#[derive(Debug)]
pub struct PipelineLog {
    /// Trigger edges accepted by the state machine
    triggers_accepted: AtomicU64,
    /// Sensor samples written into the feature buffer
    samples_captured: AtomicU64,
    /// Due samples lost to sensor read failures
    sensor_faults: AtomicU64,
    /// Capture windows that ran to their full duration
    windows_completed: AtomicU64,
    /// Windows that produced a decision
    decisions: AtomicU64,
    /// Windows abandoned (insufficient data or classifier failure)
    sessions_abandoned: AtomicU64,
    /// Run start time
    run_start: DateTime<Utc>,
    /// Path for persisting counters
    persist_path: Option<PathBuf>,
}

impl PipelineLog {
    pub fn new() -> Self {
        Self {
            triggers_accepted: AtomicU64::new(0),
            samples_captured: AtomicU64::new(0),
            sensor_faults: AtomicU64::new(0),
            windows_completed: AtomicU64::new(0),
            decisions: AtomicU64::new(0),
            sessions_abandoned: AtomicU64::new(0),
            run_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create a log that loads from and saves to `path`.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut log = Self::new();
        log.persist_path = Some(path);

        if let Err(e) = log.load() {
            eprintln!("Note: Could not load previous pipeline stats: {e}");
        }

        log
    }

    pub fn record_trigger_accepted(&self) {
        self.triggers_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sample(&self) {
        self.samples_captured.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sensor_fault(&self) {
        self.sensor_faults.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_window_completed(&self) {
        self.windows_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decision(&self) {
        self.decisions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session_abandoned(&self) {
        self.sessions_abandoned.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            triggers_accepted: self.triggers_accepted.load(Ordering::Relaxed),
            samples_captured: self.samples_captured.load(Ordering::Relaxed),
            sensor_faults: self.sensor_faults.load(Ordering::Relaxed),
            windows_completed: self.windows_completed.load(Ordering::Relaxed),
            decisions: self.decisions.load(Ordering::Relaxed),
            sessions_abandoned: self.sessions_abandoned.load(Ordering::Relaxed),
            run_start: self.run_start,
            run_duration_secs: (Utc::now() - self.run_start).num_seconds() as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Run Statistics:\n\
             - Triggers accepted: {}\n\
             - Samples captured: {}\n\
             - Sensor faults: {}\n\
             - Windows completed: {}\n\
             - Decisions: {}\n\
             - Sessions abandoned: {}\n\
             - Run duration: {} seconds",
            stats.triggers_accepted,
            stats.samples_captured,
            stats.sensor_faults,
            stats.windows_completed,
            stats.decisions,
            stats.sessions_abandoned,
            stats.run_duration_secs
        )
    }

    /// Save counters to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let stats = self.stats();
            let persisted = PersistedStats {
                triggers_accepted: stats.triggers_accepted,
                samples_captured: stats.samples_captured,
                sensor_faults: stats.sensor_faults,
                windows_completed: stats.windows_completed,
                decisions: stats.decisions,
                sessions_abandoned: stats.sessions_abandoned,
                device: device_id(),
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;

            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load counters from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.triggers_accepted
                    .store(persisted.triggers_accepted, Ordering::Relaxed);
                self.samples_captured
                    .store(persisted.samples_captured, Ordering::Relaxed);
                self.sensor_faults
                    .store(persisted.sensor_faults, Ordering::Relaxed);
                self.windows_completed
                    .store(persisted.windows_completed, Ordering::Relaxed);
                self.decisions.store(persisted.decisions, Ordering::Relaxed);
                self.sessions_abandoned
                    .store(persisted.sessions_abandoned, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.triggers_accepted.store(0, Ordering::Relaxed);
        self.samples_captured.store(0, Ordering::Relaxed);
        self.sensor_faults.store(0, Ordering::Relaxed);
        self.windows_completed.store(0, Ordering::Relaxed);
        self.decisions.store(0, Ordering::Relaxed);
        self.sessions_abandoned.store(0, Ordering::Relaxed);
    }
}

impl Default for PipelineLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of pipeline statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStats {
    pub triggers_accepted: u64,
    pub samples_captured: u64,
    pub sensor_faults: u64,
    pub windows_completed: u64,
    pub decisions: u64,
    pub sessions_abandoned: u64,
    pub run_start: DateTime<Utc>,
    pub run_duration_secs: u64,
}

/// Stats format for persistence.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    triggers_accepted: u64,
    samples_captured: u64,
    sensor_faults: u64,
    windows_completed: u64,
    decisions: u64,
    sessions_abandoned: u64,
    device: String,
    last_updated: DateTime<Utc>,
}

/// Device identifier recorded alongside persisted counters.
fn device_id() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Thread-safe shared pipeline log.
pub type SharedPipelineLog = Arc<PipelineLog>;

/// Create a new shared pipeline log.
pub fn create_shared_log() -> SharedPipelineLog {
    Arc::new(PipelineLog::new())
}

/// Create a new shared pipeline log with persistence.
pub fn create_shared_log_with_persistence(path: PathBuf) -> SharedPipelineLog {
    Arc::new(PipelineLog::with_persistence(path))
}
