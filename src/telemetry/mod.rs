//! Run telemetry for the gesture controller.
//!
//! Counter-based observability only: delivery or persistence failures here
//! never affect pipeline correctness.

pub mod log;

pub use log::{
    create_shared_log, create_shared_log_with_persistence, PipelineLog, PipelineStats,
    SharedPipelineLog,
};
