//! Classification seam for the gesture controller.
//!
//! This module contains:
//! - The `GestureClassifier` trait every backend implements
//! - The adapter that guards and runs one inference pass per session
//! - The built-in energy-threshold backend used when no model is linked

pub mod adapter;
pub mod heuristic;

// Re-export commonly used types
pub use adapter::{
    run_classifier, ClassScore, Classification, ClassifierError, GestureClassifier, InferenceError,
};
pub use heuristic::{window_stats, EnergyClassifier, WindowStats, LABELS};
