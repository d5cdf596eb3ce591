//! Classifier seam: signal handoff, sufficiency guard, error surface.
//!
//! The capture core never talks to a model directly. It hands the filled
//! buffer to [`run_classifier`], which refuses to present a short window to
//! the backend: classifying a partial or garbage tail is the one condition
//! this path must prevent.

use crate::core::buffer::{FeatureBuffer, FeatureSignal};
use serde::{Deserialize, Serialize};

/// One (label, score) pair from an inference pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub label: String,
    pub score: f32,
}

/// Ordered per-class scores from one inference pass.
///
/// Scores live in [0, 1] but are not guaranteed to sum to 1; backends may
/// emit anomaly or uncertainty mass alongside the class scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    scores: Vec<ClassScore>,
}

impl Classification {
    pub fn new(scores: Vec<ClassScore>) -> Self {
        Self { scores }
    }

    /// Build a result from (label, score) pairs, preserving order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            scores: pairs
                .into_iter()
                .map(|(label, score)| ClassScore {
                    label: label.into(),
                    score,
                })
                .collect(),
        }
    }

    pub fn scores(&self) -> &[ClassScore] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Opaque non-success status reported by a classifier backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierError {
    /// Backend-specific status code; meaningful only to the backend.
    pub code: i32,
}

impl ClassifierError {
    pub fn new(code: i32) -> Self {
        Self { code }
    }
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "classifier error (status {})", self.code)
    }
}

impl std::error::Error for ClassifierError {}

/// Why a completed window could not be classified.
///
/// Neither variant is fatal: the session is abandoned, the state machine
/// re-arms, and the indicator is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Fewer values were captured than the classifier requires.
    InsufficientData { have: usize, need: usize },
    /// The backend reported a non-success status. Never retried.
    Classifier(ClassifierError),
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::InsufficientData { have, need } => {
                write!(f, "insufficient data: {have} of {need} feature values captured")
            }
            InferenceError::Classifier(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InferenceError::InsufficientData { .. } => None,
            InferenceError::Classifier(e) => Some(e),
        }
    }
}

/// A scored-classification backend.
///
/// The signal is sized to exactly the feature length the deployment was
/// configured for; implementations may read it by index or as a whole slice.
pub trait GestureClassifier {
    fn classify(&self, signal: &FeatureSignal<'_>) -> Result<Classification, ClassifierError>;
}

/// Run one inference pass over a filled buffer.
///
/// The sufficiency check runs before the backend is invoked, so a backend
/// never sees a short window.
pub fn run_classifier<C>(
    buffer: &FeatureBuffer,
    classifier: &C,
) -> Result<Classification, InferenceError>
where
    C: GestureClassifier + ?Sized,
{
    let have = buffer.feature_len();
    let need = buffer.required_len();

    if have < need {
        return Err(InferenceError::InsufficientData { have, need });
    }

    classifier
        .classify(&buffer.as_signal())
        .map_err(InferenceError::Classifier)
}
