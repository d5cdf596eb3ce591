//! Winner selection and indicator mapping.
//!
//! One stable scan over the classification result picks the label with the
//! highest strictly positive score; the action table turns that label into
//! an indicator instruction. Labels outside the table are not errors, they
//! are "no action".

use crate::classify::{ClassScore, Classification};
use crate::hardware::IndicatorState;
use serde::{Deserialize, Serialize};

/// One label-to-indicator mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub label: String,
    pub indicator: IndicatorState,
}

/// Static lookup from winning label to indicator instruction.
///
/// Fixed per deployment; it lives in the config file and is never changed at
/// runtime. Lookup is exact-match on the label string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTable {
    entries: Vec<ActionEntry>,
}

impl ActionTable {
    pub fn new(entries: Vec<ActionEntry>) -> Self {
        Self { entries }
    }

    /// Build a table from (label, indicator) pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, IndicatorState)>,
        S: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(label, indicator)| ActionEntry {
                    label: label.into(),
                    indicator,
                })
                .collect(),
        }
    }

    pub fn lookup(&self, label: &str) -> Option<IndicatorState> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.indicator)
    }

    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActionTable {
    /// The deployment's gesture set: O, Z and V strokes.
    fn default() -> Self {
        Self::from_pairs([
            ("O", IndicatorState::Red),
            ("Z", IndicatorState::Green),
            ("V", IndicatorState::Blue),
        ])
    }
}

/// Outcome of the decision policy for one classification result.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Winning label and score, when any class cleared the confidence floor.
    pub winner: Option<(String, f32)>,
    /// Indicator instruction; `Off` when no confident or recognized winner.
    pub indicator: IndicatorState,
}

/// Pick the highest-scoring class, requiring strictly positive confidence.
///
/// The scan is stable and uses strict `>`, so the first of equal scores
/// wins. Scores are not assumed to sum to 1.
pub fn select_winner(classification: &Classification) -> Option<&ClassScore> {
    let mut best: Option<&ClassScore> = None;
    let mut best_score = 0.0f32;

    for entry in classification.scores() {
        if entry.score > best_score {
            best_score = entry.score;
            best = Some(entry);
        }
    }

    best
}

/// Map a classification result to an indicator instruction.
pub fn decide(classification: &Classification, actions: &ActionTable) -> Decision {
    match select_winner(classification) {
        Some(winner) => Decision {
            indicator: actions
                .lookup(&winner.label)
                .unwrap_or(IndicatorState::Off),
            winner: Some((winner.label.clone(), winner.score)),
        },
        None => Decision {
            winner: None,
            indicator: IndicatorState::Off,
        },
    }
}
