use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

pub mod models;
use models::*;

use crate::engine::features::FeatureVector;

/// Last successful base prediction together with the state it was made from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub state: MatchState,
    pub features: FeatureVector,
    pub result: PredictionResult,
}

/// Shared handle to the current session (single record behind a mutex).
///
/// Writers swap the whole record at once; readers get a cloned snapshot, so a
/// what-if never observes a half-updated base prediction.
#[derive(Clone, Default)]
pub struct Session {
    current: Arc<Mutex<Option<SessionRecord>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached record. Only called after a fully successful prediction.
    pub fn replace(&self, record: SessionRecord) {
        let mut slot = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(record);
    }

    pub fn snapshot(&self) -> Option<SessionRecord> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::features::build_features;
    use crate::engine::scenario::ScoreRange;
    use crate::inference::testing::sample_input;
    use chrono::Utc;

    fn record(score: i32) -> SessionRecord {
        let state = MatchState::from_input(&sample_input()).unwrap();
        let features = build_features(&state);
        SessionRecord {
            state,
            features,
            result: PredictionResult {
                predicted_score: score,
                score_range: ScoreRange {
                    low: score - 10,
                    best_estimate: score,
                    high: score + 10,
                },
                win_probability: None,
                summary: PredictionSummary {
                    current_score: 100,
                    runs_to_add: score - 100,
                    current_run_rate: 7.9,
                    overs_left: "7.2".into(),
                    wickets_left: 8,
                },
                predicted_at: Utc::now(),
            },
        }
    }

    #[test]
    fn starts_empty() {
        let session = Session::new();
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn replace_swaps_whole_record_across_clones() {
        let session = Session::new();
        let handle = session.clone();
        session.replace(record(170));
        session.replace(record(185));
        let current = handle.snapshot().unwrap();
        assert_eq!(current.result.predicted_score, 185);
        assert_eq!(current.result.score_range.low, 175);
    }
}
