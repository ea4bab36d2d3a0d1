pub mod features;
pub mod overs;
pub mod scenario;
pub mod what_if;
pub mod win_probability;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{PredictError, PredictResult};
use crate::inference::PredictorAdapter;
use crate::state::models::{MatchInput, MatchState, PredictionResult, PredictionSummary};
use crate::state::{Session, SessionRecord};

use features::build_features;
use overs::format_overs_left;
use what_if::{WhatIfDeltas, WhatIfOutcome};
use win_probability::{estimate_win_probability, ChaseInputs};

/// Runs a base prediction end to end and owns the session update.
///
/// The session is written only after the point prediction, the scenario
/// range and (when chasing) the win probability have all succeeded, so a
/// failed request leaves the previous result intact.
#[derive(Clone)]
pub struct PredictionEngine {
    adapter: PredictorAdapter,
    session: Session,
}

impl PredictionEngine {
    pub fn new(adapter: PredictorAdapter, session: Session) -> Self {
        PredictionEngine { adapter, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn predict(&self, input: &MatchInput) -> PredictResult<PredictionResult> {
        let state = MatchState::from_input(input)?;
        let features = build_features(&state);

        let predicted_score = self.adapter.predict(&features).await?;
        let score_range = scenario::score_range(&self.adapter, &features).await?;

        let win_probability = state.target().map(|target_score| {
            estimate_win_probability(&ChaseInputs {
                predicted_score,
                target_score,
                current_score: state.current_score,
                balls_left: features.balls_left,
                wickets_left: features.wickets_left,
                current_run_rate: features.crr,
            })
        });

        let result = PredictionResult {
            predicted_score,
            score_range,
            win_probability,
            summary: PredictionSummary {
                current_score: state.current_score,
                runs_to_add: predicted_score - state.current_score as i32,
                current_run_rate: features.crr,
                overs_left: format_overs_left(features.balls_left),
                wickets_left: features.wickets_left,
            },
            predicted_at: Utc::now(),
        };

        info!(
            "{} vs {} at {}: {} after {} (balls_left={}) -> predicted {} [{}-{}]{}",
            state.batting_team,
            state.bowling_team,
            state.city,
            state.current_score,
            state.overs_completed,
            features.balls_left,
            predicted_score,
            score_range.low,
            score_range.high,
            win_probability
                .map(|w| format!(", win {}%", w.batting_pct))
                .unwrap_or_default()
        );
        if let Some(rrr) = result.required_run_rate() {
            debug!("Required run rate {:.2} vs current {:.2}", rrr, features.crr);
        }

        self.session.replace(SessionRecord {
            state,
            features,
            result: result.clone(),
        });
        Ok(result)
    }

    /// Compare an adjusted situation against the cached base prediction.
    /// Never modifies the session.
    pub async fn what_if(&self, deltas: &WhatIfDeltas) -> PredictResult<WhatIfOutcome> {
        let record = self
            .session
            .snapshot()
            .ok_or(PredictError::NoBasePrediction)?;
        let outcome = what_if::evaluate(
            &self.adapter,
            &record.features,
            record.result.predicted_score,
            deltas,
        )
        .await
        .inspect_err(|e| warn!("What-if failed: {}", e))?;
        info!(
            "What-if {:?}: {} -> {} ({:+})",
            deltas, outcome.base_score, outcome.what_if_score, outcome.delta
        );
        Ok(outcome)
    }
}
