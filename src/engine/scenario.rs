//! Score range from a grid of perturbed match situations.
//!
//! Balls left, score and run rate so far are observed facts and stay fixed.
//! The recent scoring rate and the wickets in hand are the uncertain inputs,
//! so each is nudged down, kept, and nudged up: 3 × 3 = 9 variants. The range
//! is the min/max over those nine predictions only; the separately computed
//! base prediction is not part of the pool and may fall outside it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::features::FeatureVector;
use crate::error::{PredictError, PredictResult};
use crate::inference::PredictorAdapter;

/// Runs added to / removed from the last-five-overs figure.
pub const LAST_FIVE_DELTAS: [i32; 3] = [-5, 0, 5];
/// Wickets added to / removed from wickets in hand.
pub const WICKET_DELTAS: [i32; 3] = [-1, 0, 1];

const MIN_WICKETS_LEFT: i32 = 1;
const MAX_WICKETS_LEFT: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub low: i32,
    /// Prediction for the unperturbed variant
    pub best_estimate: i32,
    pub high: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioVariant {
    pub last_five_delta: i32,
    pub wickets_delta: i32,
    pub features: FeatureVector,
}

/// The nine perturbed rows, last-five delta major, wickets delta minor.
pub fn scenario_grid(base: &FeatureVector) -> Vec<ScenarioVariant> {
    let mut grid = Vec::with_capacity(LAST_FIVE_DELTAS.len() * WICKET_DELTAS.len());
    for &last_five_delta in &LAST_FIVE_DELTAS {
        for &wickets_delta in &WICKET_DELTAS {
            let mut features = base.clone();
            features.wickets_left = (base.wickets_left as i32 + wickets_delta)
                .clamp(MIN_WICKETS_LEFT, MAX_WICKETS_LEFT) as u32;
            features.last_five = base.last_five.saturating_add_signed(last_five_delta);
            grid.push(ScenarioVariant {
                last_five_delta,
                wickets_delta,
                features,
            });
        }
    }
    grid
}

/// Predict every variant and reduce to `(low, best_estimate, high)`.
///
/// Any single failed prediction fails the whole range.
pub async fn score_range(
    adapter: &PredictorAdapter,
    base: &FeatureVector,
) -> PredictResult<ScoreRange> {
    let mut low = i32::MAX;
    let mut high = i32::MIN;
    let mut best_estimate = None;

    for variant in scenario_grid(base) {
        let score = adapter.predict(&variant.features).await?;
        debug!(
            "Scenario last_five{:+} wickets{:+} -> {}",
            variant.last_five_delta, variant.wickets_delta, score
        );
        low = low.min(score);
        high = high.max(score);
        if variant.last_five_delta == 0 && variant.wickets_delta == 0 {
            best_estimate = Some(score);
        }
    }

    let best_estimate = best_estimate.ok_or_else(|| {
        PredictError::ModelInference("scenario grid produced no unperturbed variant".into())
    })?;
    Ok(ScoreRange {
        low,
        best_estimate,
        high,
    })
}
