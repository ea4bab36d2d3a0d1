use serde::{Deserialize, Serialize};

use super::features::FeatureVector;
use crate::error::PredictResult;
use crate::inference::PredictorAdapter;

const MIN_WICKETS_LEFT: u32 = 1;

/// User-chosen adjustments applied to the cached base situation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatIfDeltas {
    /// Wickets that fall on top of the current tally
    pub extra_wickets: u32,
    pub run_rate_change: f64,
    pub last_five_change: i32,
    pub score_change: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaDirection {
    Increase,
    Decrease,
    Unchanged,
}

impl DeltaDirection {
    pub fn classify(delta: i32) -> Self {
        match delta {
            d if d > 0 => DeltaDirection::Increase,
            d if d < 0 => DeltaDirection::Decrease,
            _ => DeltaDirection::Unchanged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfOutcome {
    pub base_score: i32,
    pub what_if_score: i32,
    /// `what_if_score - base_score`
    pub delta: i32,
    pub direction: DeltaDirection,
    pub features: FeatureVector,
}

/// Adjusted row: at least one wicket in hand; run rate, last-five runs and
/// score never below zero. Balls left are unchanged.
pub fn apply_deltas(base: &FeatureVector, deltas: &WhatIfDeltas) -> FeatureVector {
    let mut adjusted = base.clone();
    adjusted.wickets_left = base
        .wickets_left
        .saturating_sub(deltas.extra_wickets)
        .max(MIN_WICKETS_LEFT);
    adjusted.crr = (base.crr + deltas.run_rate_change).max(0.0);
    adjusted.last_five = base.last_five.saturating_add_signed(deltas.last_five_change);
    adjusted.curr_score = base.curr_score.saturating_add_signed(deltas.score_change);
    adjusted
}

/// One prediction on the adjusted row, compared against the cached base score.
pub async fn evaluate(
    adapter: &PredictorAdapter,
    base_features: &FeatureVector,
    base_score: i32,
    deltas: &WhatIfDeltas,
) -> PredictResult<WhatIfOutcome> {
    let features = apply_deltas(base_features, deltas);
    let what_if_score = adapter.predict(&features).await?;
    let delta = what_if_score - base_score;
    Ok(WhatIfOutcome {
        base_score,
        what_if_score,
        delta,
        direction: DeltaDirection::classify(delta),
        features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictError;
    use crate::inference::testing::{adapter, sample_features, StubPredictor};
    use approx::assert_relative_eq;

    #[test]
    fn classification() {
        assert_eq!(DeltaDirection::classify(7), DeltaDirection::Increase);
        assert_eq!(DeltaDirection::classify(-1), DeltaDirection::Decrease);
        assert_eq!(DeltaDirection::classify(0), DeltaDirection::Unchanged);
    }

    #[test]
    fn deltas_apply_with_floors() {
        let base = sample_features();
        let adjusted = apply_deltas(
            &base,
            &WhatIfDeltas {
                extra_wickets: 12,
                run_rate_change: -15.0,
                last_five_change: -40,
                score_change: -150,
            },
        );
        assert_eq!(adjusted.wickets_left, 1);
        assert_eq!(adjusted.crr, 0.0);
        assert_eq!(adjusted.last_five, 0);
        assert_eq!(adjusted.curr_score, 0);
        assert_eq!(adjusted.balls_left, base.balls_left);
    }

    #[test]
    fn deltas_apply_upward() {
        let adjusted = apply_deltas(
            &sample_features(),
            &WhatIfDeltas {
                extra_wickets: 2,
                run_rate_change: 1.5,
                last_five_change: 10,
                score_change: 12,
            },
        );
        assert_eq!(adjusted.wickets_left, 6);
        assert_relative_eq!(adjusted.crr, 11.5, epsilon = 1e-12);
        assert_eq!(adjusted.last_five, 40);
        assert_eq!(adjusted.curr_score, 112);
    }

    #[test]
    fn zero_deltas_leave_row_untouched() {
        let base = sample_features();
        assert_eq!(apply_deltas(&base, &WhatIfDeltas::default()), base);
    }

    #[tokio::test]
    async fn reports_signed_difference() {
        let stub = StubPredictor::linear();
        let base = sample_features();
        let base_score = adapter(&stub).predict(&base).await.unwrap();

        let losing = WhatIfDeltas {
            extra_wickets: 3,
            ..Default::default()
        };
        let out = evaluate(&adapter(&stub), &base, base_score, &losing).await.unwrap();
        assert_eq!(out.delta, -6);
        assert_eq!(out.direction, DeltaDirection::Decrease);

        let quicker = WhatIfDeltas {
            last_five_change: 10,
            ..Default::default()
        };
        let out = evaluate(&adapter(&stub), &base, base_score, &quicker).await.unwrap();
        assert_eq!(out.delta, 5);
        assert_eq!(out.direction, DeltaDirection::Increase);

        let out = evaluate(&adapter(&stub), &base, base_score, &WhatIfDeltas::default())
            .await
            .unwrap();
        assert_eq!(out.direction, DeltaDirection::Unchanged);
        assert_eq!(stub.calls(), 4);
    }

    #[tokio::test]
    async fn inference_failure_propagates() {
        let stub = StubPredictor::failing("timeout");
        let err = evaluate(&adapter(&stub), &sample_features(), 180, &WhatIfDeltas::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::ModelInference(_)));
    }

    #[test]
    fn deltas_deserialize_partially() {
        let d: WhatIfDeltas = serde_json::from_str(r#"{"extra_wickets": 1}"#).unwrap();
        assert_eq!(d.extra_wickets, 1);
        assert_eq!(d.score_change, 0);
    }
}
