pub mod artifact;
pub mod provider;
pub mod remote;

pub use artifact::LinearScoreModel;
pub use provider::ScorePredictor;
pub use remote::RemotePredictor;

use std::sync::Arc;
use tracing::{debug, warn};

use crate::engine::features::FeatureVector;
use crate::error::{PredictError, PredictResult};

/// The single boundary to the model collaborator.
///
/// Wraps a shared, read-only predictor and turns its raw float output into a
/// whole-run score. Rounding is half-to-even, so 180.5 becomes 180.
#[derive(Clone)]
pub struct PredictorAdapter {
    predictor: Arc<dyn ScorePredictor>,
}

impl PredictorAdapter {
    pub fn new(predictor: Arc<dyn ScorePredictor>) -> Self {
        PredictorAdapter { predictor }
    }

    pub fn name(&self) -> &str {
        self.predictor.name()
    }

    pub async fn predict(&self, features: &FeatureVector) -> PredictResult<i32> {
        let raw = self.predictor.predict_row(features).await.map_err(|e| {
            warn!("{} inference failed: {:#}", self.predictor.name(), e);
            PredictError::ModelInference(format!("{:#}", e))
        })?;
        if !raw.is_finite() {
            warn!("{} returned non-finite prediction {}", self.predictor.name(), raw);
            return Err(PredictError::ModelInference(format!(
                "{} returned non-finite prediction {}",
                self.predictor.name(),
                raw
            )));
        }
        let score = raw.round_ties_even() as i32;
        debug!(
            "{} predicted {:.3} -> {} (balls_left={}, wickets_left={}, last_five={})",
            self.predictor.name(),
            raw,
            score,
            features.balls_left,
            features.wickets_left,
            features.last_five
        );
        Ok(score)
    }
}
