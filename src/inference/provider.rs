use anyhow::Result;
use async_trait::async_trait;

use crate::engine::features::FeatureVector;

/// Trait that every score-model backend must implement.
#[async_trait]
pub trait ScorePredictor: Send + Sync {
    /// Raw (unrounded) final-score prediction for a single feature row.
    async fn predict_row(&self, row: &FeatureVector) -> Result<f64>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
