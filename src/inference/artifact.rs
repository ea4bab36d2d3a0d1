//! Local model artifact: a linear regression over the numeric features plus
//! one-hot offsets for the categorical ones, stored as JSON.
//!
//! ```json
//! {
//!   "intercept": 12.5,
//!   "weights": { "curr_score": 1.0, "balls_left": 0.4, "wickets_left": 3.1,
//!                "crr": 2.2, "last_five": 0.15 },
//!   "batting_team": { "India": 6.0 },
//!   "bowling_team": { "Australia": -2.5 },
//!   "city": { "Mumbai": 4.0 }
//! }
//! ```
//!
//! Categories missing from the artifact contribute nothing, matching a one-hot
//! encoder that ignores unknown values.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::provider::ScorePredictor;
use crate::engine::features::FeatureVector;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericWeights {
    #[serde(default)]
    pub curr_score: f64,
    #[serde(default)]
    pub balls_left: f64,
    #[serde(default)]
    pub wickets_left: f64,
    #[serde(default)]
    pub crr: f64,
    #[serde(default)]
    pub last_five: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearScoreModel {
    pub intercept: f64,
    #[serde(default)]
    pub weights: NumericWeights,
    #[serde(default)]
    pub batting_team: HashMap<String, f64>,
    #[serde(default)]
    pub bowling_team: HashMap<String, f64>,
    #[serde(default)]
    pub city: HashMap<String, f64>,
}

impl LinearScoreModel {
    /// Load and check an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model artifact {}", path.display()))?;
        let model = Self::from_json(&raw)
            .with_context(|| format!("Invalid model artifact {}", path.display()))?;
        info!(
            "Loaded model artifact {} ({} batting, {} bowling, {} city offsets)",
            path.display(),
            model.batting_team.len(),
            model.bowling_team.len(),
            model.city.len()
        );
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let model: LinearScoreModel =
            serde_json::from_str(raw).context("Failed to parse model artifact JSON")?;
        model.check_finite()?;
        Ok(model)
    }

    fn check_finite(&self) -> Result<()> {
        let w = &self.weights;
        let numeric = [
            ("intercept", self.intercept),
            ("curr_score", w.curr_score),
            ("balls_left", w.balls_left),
            ("wickets_left", w.wickets_left),
            ("crr", w.crr),
            ("last_five", w.last_five),
        ];
        for (name, value) in numeric {
            if !value.is_finite() {
                anyhow::bail!("weight '{}' is not finite", name);
            }
        }
        for (group, table) in [
            ("batting_team", &self.batting_team),
            ("bowling_team", &self.bowling_team),
            ("city", &self.city),
        ] {
            if let Some((key, _)) = table.iter().find(|(_, v)| !v.is_finite()) {
                anyhow::bail!("{} offset for '{}' is not finite", group, key);
            }
        }
        Ok(())
    }

    pub fn score(&self, row: &FeatureVector) -> f64 {
        let w = &self.weights;
        let offset = |table: &HashMap<String, f64>, key: &str| table.get(key).copied().unwrap_or(0.0);
        self.intercept
            + w.curr_score * row.curr_score as f64
            + w.balls_left * row.balls_left as f64
            + w.wickets_left * row.wickets_left as f64
            + w.crr * row.crr
            + w.last_five * row.last_five as f64
            + offset(&self.batting_team, &row.batting_team)
            + offset(&self.bowling_team, &row.bowling_team)
            + offset(&self.city, &row.city)
    }
}

#[async_trait]
impl ScorePredictor for LinearScoreModel {
    async fn predict_row(&self, row: &FeatureVector) -> Result<f64> {
        Ok(self.score(row))
    }

    fn name(&self) -> &str {
        "linear-artifact"
    }
}
