use serde::{Deserialize, Serialize};

use crate::state::models::MatchState;

/// Column names the trained pipeline consumes.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "batting_team",
    "bowling_team",
    "city",
    "curr_score",
    "balls_left",
    "wickets_left",
    "crr",
    "last_five",
];

/// One model input row. Categorical fields are passed through verbatim;
/// encoding them is the model's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub curr_score: u32,
    pub balls_left: u32,
    pub wickets_left: u32,
    pub crr: f64,
    pub last_five: u32,
}

pub fn build_features(state: &MatchState) -> FeatureVector {
    FeatureVector {
        batting_team: state.batting_team.clone(),
        bowling_team: state.bowling_team.clone(),
        city: state.city.clone(),
        curr_score: state.current_score,
        balls_left: state.balls_left(),
        wickets_left: state.wickets_left(),
        crr: state.current_run_rate(),
        last_five: state.last_five_runs,
    }
}
