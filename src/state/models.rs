use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{is_known_city, is_known_team};
use crate::engine::overs::{self, balls_from_overs, is_legal_overs};
use crate::engine::scenario::ScoreRange;
use crate::engine::win_probability::WinProbability;
use crate::error::{PredictError, PredictResult};

/// Upper bounds of the form's numeric inputs.
pub const MAX_SCORE: u32 = 500;
pub const MAX_WICKETS: u32 = 10;
pub const MAX_LAST_FIVE_RUNS: u32 = 200;
pub const MAX_TARGET: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsKind {
    #[default]
    First,
    Second,
}

/// Raw form submission, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInput {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub current_score: u32,
    /// Legal overs notation, e.g. `12.4`
    pub overs_completed: f64,
    pub wickets_lost: u32,
    pub last_five_runs: u32,
    #[serde(default)]
    pub innings: InningsKind,
    /// Chase target; only meaningful in the second innings
    #[serde(default)]
    pub target_score: Option<u32>,
}

/// Which innings is in progress. A target exists only while chasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Innings {
    First,
    Second { target: u32 },
}

/// Validated live match situation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub current_score: u32,
    pub overs_completed: f64,
    pub wickets_lost: u32,
    pub last_five_runs: u32,
    pub innings: Innings,
}

impl MatchState {
    /// Validate a form submission.
    ///
    /// The matchup check runs first so a same-team selection is always
    /// reported as such, whatever else is wrong with the input.
    pub fn from_input(input: &MatchInput) -> PredictResult<Self> {
        if input.batting_team == input.bowling_team {
            return Err(PredictError::InvalidMatchup {
                team: input.batting_team.clone(),
            });
        }
        for team in [&input.batting_team, &input.bowling_team] {
            if !is_known_team(team) {
                return Err(invalid(format!("unknown team '{}'", team)));
            }
        }
        if !is_known_city(&input.city) {
            return Err(invalid(format!("unknown venue city '{}'", input.city)));
        }
        if input.current_score > MAX_SCORE {
            return Err(invalid(format!(
                "current score {} exceeds {}",
                input.current_score, MAX_SCORE
            )));
        }
        if !is_legal_overs(input.overs_completed) {
            return Err(invalid(format!(
                "overs completed {} is not a legal value between 0.1 and 19.6",
                input.overs_completed
            )));
        }
        if input.wickets_lost > MAX_WICKETS {
            return Err(invalid(format!(
                "wickets lost {} exceeds {}",
                input.wickets_lost, MAX_WICKETS
            )));
        }
        if input.last_five_runs > MAX_LAST_FIVE_RUNS {
            return Err(invalid(format!(
                "last-five-overs runs {} exceeds {}",
                input.last_five_runs, MAX_LAST_FIVE_RUNS
            )));
        }

        let innings = match (input.innings, input.target_score) {
            (InningsKind::First, None) => Innings::First,
            (InningsKind::First, Some(_)) => {
                return Err(invalid("target score is only accepted in the second innings".into()))
            }
            (InningsKind::Second, Some(target)) if (1..=MAX_TARGET).contains(&target) => {
                Innings::Second { target }
            }
            (InningsKind::Second, Some(target)) => {
                return Err(invalid(format!(
                    "target score {} must be between 1 and {}",
                    target, MAX_TARGET
                )))
            }
            (InningsKind::Second, None) => {
                return Err(invalid("second innings requires a target score".into()))
            }
        };

        Ok(MatchState {
            batting_team: input.batting_team.clone(),
            bowling_team: input.bowling_team.clone(),
            city: input.city.clone(),
            current_score: input.current_score,
            overs_completed: input.overs_completed,
            wickets_lost: input.wickets_lost,
            last_five_runs: input.last_five_runs,
            innings,
        })
    }

    pub fn balls_bowled(&self) -> u32 {
        balls_from_overs(self.overs_completed)
    }

    pub fn balls_left(&self) -> u32 {
        overs::balls_left(self.balls_bowled())
    }

    pub fn wickets_left(&self) -> u32 {
        MAX_WICKETS.saturating_sub(self.wickets_lost)
    }

    /// Runs per over so far; zero before the first ball.
    pub fn current_run_rate(&self) -> f64 {
        let balls = self.balls_bowled();
        if balls == 0 {
            return 0.0;
        }
        self.current_score as f64 / (balls as f64 / overs::BALLS_PER_OVER as f64)
    }

    pub fn target(&self) -> Option<u32> {
        match self.innings {
            Innings::First => None,
            Innings::Second { target } => Some(target),
        }
    }
}

fn invalid(msg: String) -> PredictError {
    PredictError::InvalidInput(msg)
}

/// Headline figures shown next to the predicted score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub current_score: u32,
    pub runs_to_add: i32,
    pub current_run_rate: f64,
    /// Display form, e.g. `"7.2"`
    pub overs_left: String,
    pub wickets_left: u32,
}

/// Output of one base prediction, cached for what-if comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_score: i32,
    pub score_range: ScoreRange,
    /// Second innings only
    pub win_probability: Option<WinProbability>,
    pub summary: PredictionSummary,
    pub predicted_at: DateTime<Utc>,
}

impl PredictionResult {
    pub fn required_run_rate(&self) -> Option<f64> {
        self.win_probability.as_ref().map(|w| w.required_run_rate)
    }
}
