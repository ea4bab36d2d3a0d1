//! Second-innings win probability for the chasing side.
//!
//! This is a heuristic, not a fitted model. Its output is defined entirely by
//! the steps below and must be reproduced exactly:
//! - **Score margin**: logistic on `predicted - target`, steeper as the
//!   innings progresses (less time left for the prediction to be wrong)
//! - **Wickets**: blend toward 50/50 as wickets run out
//! - **Run-rate pressure**: damp or boost by how far the required rate sits
//!   above or below the current rate
//! - **Bounds**: never report below 5% or above 95%

use serde::{Deserialize, Serialize};

use super::overs::{BALLS_PER_OVER, INNINGS_BALLS};

/// Required run rate reported when no balls remain.
pub const NO_BALLS_LEFT_RRR: f64 = 99.0;
/// Logistic steepness per run of margin at full certainty.
const MARGIN_K: f64 = 0.08;
const MIN_PCT: f64 = 5.0;
const MAX_PCT: f64 = 95.0;

/// Everything the estimate depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseInputs {
    pub predicted_score: i32,
    pub target_score: u32,
    pub current_score: u32,
    pub balls_left: u32,
    pub wickets_left: u32,
    pub current_run_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinProbability {
    /// Chasing side, whole percent in [5, 95]
    pub batting_pct: u8,
    /// Defending side, always `100 - batting_pct`
    pub bowling_pct: u8,
    pub required_run_rate: f64,
    pub runs_needed: i32,
}

// ── Public API ───────────────────────────────────────────────────────────────

pub fn estimate_win_probability(inputs: &ChaseInputs) -> WinProbability {
    let runs_needed = inputs.target_score as i32 - inputs.current_score as i32;
    let overs_remaining = inputs.balls_left as f64 / BALLS_PER_OVER as f64;
    let rrr = required_run_rate(runs_needed, inputs.balls_left);

    let score_diff = (inputs.predicted_score - inputs.target_score as i32) as f64;
    let certainty = innings_certainty(inputs.balls_left);
    let wicket_factor = inputs.wickets_left as f64 / 10.0;

    let raw = sigmoid(MARGIN_K * certainty * score_diff);
    let mut p = raw * wicket_factor + 0.5 * (1.0 - wicket_factor);

    if overs_remaining > 0.0 {
        p = apply_pressure(p, rrr - inputs.current_run_rate);
    }

    let batting_pct = (p * 100.0).clamp(MIN_PCT, MAX_PCT).round_ties_even() as u8;
    WinProbability {
        batting_pct,
        bowling_pct: 100 - batting_pct,
        required_run_rate: rrr,
        runs_needed,
    }
}

/// Runs per over still needed; [`NO_BALLS_LEFT_RRR`] once the balls run out.
pub fn required_run_rate(runs_needed: i32, balls_left: u32) -> f64 {
    let overs_remaining = balls_left as f64 / BALLS_PER_OVER as f64;
    if overs_remaining > 0.0 {
        runs_needed as f64 / overs_remaining
    } else {
        NO_BALLS_LEFT_RRR
    }
}

// ── Components ───────────────────────────────────────────────────────────────

/// 0.5 at the first ball, 1.0 at the last.
fn innings_certainty(balls_left: u32) -> f64 {
    0.5 + (1.0 - balls_left as f64 / INNINGS_BALLS as f64) * 0.5
}

/// `rr_pressure` is required rate minus current rate.
fn apply_pressure(p: f64, rr_pressure: f64) -> f64 {
    if rr_pressure > 6.0 {
        p * 0.7
    } else if rr_pressure > 3.0 {
        p * 0.85
    } else if rr_pressure < -3.0 {
        (p * 1.15).min(0.95)
    } else {
        p
    }
}

/// Standard logistic function.
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
